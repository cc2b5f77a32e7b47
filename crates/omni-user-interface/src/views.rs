use omni_service_environment::ServiceEnvironment;
use omni_service_environment::image_reference::ImageReference;
use omni_service_environment::schedule::ScheduleItem;
use omni_service_environment::service_order::ServiceOrder;
use serde::Deserialize;
use serde::Serialize;

/// Dashboard counters. Derived from the orders on every render, never cached.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OrderStatistics {
    pub total: usize,
    pub open: usize,
    pub high_priority_open: usize,
    pub done: usize,
}

impl OrderStatistics {
    pub fn from_orders(service_orders: &[ServiceOrder]) -> Self {
        service_orders
            .iter()
            .fold(OrderStatistics::default(), |mut statistics, service_order| {
                statistics.total += 1;
                if service_order.is_open() {
                    statistics.open += 1;
                    if service_order.priority().is_high() {
                        statistics.high_priority_open += 1;
                    }
                } else {
                    statistics.done += 1;
                }
                statistics
            })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AdminDashboard {
    pub statistics: OrderStatistics,
    pub orders: Vec<ServiceOrder>,
    pub schedule_preview: Vec<ScheduleItem>,
}

impl AdminDashboard {
    pub fn derive(service_environment: &ServiceEnvironment, gallery_preview_size: usize) -> Self {
        let orders = service_environment.service_orders.records();
        Self {
            statistics: OrderStatistics::from_orders(orders),
            orders: orders.to_vec(),
            schedule_preview: service_environment
                .schedule_items
                .latest(gallery_preview_size)
                .to_vec(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TaskCard {
    pub order: ServiceOrder,
    /// OPEN orders are emphasized, DONE ones are shown muted.
    pub emphasized: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TaskBoard {
    pub cards: Vec<TaskCard>,
    pub all_caught_up: bool,
}

impl TaskBoard {
    pub fn derive(service_environment: &ServiceEnvironment) -> Self {
        let cards: Vec<TaskCard> = service_environment
            .service_orders
            .records()
            .iter()
            .map(|service_order| TaskCard {
                order: service_order.clone(),
                emphasized: service_order.is_open(),
            })
            .collect();
        let all_caught_up = !cards.iter().any(|card| card.emphasized);

        Self {
            cards,
            all_caught_up,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ScheduleFeed {
    pub items: Vec<ScheduleItem>,
}

impl ScheduleFeed {
    pub fn derive(service_environment: &ServiceEnvironment) -> Self {
        Self {
            items: service_environment.schedule_items.list().to_vec(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum ContractorView {
    Tasks(TaskBoard),
    Schedule(ScheduleFeed),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum DetailAction {
    /// The order is OPEN and closes once an evidence image is supplied.
    AwaitEvidence,
    Completed {
        evidence_image: Option<ImageReference>,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct OrderDetail {
    pub order: ServiceOrder,
    pub action: DetailAction,
}

impl OrderDetail {
    pub fn new(service_order: &ServiceOrder) -> Self {
        let action = if service_order.is_open() {
            DetailAction::AwaitEvidence
        } else {
            DetailAction::Completed {
                evidence_image: service_order.evidence_image().cloned(),
            }
        };
        Self {
            order: service_order.clone(),
            action,
        }
    }
}

/// Everything on screen for the current role.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Admin(AdminDashboard),
    Contractor {
        view: ContractorView,
        detail: Option<OrderDetail>,
    },
}
