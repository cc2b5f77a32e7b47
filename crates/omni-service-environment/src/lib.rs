pub mod error;
pub mod identifiers;
pub mod image_reference;
pub mod schedule;
pub mod seed;
pub mod service_order;

use identifiers::IdGenerator;
use schedule::ScheduleItem;
use schedule::ScheduleItems;
use service_order::ServiceOrder;
use service_order::ServiceOrders;

pub const DEFAULT_ORDER_PREFIX: &str = "OS";
pub const DEFAULT_SCHEDULE_PREFIX: &str = "SCH";

/// The two record collections of the dashboard. Each repository exclusively
/// owns its records; nothing is shared between them.
#[derive(Clone, Debug)]
pub struct ServiceEnvironment {
    pub service_orders: ServiceOrders,
    pub schedule_items: ScheduleItems,
}

pub struct ServiceEnvironmentBuilder {
    service_orders: Option<Vec<ServiceOrder>>,
    schedule_items: Option<Vec<ScheduleItem>>,
    order_id_generator: Option<IdGenerator>,
    schedule_id_generator: Option<IdGenerator>,
}

impl ServiceEnvironment {
    pub fn builder() -> ServiceEnvironmentBuilder {
        ServiceEnvironmentBuilder {
            service_orders: None,
            schedule_items: None,
            order_id_generator: None,
            schedule_id_generator: None,
        }
    }

    /// First-run state: the fixed seed records.
    pub fn seeded() -> Self {
        Self::builder().build()
    }
}

impl ServiceEnvironmentBuilder {
    // Collections that were never supplied fall back to the seed defaults.
    pub fn build(self) -> ServiceEnvironment {
        let order_id_generator = self
            .order_id_generator
            .unwrap_or_else(|| IdGenerator::new(DEFAULT_ORDER_PREFIX));
        let schedule_id_generator = self
            .schedule_id_generator
            .unwrap_or_else(|| IdGenerator::new(DEFAULT_SCHEDULE_PREFIX));

        ServiceEnvironment {
            service_orders: ServiceOrders::new(
                self.service_orders.unwrap_or_else(seed::service_orders),
                order_id_generator,
            ),
            schedule_items: ScheduleItems::new(
                self.schedule_items.unwrap_or_else(seed::schedule_items),
                schedule_id_generator,
            ),
        }
    }

    pub fn service_orders(mut self, service_orders: Vec<ServiceOrder>) -> Self {
        self.service_orders = Some(service_orders);
        self
    }

    pub fn schedule_items(mut self, schedule_items: Vec<ScheduleItem>) -> Self {
        self.schedule_items = Some(schedule_items);
        self
    }

    pub fn order_id_generator(mut self, id_generator: IdGenerator) -> Self {
        self.order_id_generator = Some(id_generator);
        self
    }

    pub fn schedule_id_generator(mut self, id_generator: IdGenerator) -> Self {
        self.schedule_id_generator = Some(id_generator);
        self
    }
}
