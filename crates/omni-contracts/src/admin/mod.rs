use omni_service_environment::image_reference::ImageReference;
use omni_service_environment::schedule::ScheduleItem;
use omni_service_environment::service_order::OrderFilter;
use omni_service_environment::service_order::OrderId;
use omni_service_environment::service_order::Priority;
use omni_service_environment::service_order::ServiceOrder;
use omni_service_environment::service_order::Status;
use omni_user_interface::views::AdminDashboard;
use serde::Deserialize;
use serde::Serialize;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum AdminRequest {
    Dashboard,
    ListOrders(OrderFilter),
    Create(OrderInput),
    Edit {
        id: OrderId,
        order_input: OrderInput,
        status: Option<Status>,
        evidence_image: Option<ImageReference>,
    },
    /// Unconfirmed deletions are dropped without touching the orders.
    Delete {
        id: OrderId,
        confirmed: bool,
    },
    UploadSchedule {
        title: Option<String>,
        image_url: ImageReference,
    },
}

/// Raw form input as typed by the user. On create every field but priority
/// must be present; on edit absent fields keep the pre-filled value.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderInput {
    pub title: Option<String>,
    pub location: Option<String>,
    pub deadline: Option<String>,
    pub priority: Option<Priority>,
    pub description: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[allow(clippy::large_enum_variant)]
pub enum AdminResponse {
    Dashboard(AdminDashboard),
    Orders(Vec<ServiceOrder>),
    Created(ServiceOrder),
    Updated(ServiceOrder),
    Deleted(OrderId),
    /// The id did not exist, the collection is unchanged.
    NothingDeleted(OrderId),
    DeletionCancelled(OrderId),
    ScheduleUploaded(ScheduleItem),
}
