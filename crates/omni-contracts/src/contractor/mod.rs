use omni_service_environment::image_reference::ImageReference;
use omni_service_environment::service_order::OrderId;
use omni_service_environment::service_order::ServiceOrder;
use omni_user_interface::views::ContractorView;
use omni_user_interface::views::OrderDetail;
use serde::Deserialize;
use serde::Serialize;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum ContractorRequest {
    Tasks,
    Schedule,
    Show(OrderId),
    Complete {
        id: OrderId,
        evidence_image: ImageReference,
    },
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum ContractorResponse {
    View(ContractorView),
    Detail(OrderDetail),
    Completed(ServiceOrder),
}
