use omni_service_environment::service_order::Priority;
use serde::Deserialize;
use serde::Serialize;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct UserInterface {
    /// Number of schedule images shown on the admin dashboard.
    pub gallery_preview_size: usize,
    /// Priority pre-selected when the order form opens for a new order.
    pub default_priority: Priority,
}

impl Default for UserInterface {
    fn default() -> Self {
        Self {
            gallery_preview_size: 4,
            default_priority: Priority::Med,
        }
    }
}
