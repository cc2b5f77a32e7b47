use omni_service_environment::DEFAULT_ORDER_PREFIX;
use omni_service_environment::DEFAULT_SCHEDULE_PREFIX;
use serde::Deserialize;
use serde::Serialize;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Identifiers {
    pub order_prefix: String,
    pub schedule_prefix: String,
}

impl Default for Identifiers {
    fn default() -> Self {
        Self {
            order_prefix: DEFAULT_ORDER_PREFIX.to_string(),
            schedule_prefix: DEFAULT_SCHEDULE_PREFIX.to_string(),
        }
    }
}
