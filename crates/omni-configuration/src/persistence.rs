use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

/// Where the two collections are stored and under which keys.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Persistence {
    pub storage_directory: PathBuf,
    pub orders_key: String,
    pub schedule_key: String,
}

impl Default for Persistence {
    fn default() -> Self {
        Self {
            storage_directory: PathBuf::from("./omni_storage"),
            orders_key: "omni_orders".to_string(),
            schedule_key: "omni_schedule".to_string(),
        }
    }
}
