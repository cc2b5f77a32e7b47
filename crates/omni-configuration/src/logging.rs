use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Logging {
    /// No file layer is installed when this is absent.
    pub log_directory: Option<PathBuf>,
    pub file_name: String,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            log_directory: None,
            file_name: "omni.developer.log".to_string(),
        }
    }
}
