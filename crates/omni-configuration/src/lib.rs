mod identifiers;
mod logging;
mod persistence;
mod user_interface;

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;
use arc_swap::ArcSwap;
use serde::Deserialize;
use serde::Serialize;

pub use identifiers::Identifiers;
pub use logging::Logging;
pub use persistence::Persistence;
pub use user_interface::UserInterface;

pub const DEFAULT_CONFIGURATION_PATH: &str = "./configuration/omni.toml";
pub const STORAGE_DIRECTORY_VARIABLE: &str = "OMNI_STORAGE_DIR";

/// Single source of all configuration. The orchestrator receives it wrapped
/// and hands the relevant sections to the components it builds.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SystemConfigurations {
    pub persistence: Persistence,
    pub identifiers: Identifiers,
    pub user_interface: UserInterface,
    pub logging: Logging,
}

impl SystemConfigurations {
    /// Reads the TOML file at `path` (built-in defaults when it does not
    /// exist) and applies the `OMNI_STORAGE_DIR` override from the
    /// environment or `.env`.
    pub fn read_all_configs(path: &Path) -> Result<Arc<ArcSwap<SystemConfigurations>>> {
        let system_configurations = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("could not read configuration {}", path.display()))?;
            Self::from_toml_str(&contents)
                .with_context(|| format!("invalid configuration {}", path.display()))?
        } else {
            Self::default()
        };
        let system_configurations = system_configurations
            .with_storage_directory_override(dotenvy::var(STORAGE_DIRECTORY_VARIABLE).ok());

        Ok(Arc::new(ArcSwap::new(Arc::new(system_configurations))))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn with_storage_directory_override(mut self, storage_directory: Option<String>) -> Self {
        if let Some(storage_directory) = storage_directory.filter(|directory| !directory.is_empty()) {
            self.persistence.storage_directory = PathBuf::from(storage_directory);
        }
        self
    }
}
