use serde::Deserialize;
use serde::Serialize;

pub mod admin;
pub mod contractor;

use admin::AdminRequest;
use admin::AdminResponse;
use contractor::ContractorRequest;
use contractor::ContractorResponse;
use omni_user_interface::Role;

/// One front-end event. The variant decides which role the orchestrator
/// switches to before handling it.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "message_type")]
pub enum SystemMessages {
    Admin(AdminRequest),
    Contractor(ContractorRequest),
}

impl SystemMessages {
    pub fn role(&self) -> Role {
        match self {
            SystemMessages::Admin(_) => Role::Admin,
            SystemMessages::Contractor(_) => Role::Contractor,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[allow(clippy::large_enum_variant)]
pub enum SystemResponses {
    Admin(AdminResponse),
    Contractor(ContractorResponse),
}
