use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use omni_contracts::SystemMessages;
use omni_contracts::contractor::ContractorRequest;
use omni_service_environment::service_order::OrderId;

use crate::image_reader::read_image;

#[derive(Subcommand, Debug)]
pub enum ContractorCommands {
    /// All service orders, open ones first in line
    Tasks,
    /// Every posted schedule, newest first
    Schedule,
    /// Details of a single order
    Show { id: String },
    /// Close an OPEN order with a photo of the completed work
    Complete { id: String, evidence: PathBuf },
}

impl ContractorCommands {
    pub fn execute(&self) -> Result<SystemMessages> {
        let contractor_request = match self {
            ContractorCommands::Tasks => ContractorRequest::Tasks,
            ContractorCommands::Schedule => ContractorRequest::Schedule,
            ContractorCommands::Show { id } => ContractorRequest::Show(OrderId::from(id.as_str())),
            ContractorCommands::Complete { id, evidence } => ContractorRequest::Complete {
                id: OrderId::from(id.as_str()),
                evidence_image: read_image(evidence)?,
            },
        };
        Ok(SystemMessages::Contractor(contractor_request))
    }
}
