use std::io::BufRead;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use omni_contracts::SystemMessages;
use omni_contracts::admin::AdminRequest;
use omni_contracts::admin::OrderInput;
use omni_service_environment::service_order::OrderFilter;
use omni_service_environment::service_order::OrderId;
use omni_service_environment::service_order::Priority;
use omni_service_environment::service_order::Status;

use super::confirm;
use crate::image_reader::read_image;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this order? [y/N]";

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// Show the counters, the order table and the latest schedules
    Dashboard,
    /// List service orders, optionally filtered
    List {
        #[arg(long, value_enum)]
        status: Option<Status>,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
    },
    /// Create a new OPEN service order
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        location: String,
        /// Deadline as YYYY-MM-DD
        #[arg(long)]
        deadline: String,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        #[arg(long)]
        description: String,
    },
    /// Edit an order; fields that are not given keep their value
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        deadline: Option<String>,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// Photo of the completed work
        #[arg(long)]
        evidence: Option<PathBuf>,
    },
    /// Delete an order after confirmation
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Post a schedule image visible to contractors
    UploadSchedule {
        file: PathBuf,
        #[arg(long)]
        title: Option<String>,
    },
}

impl AdminCommands {
    pub fn execute(&self, input: &mut impl BufRead, output: &mut impl Write) -> Result<SystemMessages> {
        let admin_request = match self {
            AdminCommands::Dashboard => AdminRequest::Dashboard,
            AdminCommands::List { status, priority } => AdminRequest::ListOrders(OrderFilter {
                status: *status,
                priority: *priority,
            }),
            AdminCommands::Create {
                title,
                location,
                deadline,
                priority,
                description,
            } => AdminRequest::Create(OrderInput {
                title: Some(title.clone()),
                location: Some(location.clone()),
                deadline: Some(deadline.clone()),
                priority: *priority,
                description: Some(description.clone()),
            }),
            AdminCommands::Edit {
                id,
                title,
                location,
                deadline,
                priority,
                description,
                status,
                evidence,
            } => {
                let evidence_image = match evidence {
                    Some(path) => Some(read_image(path)?),
                    None => None,
                };
                AdminRequest::Edit {
                    id: OrderId::from(id.as_str()),
                    order_input: OrderInput {
                        title: title.clone(),
                        location: location.clone(),
                        deadline: deadline.clone(),
                        priority: *priority,
                        description: description.clone(),
                    },
                    status: *status,
                    evidence_image,
                }
            }
            AdminCommands::Delete { id, yes } => {
                let confirmed = *yes || confirm(DELETE_PROMPT, input, output)?;
                AdminRequest::Delete {
                    id: OrderId::from(id.as_str()),
                    confirmed,
                }
            }
            AdminCommands::UploadSchedule { file, title } => AdminRequest::UploadSchedule {
                title: title.clone(),
                image_url: read_image(file)?,
            },
        };
        Ok(SystemMessages::Admin(admin_request))
    }
}
