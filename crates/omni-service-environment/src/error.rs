use thiserror::Error;

use crate::service_order::OrderField;
use crate::service_order::OrderId;

/// Rejections of the order repository. Every variant is raised before the
/// collection is touched, so a failed call leaves the repository unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceOrderError {
    #[error("required field `{0}` is empty")]
    MissingField(OrderField),
    #[error("service order {0} does not exist")]
    NotFound(OrderId),
    #[error("service order {0} is DONE and cannot be reopened")]
    StatusRegression(OrderId),
    #[error("evidence can only be attached to a DONE service order, {0} would stay OPEN")]
    EvidenceRequiresCompletion(OrderId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("a schedule item requires an image")]
    MissingImage,
}
