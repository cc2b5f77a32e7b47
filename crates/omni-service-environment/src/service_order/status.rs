use clap::ValueEnum;
use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;
use strum_macros::EnumIter;
use strum_macros::EnumString;

/// Lifecycle of a service order. The only transition is OPEN -> DONE.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    ValueEnum,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Status {
    Open,
    Done,
}

impl Status {
    pub fn is_open(&self) -> bool {
        matches!(self, Status::Open)
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Status::Done)
    }

    /// Whether moving from `self` to `next` respects the OPEN -> DONE ordering.
    pub fn allows_transition_to(&self, next: Status) -> bool {
        !(self.is_done() && next.is_open())
    }
}
