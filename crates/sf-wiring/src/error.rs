//! Wiring-specific error types.

use sf_core::{Id, SfError};
use thiserror::Error;

/// Wiring construction and validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WiringError {
    #[error("Duplicate id {id} in wiring document")]
    DuplicateId { id: Id },

    #[error("Wire {wire} references unknown port {port}")]
    UnknownPort { wire: Id, port: Id },

    #[error("Input port {port} of item {item} has {count} incoming wires (expected 1)")]
    BadFanIn { item: Id, port: Id, count: usize },

    #[error("Designated {role} id {id} does not name an item")]
    UnknownEndpoint { role: &'static str, id: Id },

    #[error("Wiring graph contains a cycle")]
    Cycle,

    #[error("Scenario offset would be negative: {total_rows} total rows < {scenario_count} scenarios")]
    NegativeOffset {
        total_rows: usize,
        scenario_count: usize,
    },
}

impl From<WiringError> for SfError {
    fn from(err: WiringError) -> Self {
        SfError::Contract {
            what: err.to_string(),
        }
    }
}
