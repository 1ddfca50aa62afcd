//! Shared application service layer for scenarioflow.
//!
//! This crate drives the pipeline end to end for any frontend:
//! scenario loading (read → parse → match → validate → apply), canvas
//! growing (tensor + wiring materialization), and variable export.

pub mod error;
pub mod exporter;
pub mod grower;
pub mod loader;
pub mod matcher;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use exporter::{export_variables, write_variables_csv};
pub use grower::{grow_infrastructure, wire_tensor, GrowthSummary};
pub use loader::{
    apply_scenario, create_missing_variables, match_variables, parse_scenario,
    read_scenario_file, validate_scenario,
};
pub use matcher::{resolve_target, validate_mappings, ParameterMapping, ValidationResult};
