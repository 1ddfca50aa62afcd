//! sf-core: stable foundation for scenarioflow.
//!
//! Contains:
//! - ids (compact IDs for wiring-document objects)
//! - cell (numeric cell parsing with explicit "no value" semantics)
//! - error (shared error types)

pub mod cell;
pub mod error;
pub mod ids;

// Re-exports: nice ergonomics for downstream crates
pub use cell::*;
pub use error::{SfError, SfResult};
pub use ids::*;
