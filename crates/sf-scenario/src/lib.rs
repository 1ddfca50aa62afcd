//! sf-scenario: scenario tables parsed from CSV.
//!
//! Provides:
//! - The scenario data model (parameters × named scenario columns)
//! - A CSV parser with metadata-column sniffing
//! - Shape validation guarding downstream consumers
//! - CSV rendering for variable exports

pub mod export;
pub mod model;
pub mod parser;
pub mod validate;

// Re-exports for ergonomics
pub use export::{render_csv, VariableRow};
pub use model::{InitValue, ParamKind, ParameterInfo, ScenarioData};
pub use parser::{parse, ParseError};
pub use validate::check_shape;
