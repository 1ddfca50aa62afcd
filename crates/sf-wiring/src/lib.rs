//! sf-wiring: wiring-graph layer for scenarioflow.
//!
//! Provides:
//! - Core wiring data structures (Item, Wire, WiringGraph)
//! - Incremental builder with per-document id allocation and validation
//! - Tensor flattening for scenario-dependent parameters
//! - The scenario selector wiring plan (tensor → gather chain → outputs)
//! - XML rendering of a validated graph for backend import
//!
//! # Example
//!
//! ```
//! use sf_wiring::WiringBuilder;
//!
//! let mut builder = WiringBuilder::new();
//! let tensor = builder.add_parameter(":Tensor", (0.0, 0.0));
//! let out = builder.add_flow(":rate", (200.0, 0.0));
//! builder.connect(tensor.output, out.input.unwrap());
//! let graph = builder.finish().unwrap();
//!
//! assert_eq!(graph.items().len(), 2);
//! assert_eq!(graph.wires().len(), 1);
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub mod plan;
pub mod render;
pub mod tensor;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::{GateHandle, SumHandle, VariableHandle, WiringBuilder};
pub use error::WiringError;
pub use graph::{Item, ItemKind, Wire, WiringGraph};
pub use plan::{build_scenario_wiring, ScenarioWiringSpec, DEFAULT_PARAM_AXIS, DEFAULT_SCENARIO_AXIS};
pub use render::to_xml;
pub use tensor::{flatten, partition, FlattenedTensor};
