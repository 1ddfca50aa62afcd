//! sf-backend: capability interface to the simulation backend.
//!
//! The real engine lives in the host application; this crate defines the
//! asynchronous surface the pipeline consumes (variable listing, detail
//! lookup, mutation, creation, graph import), a bounded-batch fetch
//! helper, and an in-memory implementation for tests and offline use.
//! Core logic never depends on the transport behind the trait.

pub mod api;
pub mod batch;
pub mod error;
pub mod mock;

pub use api::{ModelBackend, NewVariable, TensorAxes, VariableDetails, VariableFields};
pub use batch::{fetch_details, DEFAULT_BATCH_SIZE};
pub use error::{BackendError, BackendResult};
pub use mock::InMemoryBackend;
