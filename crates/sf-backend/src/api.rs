//! The backend capability trait and its value types.

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use sf_scenario::ParamKind;

use crate::error::BackendResult;

/// Everything the pipeline reads about one model variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDetails {
    pub name: String,
    pub value_id: String,
    pub value: f64,
    pub init: String,
    pub units: String,
    pub description: String,
    pub kind: String,
}

/// Fields an apply step may write back to an existing variable.
///
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableFields {
    pub init: Option<String>,
    pub units: Option<String>,
    pub tooltip: Option<String>,
}

/// Request to materialize a new canvas variable.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVariable {
    pub name: String,
    pub kind: ParamKind,
    pub init: String,
    pub pos: (f64, f64),
    pub units: Option<String>,
    pub tooltip: Option<String>,
}

impl NewVariable {
    pub fn parameter(name: impl Into<String>, init: impl Into<String>, pos: (f64, f64)) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Parameter,
            init: init.into(),
            pos,
            units: None,
            tooltip: None,
        }
    }
}

/// Axis structure of a tensor variable: axis tags plus the labels along
/// each axis (columns = parameters, rows = scenario/metadata attributes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensorAxes {
    pub param_axis: String,
    pub scenario_axis: String,
    pub param_labels: Vec<String>,
    pub row_labels: Vec<String>,
}

/// Asynchronous capability surface of the simulation backend.
///
/// Every method is an independent remote call that may fail on its own;
/// implementations adapt whatever transport the host process exposes.
pub trait ModelBackend: Send + Sync {
    /// List all variable names known to the model.
    fn variable_names(&self) -> BoxFuture<'_, BackendResult<Vec<String>>>;

    /// Fetch the details of one variable by name.
    fn variable<'a>(&'a self, name: &'a str) -> BoxFuture<'a, BackendResult<VariableDetails>>;

    /// Update fields of an existing variable.
    fn update_variable<'a>(
        &'a self,
        name: &'a str,
        fields: VariableFields,
    ) -> BoxFuture<'a, BackendResult<()>>;

    /// Create a new canvas variable.
    fn create_variable(&self, var: NewVariable) -> BoxFuture<'_, BackendResult<()>>;

    /// Read the axis structure of a tensor variable.
    fn tensor_axes<'a>(&'a self, name: &'a str) -> BoxFuture<'a, BackendResult<TensorAxes>>;

    /// Import a rendered wiring document into the current model.
    fn import_wiring<'a>(&'a self, document: &'a str) -> BoxFuture<'a, BackendResult<()>>;
}
