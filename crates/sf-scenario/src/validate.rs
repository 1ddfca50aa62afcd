//! Shape validation for scenario tables.

use sf_core::{SfError, SfResult};

use crate::model::ScenarioData;

/// Check the structural invariant: every parameter carries exactly one
/// value slot per scenario column.
///
/// The parser upholds this by construction; hand-built or deserialized
/// tables go through here before tensor building, which assumes the shape
/// and fails fast on violation instead of coercing.
pub fn check_shape(data: &ScenarioData) -> SfResult<()> {
    let expected = data.scenario_names.len();
    for param in &data.parameters {
        if param.values.len() != expected {
            return Err(SfError::contract(format!(
                "parameter '{}' has {} scenario values, expected {}",
                param.name,
                param.values.len(),
                expected
            )));
        }
    }
    Ok(())
}
