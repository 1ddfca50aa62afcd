//! Canvas growing: materialize a parsed scenario table on the backend.
//!
//! Two entry points mirror the two workflows: `grow_infrastructure`
//! creates the tensor, selector, and per-parameter variables from a
//! parsed table; `wire_tensor` generates and imports the selector wiring
//! for a tensor that already lives in the model.

use tracing::info;

use sf_backend::{ModelBackend, NewVariable};
use sf_scenario::{ParamKind, ScenarioData};
use sf_wiring::{build_scenario_wiring, flatten, partition, to_xml, ScenarioWiringSpec};

use crate::error::AppResult;

/// Canvas layout for grown items.
const LAYOUT_X: f64 = 100.0;
const LAYOUT_Y0: f64 = 100.0;
const LAYOUT_DX: f64 = 200.0;
const LAYOUT_DY: f64 = 80.0;

/// Name of the tensor variable holding the scenario matrix.
pub const TENSOR_NAME: &str = "ScenarioTensor";
/// Name of the runtime-settable scenario selector.
pub const SELECTOR_NAME: &str = "SelectedScenario";

/// What a grow call materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthSummary {
    pub dependent: usize,
    pub static_params: usize,
}

/// Create the scenario infrastructure for a parsed table:
/// the flattened tensor variable, the selector control, per-parameter
/// index constants and output variables, and plain variables for
/// parameters without scenario values.
pub async fn grow_infrastructure(
    backend: &dyn ModelBackend,
    data: &ScenarioData,
) -> AppResult<GrowthSummary> {
    let tensor = flatten(data)?;
    let (dependent, static_params) = partition(data);
    let mut y = LAYOUT_Y0;

    if !dependent.is_empty() {
        backend
            .create_variable(NewVariable {
                name: format!(":{TENSOR_NAME}"),
                kind: ParamKind::Parameter,
                init: serde_json::to_string(&tensor.values)?,
                pos: (LAYOUT_X, y),
                units: None,
                tooltip: Some(format!(
                    "Scenario matrix: {} params × {} scenarios",
                    dependent.len(),
                    data.scenario_names.len()
                )),
            })
            .await?;
        y += LAYOUT_DY;

        backend
            .create_variable(NewVariable {
                tooltip: Some("Active scenario index".to_string()),
                ..NewVariable::parameter(format!(":{SELECTOR_NAME}"), "0", (LAYOUT_X, y))
            })
            .await?;

        y = LAYOUT_Y0 + 2.0 * LAYOUT_DY;
        for (index, param) in dependent.iter().enumerate() {
            backend
                .create_variable(NewVariable {
                    name: format!(":idx_{}", param.name),
                    kind: ParamKind::Constant,
                    init: index.to_string(),
                    pos: (LAYOUT_X + LAYOUT_DX, y),
                    units: None,
                    tooltip: None,
                })
                .await?;

            backend
                .create_variable(NewVariable {
                    name: format!(":{}", param.name),
                    kind: param.kind,
                    init: param.init_string(),
                    pos: (LAYOUT_X + 3.0 * LAYOUT_DX, y),
                    units: param.units.clone(),
                    tooltip: param.description.clone(),
                })
                .await?;

            y += LAYOUT_DY;
        }
    }

    if !static_params.is_empty() {
        y += LAYOUT_DY;
        for param in &static_params {
            backend
                .create_variable(NewVariable {
                    name: format!(":{}", param.name),
                    kind: param.kind,
                    init: param.init_string(),
                    pos: (LAYOUT_X, y),
                    units: param.units.clone(),
                    tooltip: param.description.clone(),
                })
                .await?;
            y += LAYOUT_DY;
        }
    }

    info!(
        dependent = dependent.len(),
        static_params = static_params.len(),
        "scenario infrastructure grown"
    );
    Ok(GrowthSummary {
        dependent: dependent.len(),
        static_params: static_params.len(),
    })
}

/// Generate and import the selector wiring for a tensor already present
/// in the model. Axis tags and the metadata-row offset come from the
/// tensor's actual structure, not from assumptions about it.
pub async fn wire_tensor(
    backend: &dyn ModelBackend,
    tensor_name: &str,
    param_names: &[String],
    scenario_names: &[String],
) -> AppResult<()> {
    let axes = backend.tensor_axes(tensor_name).await?;

    let spec = ScenarioWiringSpec {
        tensor_name: tensor_name.trim_start_matches(':').to_string(),
        param_names: param_names.to_vec(),
        scenario_names: scenario_names.to_vec(),
        param_axis: axes.param_axis,
        scenario_axis: axes.scenario_axis,
        total_rows: axes.row_labels.len(),
    };

    let graph = build_scenario_wiring(&spec)?;
    let document = to_xml(&graph);
    backend.import_wiring(&document).await?;

    info!(tensor = tensor_name, params = param_names.len(), "selector wiring imported");
    Ok(())
}
