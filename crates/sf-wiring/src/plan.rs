//! Scenario selector wiring plan.
//!
//! Builds the document that lets a single `SelectedScenario` index pick
//! the active scenario column at evaluation time: the tensor variable
//! fans out to one gather chain per parameter; the first gather selects
//! the parameter column by a per-parameter index constant, the second
//! selects the scenario row by the offset-adjusted selector.

use sf_scenario::ParamKind;

use crate::builder::WiringBuilder;
use crate::error::WiringError;
use crate::graph::WiringGraph;

pub const DEFAULT_PARAM_AXIS: &str = "name";
pub const DEFAULT_SCENARIO_AXIS: &str = "attribute";

const SPACING_Y: f64 = 80.0;

/// Inputs for one wiring generation call.
#[derive(Debug, Clone)]
pub struct ScenarioWiringSpec {
    /// Name of the tensor variable holding the scenario matrix.
    pub tensor_name: String,
    /// Scenario-dependent parameter names, in tensor column order.
    pub param_names: Vec<String>,
    /// Scenario names, in tensor row order (metadata rows excluded).
    pub scenario_names: Vec<String>,
    /// Axis tag for parameter (column) selection.
    pub param_axis: String,
    /// Axis tag for scenario (row) selection.
    pub scenario_axis: String,
    /// Total row count of the physical tensor, metadata rows included.
    /// The generated offset constant equals `total_rows - scenario count`.
    pub total_rows: usize,
}

impl ScenarioWiringSpec {
    /// Spec for a tensor without metadata rows, using default axis tags.
    pub fn new(
        tensor_name: impl Into<String>,
        param_names: Vec<String>,
        scenario_names: Vec<String>,
    ) -> Self {
        let total_rows = scenario_names.len();
        Self {
            tensor_name: tensor_name.into(),
            param_names,
            scenario_names,
            param_axis: DEFAULT_PARAM_AXIS.to_string(),
            scenario_axis: DEFAULT_SCENARIO_AXIS.to_string(),
            total_rows,
        }
    }

    fn scenario_offset(&self) -> Result<usize, WiringError> {
        self.total_rows
            .checked_sub(self.scenario_names.len())
            .ok_or(WiringError::NegativeOffset {
                total_rows: self.total_rows,
                scenario_count: self.scenario_names.len(),
            })
    }
}

/// Generate the scenario wiring document.
///
/// One call, one document: ids restart at 1 for every invocation.
pub fn build_scenario_wiring(spec: &ScenarioWiringSpec) -> Result<WiringGraph, WiringError> {
    let offset = spec.scenario_offset()?;
    let mut builder = WiringBuilder::new();

    // Group inputs: the tensor, the selector, and the offset constant.
    // The tensor name is accepted with or without the global prefix.
    let tensor = builder.add_parameter(
        format!(":{}", spec.tensor_name.trim_start_matches(':')),
        (0.0, spec.param_names.len() as f64 * SPACING_Y / 2.0),
    );
    builder.mark_input(tensor.item);

    let selector = builder.add_variable(
        ":SelectedScenario",
        ParamKind::Parameter,
        "0",
        Some(format!(
            "Select Scenario (0-{}): {}",
            spec.scenario_names.len().saturating_sub(1),
            spec.scenario_names.join(", ")
        )),
        (0.0, -100.0),
    );
    builder.mark_input(selector.item);

    let offset_item = builder.add_variable(
        ":ScenarioOffset",
        ParamKind::Parameter,
        offset.to_string(),
        Some(format!("Offset to skip metadata rows ({offset})")),
        (0.0, -180.0),
    );
    builder.mark_input(offset_item.item);

    // Adjusted scenario index = selector + offset.
    let adjust = builder.add_sum((150.0, -140.0));
    builder.connect(selector.output, adjust.lhs);
    builder.connect(offset_item.output, adjust.rhs);

    // One gather chain per parameter.
    for (index, param_name) in spec.param_names.iter().enumerate() {
        let y = index as f64 * SPACING_Y;

        let idx = builder.add_variable(
            format!(":idx_{param_name}"),
            ParamKind::Parameter,
            index.to_string(),
            Some(format!("Index for {param_name}")),
            (200.0, y),
        );

        let by_param = builder.add_gather(spec.param_axis.clone(), (400.0, y));
        let by_scenario = builder.add_gather(spec.scenario_axis.clone(), (600.0, y));
        let output = builder.add_flow(format!(":{param_name}"), (800.0, y));
        builder.mark_output(output.item);

        builder.connect(tensor.output, by_param.data);
        builder.connect(idx.output, by_param.index);
        builder.connect(by_param.output, by_scenario.data);
        builder.connect(adjust.output, by_scenario.index);
        builder.connect(
            by_scenario.output,
            output.input.unwrap_or(output.output), // flow always has an input
        );
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ItemKind;

    fn spec(params: &[&str], scenarios: &[&str], total_rows: usize) -> ScenarioWiringSpec {
        ScenarioWiringSpec {
            tensor_name: "ScenarioTensor".into(),
            param_names: params.iter().map(|s| s.to_string()).collect(),
            scenario_names: scenarios.iter().map(|s| s.to_string()).collect(),
            param_axis: DEFAULT_PARAM_AXIS.into(),
            scenario_axis: DEFAULT_SCENARIO_AXIS.into(),
            total_rows,
        }
    }

    fn variable_init<'a>(graph: &'a WiringGraph, name: &str) -> Option<&'a str> {
        graph.items().iter().find_map(|i| match &i.kind {
            ItemKind::Variable {
                name: n, init: v, ..
            } if n == name => Some(v.as_str()),
            _ => None,
        })
    }

    #[test]
    fn offset_counts_metadata_rows() {
        // 5 physical rows, last 2 are scenarios: offset is 3.
        let graph = build_scenario_wiring(&spec(&["a"], &["s0", "s1"], 5)).unwrap();
        assert_eq!(variable_init(&graph, ":ScenarioOffset"), Some("3"));
    }

    #[test]
    fn negative_offset_is_rejected() {
        let err = build_scenario_wiring(&spec(&["a"], &["s0", "s1"], 1)).unwrap_err();
        assert!(matches!(err, WiringError::NegativeOffset { .. }));
    }

    #[test]
    fn one_gather_chain_per_parameter() {
        let graph = build_scenario_wiring(&spec(&["a", "b", "c"], &["s0", "s1"], 2)).unwrap();

        let gathers = graph.items().iter().filter(|i| i.is_gather()).count();
        assert_eq!(gathers, 6);
        assert_eq!(graph.outputs().len(), 3);
        assert_eq!(graph.inputs().len(), 3);

        // Per parameter index constants count up from 0.
        assert_eq!(variable_init(&graph, ":idx_a"), Some("0"));
        assert_eq!(variable_init(&graph, ":idx_b"), Some("1"));
        assert_eq!(variable_init(&graph, ":idx_c"), Some("2"));
    }

    #[test]
    fn tensor_fans_out_to_every_column_gather() {
        let graph = build_scenario_wiring(&spec(&["a", "b"], &["s0"], 1)).unwrap();
        let tensor = graph
            .items()
            .iter()
            .find(|i| matches!(&i.kind, ItemKind::Variable { name, .. } if name == ":ScenarioTensor"))
            .unwrap();
        let fan_out = graph
            .wires()
            .iter()
            .filter(|w| w.from == tensor.output())
            .count();
        assert_eq!(fan_out, 2);
    }

    #[test]
    fn selector_tooltip_lists_scenarios() {
        let graph = build_scenario_wiring(&spec(&["a"], &["base", "high"], 2)).unwrap();
        let tooltip = graph.items().iter().find_map(|i| match &i.kind {
            ItemKind::Variable { name, tooltip, .. } if name == ":SelectedScenario" => {
                tooltip.as_deref()
            }
            _ => None,
        });
        assert_eq!(tooltip, Some("Select Scenario (0-1): base, high"));
    }

    #[test]
    fn prefixed_tensor_name_is_not_doubled() {
        let mut s = spec(&["a"], &["s0"], 1);
        s.tensor_name = ":ScenarioTensor".into();
        let graph = build_scenario_wiring(&s).unwrap();
        let tensor_name = graph.items().iter().find_map(|i| match &i.kind {
            ItemKind::Variable { name, .. } if name.contains("ScenarioTensor") => {
                Some(name.as_str())
            }
            _ => None,
        });
        assert_eq!(tensor_name, Some(":ScenarioTensor"));
    }

    #[test]
    fn ids_reset_between_calls() {
        let s = spec(&["a"], &["s0"], 1);
        let g1 = build_scenario_wiring(&s).unwrap();
        let g2 = build_scenario_wiring(&s).unwrap();
        assert_eq!(g1, g2);
    }
}
