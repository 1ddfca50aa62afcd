//! Tensor flattening for scenario-dependent parameters.

use sf_core::{ensure_finite, SfResult};
use sf_scenario::{check_shape, ParameterInfo, ScenarioData};

/// A flattened scenario tensor, parameter-major and scenario-minor:
/// `values[p * scenario_names.len() + s]` is parameter `p` under scenario `s`.
///
/// Flattening encodes "no value" as `0.0`, which collapses it with an
/// explicit zero; `mask` records which cells actually carried a value so
/// callers that need the distinction still have it.
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedTensor {
    pub values: Vec<f64>,
    pub mask: Vec<bool>,
    pub param_names: Vec<String>,
    pub scenario_names: Vec<String>,
}

impl FlattenedTensor {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flat index of (parameter row, scenario column).
    pub fn index(&self, param: usize, scenario: usize) -> usize {
        param * self.scenario_names.len() + scenario
    }
}

/// Split parameters into scenario-dependent (at least one value) and
/// static (all cells blank) sets, preserving row order.
pub fn partition(data: &ScenarioData) -> (Vec<&ParameterInfo>, Vec<&ParameterInfo>) {
    data.parameters.iter().partition(|p| p.scenario_dependent())
}

/// Flatten the scenario-dependent parameters of a table.
///
/// Validates the table shape first; a values/names length mismatch is a
/// caller-contract violation, not a coercible condition. Non-finite cell
/// values are rejected: they would otherwise be serialized straight into
/// the tensor's init expression.
pub fn flatten(data: &ScenarioData) -> SfResult<FlattenedTensor> {
    check_shape(data)?;

    let (dependent, _) = partition(data);
    let n_scenarios = data.scenario_names.len();

    let mut values = Vec::with_capacity(dependent.len() * n_scenarios);
    let mut mask = Vec::with_capacity(dependent.len() * n_scenarios);
    for param in &dependent {
        for cell in &param.values {
            values.push(ensure_finite(cell.unwrap_or(0.0), "scenario cell")?);
            mask.push(cell.is_some());
        }
    }

    Ok(FlattenedTensor {
        values,
        mask,
        param_names: dependent.iter().map(|p| p.name.clone()).collect(),
        scenario_names: data.scenario_names.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_scenario::{ParamKind, ParameterInfo};

    fn param(name: &str, values: Vec<Option<f64>>) -> ParameterInfo {
        ParameterInfo {
            name: name.into(),
            kind: ParamKind::Parameter,
            units: None,
            description: None,
            init: None,
            values,
        }
    }

    fn table() -> ScenarioData {
        ScenarioData {
            parameters: vec![
                param("p0", vec![Some(1.0), Some(2.0), Some(3.0)]),
                param("static", vec![None, None, None]),
                param("p1", vec![Some(4.0), None, Some(6.0)]),
            ],
            scenario_names: vec!["s0".into(), "s1".into(), "s2".into()],
        }
    }

    #[test]
    fn flattening_is_parameter_major() {
        let tensor = flatten(&table()).unwrap();
        assert_eq!(tensor.len(), 6);
        assert_eq!(tensor.values, vec![1.0, 2.0, 3.0, 4.0, 0.0, 6.0]);
        assert_eq!(tensor.param_names, vec!["p0", "p1"]);
        assert_eq!(tensor.values[tensor.index(1, 2)], 6.0);
    }

    #[test]
    fn mask_distinguishes_blank_from_zero() {
        let tensor = flatten(&table()).unwrap();
        // p1/s1 is blank: encoded 0.0 but masked out.
        assert_eq!(tensor.values[4], 0.0);
        assert!(!tensor.mask[4]);
        assert!(tensor.mask[3]);
    }

    #[test]
    fn static_parameters_bypass_the_tensor() {
        let tensor = flatten(&table()).unwrap();
        assert!(!tensor.param_names.contains(&"static".to_string()));
    }

    #[test]
    fn non_finite_cells_are_rejected() {
        let mut data = table();
        data.parameters[0].values[1] = Some(f64::INFINITY);
        let err = flatten(&data).unwrap_err();
        assert!(format!("{err}").contains("Non-finite"));
    }

    #[test]
    fn misaligned_table_fails_fast() {
        let mut data = table();
        data.parameters[0].values.pop();
        assert!(flatten(&data).is_err());
    }

    #[test]
    fn partition_preserves_order() {
        let data = table();
        let (dep, stat) = partition(&data);
        let dep_names: Vec<_> = dep.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(dep_names, vec!["p0", "p1"]);
        assert_eq!(stat[0].name, "static");
    }
}
