//! Scenario data model.

use serde::{Deserialize, Serialize};

/// Kind of model variable a parameter row maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Parameter,
    Constant,
    Flow,
}

impl ParamKind {
    /// Parse a `type` cell, case-insensitively. Unknown text falls back to
    /// `Parameter`, matching the default for a missing cell.
    pub fn from_cell(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "constant" => ParamKind::Constant,
            "flow" => ParamKind::Flow,
            _ => ParamKind::Parameter,
        }
    }

    /// Backend type tag for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ParamKind::Parameter => "parameter",
            ParamKind::Constant => "constant",
            ParamKind::Flow => "flow",
        }
    }
}

/// Initial value from the `init` column: numeric when it parses, raw text
/// otherwise (the backend accepts expressions as init strings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InitValue {
    Number(f64),
    Text(String),
}

impl InitValue {
    pub fn from_cell(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<f64>() {
            Ok(n) => Some(InitValue::Number(n)),
            Err(_) => Some(InitValue::Text(trimmed.to_string())),
        }
    }

    /// Render as the backend's init string. `None` callers default to "0".
    pub fn to_init_string(&self) -> String {
        match self {
            InitValue::Number(n) => format!("{n}"),
            InitValue::Text(s) => s.clone(),
        }
    }
}

/// One parameter row from the scenario table.
///
/// `values` is ordered to align 1:1 with the owning [`ScenarioData`]'s
/// `scenario_names`; a length mismatch is a caller-contract violation
/// caught by [`crate::validate::check_shape`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterInfo {
    pub name: String,
    pub kind: ParamKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<InitValue>,
    /// One entry per scenario column, `None` meaning "no value for this
    /// scenario" (distinct from an explicit 0).
    pub values: Vec<Option<f64>>,
}

impl ParameterInfo {
    /// True when at least one scenario column carries a value.
    pub fn scenario_dependent(&self) -> bool {
        self.values.iter().any(|v| v.is_some())
    }

    /// Init string for backend materialization, defaulting to "0".
    pub fn init_string(&self) -> String {
        self.init
            .as_ref()
            .map(|i| i.to_init_string())
            .unwrap_or_else(|| "0".to_string())
    }
}

/// A parsed scenario table: parameter rows × named scenario columns.
///
/// Constructed once per parse call, immutable thereafter. Row order
/// preserves CSV order; `scenario_names` preserves header order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioData {
    pub parameters: Vec<ParameterInfo>,
    pub scenario_names: Vec<String>,
}

impl ScenarioData {
    /// Index of a scenario column by name.
    pub fn scenario_index(&self, scenario: &str) -> Option<usize> {
        self.scenario_names.iter().position(|s| s == scenario)
    }

    /// Value of one parameter under one named scenario.
    ///
    /// Returns `None` when the scenario name is unknown; `Some(None)` when
    /// the scenario exists but the cell is blank.
    pub fn value_of(&self, param: &ParameterInfo, scenario: &str) -> Option<Option<f64>> {
        let idx = self.scenario_index(scenario)?;
        param.values.get(idx).copied()
    }
}
