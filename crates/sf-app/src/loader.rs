//! Scenario loading: read → parse → match → validate → apply.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info, warn};

use sf_backend::{fetch_details, ModelBackend, NewVariable, VariableFields, DEFAULT_BATCH_SIZE};
use sf_scenario::{parse, ScenarioData};

use crate::error::{AppError, AppResult};
use crate::matcher::{resolve_target, validate_mappings, ParameterMapping, ValidationResult};

/// Layout for variables created on the canvas for unmatched parameters.
const CREATE_X: f64 = 100.0;
const CREATE_Y0: f64 = 100.0;
const CREATE_DY: f64 = 50.0;

/// Read a scenario CSV from disk.
pub fn read_scenario_file(path: &Path) -> AppResult<String> {
    std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Match one scenario column of a parsed table against the backend.
///
/// Parameters whose cell for the selected scenario is blank are excluded
/// from the output entirely: the CSV author left them out of this
/// scenario, and matching them would invite overwriting live values.
/// Detail lookups for matched names run in bounded batches; an individual
/// failure downgrades that mapping's current value to "0" rather than
/// failing the pass.
pub async fn match_variables(
    backend: &dyn ModelBackend,
    data: &ScenarioData,
    scenario: &str,
) -> AppResult<Vec<ParameterMapping>> {
    sf_scenario::check_shape(data)?;
    let scenario_idx = data
        .scenario_index(scenario)
        .ok_or_else(|| AppError::ScenarioNotFound(scenario.to_string()))?;

    let existing = backend.variable_names().await?;
    debug!(count = existing.len(), "received backend variable listing");

    // Resolve names first so only matched targets are fetched.
    let mut resolved: Vec<(usize, f64, Option<String>)> = Vec::new();
    for (row, param) in data.parameters.iter().enumerate() {
        let Some(new_value) = param.values[scenario_idx] else {
            continue;
        };
        let target = resolve_target(&existing, &param.name).map(str::to_string);
        resolved.push((row, new_value, target));
    }

    let targets: Vec<String> = resolved
        .iter()
        .filter_map(|(_, _, target)| target.clone())
        .collect();
    let details: HashMap<String, _> = fetch_details(backend, &targets, DEFAULT_BATCH_SIZE)
        .await
        .into_iter()
        .map(|d| (d.name.clone(), d))
        .collect();

    let mut mappings = Vec::with_capacity(resolved.len());
    for (row, new_value, target) in resolved {
        let param = &data.parameters[row];

        let mapping = match target {
            Some(target_name) => {
                let detail = details.get(&target_name);
                ParameterMapping {
                    source_name: param.name.clone(),
                    target_name: target_name.clone(),
                    value_id: detail.map(|d| d.value_id.clone()).unwrap_or_default(),
                    current_value: detail
                        .map(|d| d.init.clone())
                        .unwrap_or_else(|| "0".to_string()),
                    new_value,
                    matched: true,
                    units: param.units.clone(),
                    description: param.description.clone(),
                }
            }
            None => ParameterMapping {
                source_name: param.name.clone(),
                target_name: String::new(),
                value_id: String::new(),
                current_value: "0".to_string(),
                new_value,
                matched: false,
                units: param.units.clone(),
                description: param.description.clone(),
            },
        };
        mappings.push(mapping);
    }

    Ok(mappings)
}

/// Parse-free entry point for frontends: match one scenario and fold the
/// result into a [`ValidationResult`]. An unknown scenario name comes
/// back as an invalid result, not an error.
pub async fn validate_scenario(
    backend: &dyn ModelBackend,
    data: &ScenarioData,
    scenario: &str,
) -> AppResult<ValidationResult> {
    match match_variables(backend, data, scenario).await {
        Ok(mappings) => Ok(validate_mappings(mappings)),
        Err(AppError::ScenarioNotFound(name)) => Ok(ValidationResult {
            valid: false,
            errors: vec![format!("Scenario \"{name}\" not found")],
            warnings: Vec::new(),
            missing_variables: Vec::new(),
            mappings: Vec::new(),
        }),
        Err(err) => Err(err),
    }
}

/// Apply matched mappings to the backend, one at a time.
///
/// There is no rollback: a failure partway through propagates immediately
/// and earlier writes stay applied. Callers surface the error verbatim.
pub async fn apply_scenario(
    backend: &dyn ModelBackend,
    mappings: &[ParameterMapping],
) -> AppResult<()> {
    for mapping in mappings.iter().filter(|m| m.matched) {
        backend
            .update_variable(
                &mapping.target_name,
                VariableFields {
                    init: Some(format!("{}", mapping.new_value)),
                    units: mapping.units.clone(),
                    tooltip: mapping.description.clone(),
                },
            )
            .await?;
    }
    info!(
        applied = mappings.iter().filter(|m| m.matched).count(),
        "scenario applied"
    );
    Ok(())
}

/// Create canvas variables for unmatched parameters, stacked vertically.
///
/// Creation failures are logged and skipped; one bad name should not
/// abort the rest of the column.
pub async fn create_missing_variables(
    backend: &dyn ModelBackend,
    mappings: &[ParameterMapping],
) -> AppResult<usize> {
    let mut created = 0usize;
    let mut y = CREATE_Y0;

    for mapping in mappings.iter().filter(|m| !m.matched) {
        let var = NewVariable {
            units: mapping.units.clone(),
            tooltip: mapping.description.clone(),
            ..NewVariable::parameter(format!(":{}", mapping.source_name), "0", (CREATE_X, y))
        };
        match backend.create_variable(var).await {
            Ok(()) => created += 1,
            Err(err) => warn!(name = %mapping.source_name, %err, "variable creation skipped"),
        }
        y += CREATE_DY;
    }

    Ok(created)
}

/// Convenience wrapper: parse CSV text into a scenario table.
pub fn parse_scenario(text: &str) -> AppResult<ScenarioData> {
    Ok(parse(text)?)
}
