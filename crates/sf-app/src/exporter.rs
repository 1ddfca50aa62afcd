//! Variable export: model listing → batched details → CSV.

use std::path::Path;

use tracing::debug;

use sf_backend::{fetch_details, ModelBackend, DEFAULT_BATCH_SIZE};
use sf_scenario::{render_csv, VariableRow};

use crate::error::{AppError, AppResult};

/// Internal bookkeeping entries the backend exposes but users never
/// asked for.
fn is_internal(name: &str) -> bool {
    name.starts_with("constant:")
}

/// Fetch all user-visible variables from the backend.
///
/// Lookups run in bounded batches; variables whose lookup fails are
/// simply absent from the export (the user sees a shorter table, not an
/// error).
pub async fn export_variables(backend: &dyn ModelBackend) -> AppResult<Vec<VariableRow>> {
    let names = backend.variable_names().await?;
    let user_names: Vec<String> = names.into_iter().filter(|n| !is_internal(n)).collect();
    debug!(count = user_names.len(), "exporting variables");

    let details = fetch_details(backend, &user_names, DEFAULT_BATCH_SIZE).await;
    Ok(details
        .into_iter()
        .map(|d| VariableRow {
            name: d.name,
            units: d.units,
            description: d.description,
            kind: d.kind,
            value: d.value,
            init: d.init,
        })
        .collect())
}

/// Export all user-visible variables to a CSV file.
pub async fn write_variables_csv(backend: &dyn ModelBackend, path: &Path) -> AppResult<usize> {
    let rows = export_variables(backend).await?;
    let csv = render_csv(&rows)?;
    std::fs::write(path, csv).map_err(|e| AppError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(rows.len())
}
