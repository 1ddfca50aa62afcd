//! Bounded-batch variable fetching.

use futures::future::join_all;
use tracing::warn;

use crate::api::{ModelBackend, VariableDetails};

/// Batch size for parallel detail lookups against the backend.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Fetch details for many variables, `batch_size` lookups in flight at a
/// time. There is no ordering guarantee among requests within a batch and
/// no retry: a failed member is logged and dropped from the result set,
/// so callers get partial results rather than a batch-wide error.
pub async fn fetch_details(
    backend: &dyn ModelBackend,
    names: &[String],
    batch_size: usize,
) -> Vec<VariableDetails> {
    let batch_size = batch_size.max(1);
    let mut rows = Vec::with_capacity(names.len());

    for chunk in names.chunks(batch_size) {
        let results = join_all(chunk.iter().map(|name| backend.variable(name))).await;
        for (name, result) in chunk.iter().zip(results) {
            match result {
                Ok(details) => rows.push(details),
                Err(err) => warn!(%name, %err, "variable lookup failed; dropping from results"),
            }
        }
    }

    rows
}
