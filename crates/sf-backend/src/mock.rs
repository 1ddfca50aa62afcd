//! In-memory backend for tests and offline runs.

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use futures::future::BoxFuture;

use crate::api::{ModelBackend, NewVariable, TensorAxes, VariableDetails, VariableFields};
use crate::error::{BackendError, BackendResult};

#[derive(Debug, Default)]
struct State {
    variables: BTreeMap<String, VariableDetails>,
    tensors: BTreeMap<String, TensorAxes>,
    updates: Vec<(String, VariableFields)>,
    created: Vec<NewVariable>,
    imported: Vec<String>,
    failing_lookups: HashSet<String>,
    failing_updates: HashSet<String>,
}

/// A `ModelBackend` holding its whole model in memory.
///
/// Individual calls can be made to fail by name, which is how the
/// partial-failure policies of the pipeline are exercised.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    state: Mutex<State>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a variable with the given name and init string.
    pub fn insert_variable(&self, name: &str, init: &str, value: f64) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.variables.insert(
            name.to_string(),
            VariableDetails {
                name: name.to_string(),
                value_id: format!("vid:{name}"),
                value,
                init: init.to_string(),
                units: String::new(),
                description: String::new(),
                kind: "parameter".to_string(),
            },
        );
    }

    /// Register a variable with full details.
    pub fn insert_details(&self, details: VariableDetails) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.variables.insert(details.name.clone(), details);
    }

    /// Register a tensor's axis structure.
    pub fn insert_tensor(&self, name: &str, axes: TensorAxes) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tensors.insert(name.to_string(), axes);
    }

    /// Make subsequent detail lookups for `name` fail.
    pub fn fail_lookup(&self, name: &str) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.failing_lookups.insert(name.to_string());
    }

    /// Make subsequent updates of `name` fail.
    pub fn fail_update(&self, name: &str) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.failing_updates.insert(name.to_string());
    }

    /// Updates applied so far, in call order.
    pub fn updates(&self) -> Vec<(String, VariableFields)> {
        self.state.lock().expect("mock state poisoned").updates.clone()
    }

    /// Variables created so far, in call order.
    pub fn created(&self) -> Vec<NewVariable> {
        self.state.lock().expect("mock state poisoned").created.clone()
    }

    /// Wiring documents imported so far.
    pub fn imported(&self) -> Vec<String> {
        self.state.lock().expect("mock state poisoned").imported.clone()
    }

    /// Current init string of a variable, if present.
    pub fn init_of(&self, name: &str) -> Option<String> {
        let state = self.state.lock().expect("mock state poisoned");
        state.variables.get(name).map(|v| v.init.clone())
    }
}

impl ModelBackend for InMemoryBackend {
    fn variable_names(&self) -> BoxFuture<'_, BackendResult<Vec<String>>> {
        Box::pin(async move {
            let state = self.state.lock().expect("mock state poisoned");
            Ok(state.variables.keys().cloned().collect())
        })
    }

    fn variable<'a>(&'a self, name: &'a str) -> BoxFuture<'a, BackendResult<VariableDetails>> {
        Box::pin(async move {
            let state = self.state.lock().expect("mock state poisoned");
            if state.failing_lookups.contains(name) {
                return Err(BackendError::Lookup {
                    name: name.to_string(),
                    message: "injected lookup failure".to_string(),
                });
            }
            state
                .variables
                .get(name)
                .cloned()
                .ok_or_else(|| BackendError::NotFound(name.to_string()))
        })
    }

    fn update_variable<'a>(
        &'a self,
        name: &'a str,
        fields: VariableFields,
    ) -> BoxFuture<'a, BackendResult<()>> {
        Box::pin(async move {
            let mut state = self.state.lock().expect("mock state poisoned");
            if state.failing_updates.contains(name) {
                return Err(BackendError::Apply {
                    name: name.to_string(),
                    message: "injected apply failure".to_string(),
                });
            }
            let Some(var) = state.variables.get_mut(name) else {
                return Err(BackendError::NotFound(name.to_string()));
            };
            if let Some(init) = &fields.init {
                var.init = init.clone();
            }
            if let Some(units) = &fields.units {
                var.units = units.clone();
            }
            if let Some(tooltip) = &fields.tooltip {
                var.description = tooltip.clone();
            }
            state.updates.push((name.to_string(), fields));
            Ok(())
        })
    }

    fn create_variable(&self, var: NewVariable) -> BoxFuture<'_, BackendResult<()>> {
        Box::pin(async move {
            let mut state = self.state.lock().expect("mock state poisoned");
            state.variables.insert(
                var.name.clone(),
                VariableDetails {
                    name: var.name.clone(),
                    value_id: format!("vid:{}", var.name),
                    value: 0.0,
                    init: var.init.clone(),
                    units: var.units.clone().unwrap_or_default(),
                    description: var.tooltip.clone().unwrap_or_default(),
                    kind: var.kind.as_str().to_string(),
                },
            );
            state.created.push(var);
            Ok(())
        })
    }

    fn tensor_axes<'a>(&'a self, name: &'a str) -> BoxFuture<'a, BackendResult<TensorAxes>> {
        Box::pin(async move {
            let state = self.state.lock().expect("mock state poisoned");
            state
                .tensors
                .get(name)
                .cloned()
                .ok_or_else(|| BackendError::NotFound(name.to_string()))
        })
    }

    fn import_wiring<'a>(&'a self, document: &'a str) -> BoxFuture<'a, BackendResult<()>> {
        Box::pin(async move {
            let mut state = self.state.lock().expect("mock state poisoned");
            state.imported.push(document.to_string());
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::fetch_details;

    #[tokio::test]
    async fn lookup_failures_yield_partial_results() {
        let backend = InMemoryBackend::new();
        backend.insert_variable(":a", "1", 1.0);
        backend.insert_variable(":b", "2", 2.0);
        backend.insert_variable(":c", "3", 3.0);
        backend.fail_lookup(":b");

        let names: Vec<String> = vec![":a".into(), ":b".into(), ":c".into()];
        let rows = fetch_details(&backend, &names, 2).await;

        let got: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(got, vec![":a", ":c"]);
    }

    #[tokio::test]
    async fn update_writes_only_given_fields() {
        let backend = InMemoryBackend::new();
        backend.insert_variable(":a", "1", 1.0);

        backend
            .update_variable(
                ":a",
                VariableFields {
                    init: Some("7".into()),
                    units: None,
                    tooltip: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(backend.init_of(":a").as_deref(), Some("7"));
        assert_eq!(backend.updates().len(), 1);
    }

    #[tokio::test]
    async fn batch_size_floor_is_one() {
        let backend = InMemoryBackend::new();
        backend.insert_variable(":a", "1", 1.0);
        let rows = fetch_details(&backend, &[":a".to_string()], 0).await;
        assert_eq!(rows.len(), 1);
    }
}
