//! Export flow: backend listing → batched details → CSV file.

use sf_app::{export_variables, write_variables_csv};
use sf_backend::{InMemoryBackend, VariableDetails};

fn backend_with_model() -> InMemoryBackend {
    let backend = InMemoryBackend::new();
    backend.insert_details(VariableDetails {
        name: ":growth".into(),
        value_id: "vid:growth".into(),
        value: 0.02,
        init: "0.02".into(),
        units: "1/yr".into(),
        description: "Growth, per capita".into(),
        kind: "parameter".into(),
    });
    backend.insert_variable(":capacity", "1000", 1000.0);
    backend.insert_variable("constant:one", "1", 1.0);
    backend
}

#[tokio::test]
async fn internal_constants_are_filtered_out() {
    let backend = backend_with_model();
    let rows = export_variables(&backend).await.unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec![":capacity", ":growth"]);
}

#[tokio::test]
async fn lookup_failures_shrink_the_export() {
    let backend = backend_with_model();
    backend.fail_lookup(":capacity");

    let rows = export_variables(&backend).await.unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec![":growth"]);
}

#[tokio::test]
async fn csv_file_has_header_and_quoting() {
    let backend = backend_with_model();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("variables.csv");

    let count = write_variables_csv(&backend, &path).await.unwrap();
    assert_eq!(count, 2);

    let text = std::fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("name,units,description,type,value,init")
    );
    // The description with a comma is quoted.
    assert!(text.contains("\"Growth, per capita\""));
}
