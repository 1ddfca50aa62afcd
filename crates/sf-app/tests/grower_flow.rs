//! Grower flow: tensor materialization and selector wiring import.

use sf_app::{grow_infrastructure, parse_scenario, wire_tensor};
use sf_backend::{InMemoryBackend, TensorAxes};
use sf_scenario::ParamKind;

const TABLE: &str = "\
name,type,init,low,high
alpha,parameter,0.5,1,2
beta,flow,0,3,4
fixed,constant,42,,
";

#[tokio::test]
async fn grow_creates_tensor_selector_and_parameters() {
    let backend = InMemoryBackend::new();
    let data = parse_scenario(TABLE).unwrap();

    let summary = grow_infrastructure(&backend, &data).await.unwrap();
    assert_eq!(summary.dependent, 2);
    assert_eq!(summary.static_params, 1);

    let created = backend.created();
    let names: Vec<&str> = created.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            ":ScenarioTensor",
            ":SelectedScenario",
            ":idx_alpha",
            ":alpha",
            ":idx_beta",
            ":beta",
            ":fixed",
        ]
    );

    // The tensor's init is the flattened matrix, parameter-major.
    let tensor = &created[0];
    assert_eq!(tensor.init, "[1.0,2.0,3.0,4.0]");
    assert_eq!(
        tensor.tooltip.as_deref(),
        Some("Scenario matrix: 2 params × 2 scenarios")
    );

    // Index constants count up from 0; kinds come from the CSV.
    let idx_beta = created.iter().find(|v| v.name == ":idx_beta").unwrap();
    assert_eq!(idx_beta.kind, ParamKind::Constant);
    assert_eq!(idx_beta.init, "1");

    let beta = created.iter().find(|v| v.name == ":beta").unwrap();
    assert_eq!(beta.kind, ParamKind::Flow);

    // Static parameters keep their literal init, no idx constant.
    let fixed = created.iter().find(|v| v.name == ":fixed").unwrap();
    assert_eq!(fixed.init, "42");
    assert!(!names.contains(&":idx_fixed"));
}

#[tokio::test]
async fn grow_without_dependent_parameters_skips_tensor() {
    let backend = InMemoryBackend::new();
    let data = parse_scenario("name,s1\nonly_static,\n").unwrap();

    let summary = grow_infrastructure(&backend, &data).await.unwrap();
    assert_eq!(summary.dependent, 0);
    assert_eq!(summary.static_params, 1);

    let names: Vec<String> = backend.created().iter().map(|v| v.name.clone()).collect();
    assert_eq!(names, vec![":only_static"]);
}

#[tokio::test]
async fn wire_tensor_uses_backend_axes_and_imports() {
    let backend = InMemoryBackend::new();
    backend.insert_tensor(
        ":ScenarioTensor",
        TensorAxes {
            param_axis: "param".into(),
            scenario_axis: "attr".into(),
            param_labels: vec!["alpha".into(), "beta".into()],
            // 3 metadata rows ahead of 2 scenario rows.
            row_labels: vec![
                "units".into(),
                "type".into(),
                "init".into(),
                "low".into(),
                "high".into(),
            ],
        },
    );

    let params = vec!["alpha".to_string(), "beta".to_string()];
    let scenarios = vec!["low".to_string(), "high".to_string()];
    wire_tensor(&backend, ":ScenarioTensor", &params, &scenarios)
        .await
        .unwrap();

    let imported = backend.imported();
    assert_eq!(imported.len(), 1);
    let doc = &imported[0];

    assert!(doc.contains("<name>:ScenarioTensor</name>"));
    assert!(doc.contains("<axis>param</axis>"));
    assert!(doc.contains("<axis>attr</axis>"));
    // Offset skips the 3 metadata rows.
    assert!(doc.contains("<init>3</init>"));
    assert!(doc.contains("<name>:idx_alpha</name>"));
    assert!(doc.contains("<name>:beta</name>"));
}

#[tokio::test]
async fn wire_tensor_unknown_name_fails() {
    let backend = InMemoryBackend::new();
    let err = wire_tensor(&backend, ":Missing", &[], &[]).await.unwrap_err();
    assert!(format!("{err}").contains(":Missing"));
}
