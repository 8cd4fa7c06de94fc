//! A inicialização falha antes de abrir o socket quando a configuração ou o
//! modelo são inválidos.

use std::path::PathBuf;
use std::process::{Command, Output};

fn run_server(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ner-server"))
        .args(args)
        .env("RUST_LOG", "ner_server=info")
        .output()
        .expect("failed to run ner-server")
}

fn demo_model() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("workspace root")
        .join("classifiers/ner-model.json")
}

#[test]
fn test_non_numeric_port_aborts_startup() {
    let model = demo_model();
    let output = run_server(&["-port", "eighty", "-classifier", model.to_str().unwrap()]);

    assert!(!output.status.success());
    let logs = String::from_utf8_lossy(&output.stdout);
    assert!(logs.contains("invalid -port value"), "{logs}");
    assert!(!logs.contains("Servidor NER iniciado"), "{logs}");
}

#[test]
fn test_missing_classifier_aborts_startup() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    let output = run_server(&["-port", "0", "-classifier", missing.to_str().unwrap()]);

    assert!(!output.status.success());
    let logs = String::from_utf8_lossy(&output.stdout);
    assert!(logs.contains("could not load classifier"), "{logs}");
    assert!(!logs.contains("Servidor NER iniciado"), "{logs}");
}

#[test]
fn test_corrupt_classifier_aborts_startup() {
    let dir = tempfile::tempdir().unwrap();
    let corrupt = dir.path().join("corrupt.json");
    std::fs::write(&corrupt, "{\"entities\": ").unwrap();
    let output = run_server(&["-port", "0", "-classifier", corrupt.to_str().unwrap()]);

    assert!(!output.status.success());
}
