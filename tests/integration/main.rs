//! Integration tests for Filament
//!
//! These tests drive the binary and the library crates together over an
//! on-disk LER tree.

use filament_core::{ClassifierConfig, SignatureClassifier};
use filament_event::{EventError, Query, RecordKind, run_event};
use filament_ler::LerStore;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// LER tree holding the documents the default query needs.
fn create_ler() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write(root, "schemas/core_schema.yaml", "version: \"1.0\"\n");
    write(
        root,
        "eep_definitions/distributed_intelligence.yaml",
        r#"
eep_id: EEP_DISTRIBUTED_INTELLIGENCE
name: Distributed Intelligence
category: collective_computation
universal_function: Emergent problem solving through decentralized information processing
signature_patterns:
  - name: threshold_activation
"#,
    );
    write(
        root,
        "eep_definitions/incomplete.yaml",
        "eep_id: EEP_INCOMPLETE\nname: Incomplete\n",
    );
    write(
        root,
        "sops/fingerprinting/basic.yaml",
        r#"
sop_id: SOP_BASIC_EEP_FINGERPRINTING
name: Basic EEP Fingerprinting
target_eeps: [EEP_DISTRIBUTED_INTELLIGENCE]
steps:
  - step_id: STEP_1_DATA_PREPARATION
    step_name: Data Preparation
  - step_id: STEP_2_SIGNATURE_SCANNING
    step_name: Signature Scanning
"#,
    );

    write(
        root,
        "signature_patterns/threshold_dynamics.yaml",
        "pattern: threshold_function\n",
    );

    temp_dir
}

fn filament(ler: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_filament"))
        .arg("--ler-root")
        .arg(ler)
        .args(args)
        .env_remove("FILAMENT_LER_ROOT")
        .env_remove("FILAMENT_SEED")
        .output()
        .expect("Failed to execute filament")
}

fn seeded() -> SignatureClassifier {
    SignatureClassifier::new(ClassifierConfig {
        seed: Some(42),
        ..ClassifierConfig::default()
    })
}

#[test]
fn test_event_over_on_disk_ler() {
    let ler = create_ler();
    let store = LerStore::open(ler.path()).unwrap();

    let projection = run_event(&store, seeded(), Query::default(), None).unwrap();
    let summary = &projection.results.signature_detection_summary;

    assert_eq!(summary.patterns_found, 3);
    assert_eq!(summary.status, "graph_signature_analysis_complete");
    assert!(summary.overall_confidence > 0.0 && summary.overall_confidence < 1.0);
    assert_eq!(projection.eep_analyzed.eep_name, "Distributed Intelligence");
}

#[test]
fn test_same_seed_same_projection_results() {
    let ler = create_ler();
    let store = LerStore::open(ler.path()).unwrap();

    let first = run_event(&store, seeded(), Query::default(), None).unwrap();
    let second = run_event(&store, seeded(), Query::default(), None).unwrap();
    assert_eq!(first.results, second.results);
}

#[test]
fn test_missing_record_fails_event() {
    let ler = create_ler();
    let store = LerStore::open(ler.path()).unwrap();
    let query = Query::characterize(
        "EEP_DISTRIBUTED_INTELLIGENCE",
        "SOP_NOT_IN_LER",
        "STEP_2_SIGNATURE_SCANNING",
    );

    let err = run_event(&store, seeded(), query, None).unwrap_err();
    assert!(matches!(
        err,
        EventError::MissingInput {
            kind: RecordKind::Sop,
            ref id,
        } if id == "SOP_NOT_IN_LER"
    ));
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_filament"))
        .arg("--help")
        .output()
        .expect("Failed to execute filament");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Stateless EEP processing"));
}

#[test]
fn test_cli_run_json() {
    let ler = create_ler();
    let output = filament(ler.path(), &["run", "--format", "json"]);
    assert!(output.status.success());

    let projection: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        projection["eep_analyzed"]["eep_id"],
        "EEP_DISTRIBUTED_INTELLIGENCE"
    );
    assert_eq!(
        projection["results"]["signature_detection_summary"]["patterns_found"],
        3
    );
    assert_eq!(projection["processing_metadata"]["stateless_operation"], true);
}

#[test]
fn test_cli_run_text_with_graph_file() {
    let ler = create_ler();
    write(
        ler.path(),
        "graph.json",
        r#"{"nodes": [1, 2, 3], "edges": [
            {"source": 1, "target": 2}, {"source": 2, "target": 3}, {"source": 1, "target": 3}
        ]}"#,
    );
    let graph = ler.path().join("graph.json");
    let output = filament(ler.path(), &["run", "--graph", graph.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("FILAMENT EVENT RESULT"));
    assert!(stdout.contains("Type: clustered"));
    assert!(stdout.contains("Nodes: 3"));
}

#[test]
fn test_cli_invalid_graph_exits_with_error() {
    let ler = create_ler();
    write(
        ler.path(),
        "bad.json",
        r#"{"nodes": [1], "edges": [{"source": 1, "target": 1}]}"#,
    );
    let graph = ler.path().join("bad.json");
    let output = filament(ler.path(), &["analyze", "--graph", graph.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("self-loop"));
}

#[test]
fn test_cli_analyze_is_seeded() {
    let ler = create_ler();
    let first = filament(ler.path(), &["analyze", "--seed", "5", "--format", "json"]);
    let second = filament(ler.path(), &["analyze", "--seed", "5", "--format", "json"]);

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let value: serde_json::Value = serde_json::from_slice(&first.stdout).unwrap();
    assert_eq!(value["analysis"]["network_motifs"]["nodes"], 50);
    assert_eq!(value["patterns"]["patterns"].as_array().unwrap().len(), 3);
}

#[test]
fn test_cli_info_and_validate() {
    let ler = create_ler();

    let info = filament(ler.path(), &["info"]);
    assert!(info.status.success());
    let stdout = String::from_utf8_lossy(&info.stdout);
    assert!(stdout.contains("total_eeps: 2"));
    assert!(stdout.contains("EEP_DISTRIBUTED_INTELLIGENCE: Distributed Intelligence"));
    assert!(stdout.contains("total_patterns: 1"));
    assert!(stdout.contains("- threshold_dynamics: threshold_function"));

    let valid = filament(ler.path(), &["validate", "EEP_DISTRIBUTED_INTELLIGENCE"]);
    assert!(valid.status.success());

    let invalid = filament(ler.path(), &["validate", "EEP_INCOMPLETE"]);
    assert_eq!(invalid.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&invalid.stderr).contains("universal_function"));
}

#[test]
fn test_cli_missing_ler_root_fails() {
    let ler = create_ler();
    let missing = ler.path().join("nowhere");
    let output = filament(&missing, &["info"]);

    assert_eq!(output.status.code(), Some(1));
}
