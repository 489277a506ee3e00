//! Test utilities for the LER store

use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const DISTRIBUTED_INTELLIGENCE: &str = "EEP_DISTRIBUTED_INTELLIGENCE";
pub const SWARM_COORDINATION: &str = "EEP_SWARM_COORDINATION";
pub const PARTIAL_EEP: &str = "EEP_PARTIAL";
pub const FINGERPRINTING: &str = "SOP_BASIC_EEP_FINGERPRINTING";
pub const TEMPORAL_PROFILING: &str = "SOP_TEMPORAL_PROFILING";
pub const SIGNATURE_SCANNING: &str = "STEP_2_SIGNATURE_SCANNING";

pub fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Create a temporary LER tree with two complete EEPs, one incomplete EEP,
/// two SOPs (one nested) and a few files the loader must skip.
pub fn create_test_ler() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write(
        root,
        "schemas/core_schema.yaml",
        r#"
version: "1.0"
eep_fields: [eep_id, name, universal_function, category]
"#,
    );

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
    description: Units switch state once enough neighbours have
  - name: cascade_propagation
    description: Local changes spread across the network
"#,
    );

    write(
        root,
        "eep_definitions/swarm_coordination.yaml",
        r#"
eep_id: EEP_SWARM_COORDINATION
name: Swarm Coordination
category: collective_computation
universal_function: Coordinated group movement from local interaction rules
"#,
    );

    write(
        root,
        "eep_definitions/partial.yaml",
        r#"
eep_id: EEP_PARTIAL
name: Partial Definition
category: incomplete
"#,
    );

    // Skipped: no id, and malformed YAML
    write(root, "eep_definitions/no_id.yaml", "name: Anonymous\n");
    write(root, "eep_definitions/broken.yaml", "eep_id: [unclosed\n");
    write(root, "eep_definitions/notes.txt", "not yaml at all");

    write(
        root,
        "sops/basic/fingerprinting.yaml",
        r#"
sop_id: SOP_BASIC_EEP_FINGERPRINTING
name: Basic EEP Fingerprinting
target_eeps:
  - EEP_DISTRIBUTED_INTELLIGENCE
  - EEP_SWARM_COORDINATION
steps:
  - step_id: STEP_1_DATA_PREPARATION
    step_name: Data Preparation
    purpose: Normalise the raw interaction data
  - step_id: STEP_2_SIGNATURE_SCANNING
    step_name: Signature Scanning
    purpose: Scan the interaction network for structural signatures
    stub_implementation: "scan_signatures(network)"
"#,
    );

    write(
        root,
        "sops/temporal_profiling.yaml",
        r#"
sop_id: SOP_TEMPORAL_PROFILING
name: Temporal Profiling
target_eeps: [EEP_SWARM_COORDINATION]
steps:
  - step_id: STEP_1_TIMING
    step_name: Timing Analysis
    purpose: Measure response latencies
"#,
    );

    write(
        root,
        "signature_patterns/threshold_dynamics.yaml",
        r#"
pattern: threshold_function
indicators: [sigmoid_response, critical_mass]
"#,
    );

    temp_dir
}

/// An LER root containing only the top-level directory.
pub fn create_empty_ler() -> TempDir {
    TempDir::new().unwrap()
}
