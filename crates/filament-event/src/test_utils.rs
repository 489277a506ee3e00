//! Test utilities for processing events

use filament_core::{ClassifierConfig, GeneratorParams, SignatureClassifier};
use filament_ler::{DocumentLookup, Record};
use std::collections::HashMap;

pub const TEST_SEED: u64 = 1234;

pub fn seeded_classifier() -> SignatureClassifier {
    SignatureClassifier::new(ClassifierConfig {
        generator: GeneratorParams::default(),
        seed: Some(TEST_SEED),
    })
}

fn record(yaml: &str) -> Record {
    Record::from_value(serde_yaml::from_str(yaml).unwrap()).unwrap()
}

/// In-memory lookup with the same shape as an LER store.
#[derive(Debug, Default)]
pub struct MemoryLookup {
    records: HashMap<String, Record>,
    steps: HashMap<(String, String), Record>,
    related: HashMap<String, Vec<Record>>,
}

impl MemoryLookup {
    pub fn insert(&mut self, id: &str, yaml: &str) -> &mut Self {
        self.records.insert(id.to_string(), record(yaml));
        self
    }

    pub fn insert_step(&mut self, parent: &str, child: &str, yaml: &str) -> &mut Self {
        self.steps
            .insert((parent.to_string(), child.to_string()), record(yaml));
        self
    }

    pub fn insert_related(&mut self, id: &str, yaml: &str) -> &mut Self {
        self.related
            .entry(id.to_string())
            .or_default()
            .push(record(yaml));
        self
    }
}

impl DocumentLookup for MemoryLookup {
    fn get_record(&self, id: &str) -> Option<&Record> {
        self.records.get(id)
    }

    fn get_sub_record(&self, parent_id: &str, child_id: &str) -> Option<Record> {
        self.steps
            .get(&(parent_id.to_string(), child_id.to_string()))
            .cloned()
    }

    fn get_related_records(&self, id: &str) -> Vec<Record> {
        self.related.get(id).cloned().unwrap_or_default()
    }
}

/// The default query's EEP, SOP and signature-scanning step, plus a second
/// step that no analysis applies to.
pub fn default_lookup() -> MemoryLookup {
    let mut lookup = MemoryLookup::default();
    lookup
        .insert(
            "EEP_DISTRIBUTED_INTELLIGENCE",
            r#"
eep_id: EEP_DISTRIBUTED_INTELLIGENCE
name: Distributed Intelligence
category: collective_computation
universal_function: Decentralized information processing
"#,
        )
        .insert(
            "SOP_BASIC_EEP_FINGERPRINTING",
            r#"
sop_id: SOP_BASIC_EEP_FINGERPRINTING
name: Basic EEP Fingerprinting
"#,
        )
        .insert_step(
            "SOP_BASIC_EEP_FINGERPRINTING",
            "STEP_2_SIGNATURE_SCANNING",
            r#"
step_id: STEP_2_SIGNATURE_SCANNING
step_name: Signature Scanning
"#,
        )
        .insert_step(
            "SOP_BASIC_EEP_FINGERPRINTING",
            "STEP_1_DATA_PREPARATION",
            r#"
step_id: STEP_1_DATA_PREPARATION
step_name: Data Preparation
"#,
        )
        .insert_related(
            "EEP_DISTRIBUTED_INTELLIGENCE",
            "name: threshold_activation\n",
        );
    lookup
}
