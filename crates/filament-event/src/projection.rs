//! Serialisable result of one processing event

use filament_core::Pattern;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputProjection {
    pub filament_event_id: String,
    /// RFC 3339 timestamp of projection time.
    pub timestamp: String,
    pub query_summary: String,
    pub eep_analyzed: EepSummary,
    pub analysis_method: MethodSummary,
    pub results: Results,
    pub processing_metadata: ProcessingMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EepSummary {
    pub eep_id: String,
    pub eep_name: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodSummary {
    pub sop_used: String,
    pub step_executed: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Results {
    pub signature_detection_summary: DetectionSummary,
    pub detected_signatures: DetectedSignatures,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionSummary {
    pub patterns_found: usize,
    pub overall_confidence: f64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessingMetadata {
    pub processing_time_seconds: f64,
    pub ler_data_accessed: Vec<String>,
    pub stateless_operation: bool,
}

/// Detected patterns keyed by name. Serialises as a JSON object whose keys
/// keep pattern order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetectedSignatures(pub Vec<Pattern>);

impl DetectedSignatures {
    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.0.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.0.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Serialize)]
struct SignatureEntry<'a> {
    #[serde(rename = "type")]
    pattern_type: &'a str,
    confidence: f64,
    evidence: &'a str,
}

impl Serialize for DetectedSignatures {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for pattern in &self.0 {
            map.serialize_entry(
                &pattern.name,
                &SignatureEntry {
                    pattern_type: &pattern.pattern_type,
                    confidence: pattern.confidence,
                    evidence: &pattern.evidence,
                },
            )?;
        }
        map.end()
    }
}
