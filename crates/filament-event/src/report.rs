//! Text and JSON rendering of an [`OutputProjection`]

use crate::projection::OutputProjection;

pub const RULE_WIDTH: usize = 60;
pub const NO_OUTPUT: &str = "No output available - analysis not completed";

/// Banner report for terminals.
pub fn format_text(projection: &OutputProjection) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let eep = &projection.eep_analyzed;
    let method = &projection.analysis_method;
    let summary = &projection.results.signature_detection_summary;
    let metadata = &projection.processing_metadata;

    let mut lines = vec![
        rule.clone(),
        "FILAMENT EVENT RESULT".to_string(),
        rule.clone(),
        format!("Event ID: {}", projection.filament_event_id),
        format!("Query: {}", projection.query_summary),
        String::new(),
        format!("EEP Analyzed: {} ({})", eep.eep_name, eep.eep_id),
        format!("Category: {}", eep.category),
        String::new(),
        format!("Analysis Method: {}", method.sop_used),
        format!("Step Executed: {}", method.step_executed),
        String::new(),
        "SIGNATURE DETECTION RESULTS:".to_string(),
        format!("- Patterns Found: {}", summary.patterns_found),
        format!("- Overall Confidence: {}", summary.overall_confidence),
        format!("- Status: {}", summary.status),
        String::new(),
    ];

    let signatures = &projection.results.detected_signatures;
    if !signatures.is_empty() {
        lines.push("DETECTED PATTERNS:".to_string());
        for pattern in signatures.iter() {
            lines.push(format!("  • {}", pattern.name));
            lines.push(format!("    Type: {}", pattern.pattern_type));
            lines.push(format!("    Confidence: {}", pattern.confidence));
            lines.push(format!("    Evidence: {}", pattern.evidence));
            lines.push(String::new());
        }
    }

    lines.push(format!(
        "Processing Time: {:.2} seconds",
        metadata.processing_time_seconds
    ));
    lines.push(format!(
        "Stateless Operation: {}",
        metadata.stateless_operation
    ));
    lines.push(rule);

    lines.join("\n")
}

/// Pretty-printed JSON.
pub fn format_json(projection: &OutputProjection) -> serde_json::Result<String> {
    serde_json::to_string_pretty(projection)
}
