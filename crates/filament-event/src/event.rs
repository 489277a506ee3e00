//! One stateless processing cycle:
//! query → guidance retrieval → analysis → output projection → cleanup.
//!
//! Each stage requires the previous one; calling a stage early fails with
//! [`EventError::OutOfOrder`]. Nothing survives [`FilamentEvent::cleanup`]
//! except the projection.

use crate::error::{EventError, RecordKind, Result};
use crate::projection::{
    DetectedSignatures, DetectionSummary, EepSummary, MethodSummary, OutputProjection,
    ProcessingMetadata, Results,
};
use crate::query::Query;
use crate::report;
use chrono::{DateTime, Local};
use filament_core::{AnalysisBundle, Graph, PatternGroup, SignatureClassifier, model, project};
use filament_ler::{DocumentLookup, Record};
use serde::Serialize;

const UNKNOWN: &str = "Unknown";

/// Documents fetched for one query.
#[derive(Debug, Clone)]
pub struct Guidance {
    pub eep_definition: Record,
    pub sop_definition: Record,
    pub step_details: Record,
    pub signature_patterns: Vec<Record>,
}

impl Guidance {
    /// Names of the guidance parts, in retrieval order.
    pub const KEYS: [&'static str; 4] = [
        "eep_definition",
        "sop_definition",
        "step_details",
        "signature_patterns",
    ];

    pub fn step_name(&self) -> &str {
        self.step_details.str("step_name").unwrap_or(UNKNOWN)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    GraphSignatureAnalysisComplete,
    NoApplicableAnalysis,
}

impl AnalysisStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisStatus::GraphSignatureAnalysisComplete => "graph_signature_analysis_complete",
            AnalysisStatus::NoApplicableAnalysis => "no_applicable_analysis",
        }
    }
}

/// What the analysis stage produced.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub status: AnalysisStatus,
    pub patterns: PatternGroup,
    /// Full classifier output, when the classifier ran.
    pub bundle: Option<AnalysisBundle>,
}

impl AnalysisOutcome {
    pub fn patterns_found(&self) -> usize {
        self.patterns.len()
    }

    pub fn overall_confidence(&self) -> f64 {
        model::round_to(self.patterns.overall_confidence, 2)
    }
}

/// A single processing event over a document lookup.
pub struct FilamentEvent<'a, L: DocumentLookup + ?Sized> {
    lookup: &'a L,
    classifier: SignatureClassifier,
    event_id: String,
    started: DateTime<Local>,
    query: Option<Query>,
    guidance: Option<Guidance>,
    analysis: Option<AnalysisOutcome>,
    projection: Option<OutputProjection>,
}

impl<'a, L: DocumentLookup + ?Sized> FilamentEvent<'a, L> {
    pub fn new(lookup: &'a L, classifier: SignatureClassifier) -> Self {
        let started = Local::now();
        let event_id = format!("filament_event_{}", started.format("%Y%m%d_%H%M%S"));
        tracing::info!("Filament event {} initialized", event_id);

        FilamentEvent {
            lookup,
            classifier,
            event_id,
            started,
            query: None,
            guidance: None,
            analysis: None,
            projection: None,
        }
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    pub fn guidance(&self) -> Option<&Guidance> {
        self.guidance.as_ref()
    }

    pub fn analysis(&self) -> Option<&AnalysisOutcome> {
        self.analysis.as_ref()
    }

    pub fn projection(&self) -> Option<&OutputProjection> {
        self.projection.as_ref()
    }

    /// Record the query this event answers.
    pub fn process_query(&mut self, query: Query) -> &Query {
        tracing::info!("Processing query: {}", query.query_text);
        self.query.insert(query)
    }

    /// Fetch the EEP, SOP and step named by the query, plus the EEP's
    /// signature patterns (which may be empty).
    pub fn retrieve_guidance(&mut self) -> Result<&Guidance> {
        let query = self.query.as_ref().ok_or(EventError::OutOfOrder(
            "must process a query before retrieving guidance",
        ))?;

        let eep_definition = self
            .lookup
            .get_record(&query.target_eep)
            .cloned()
            .ok_or_else(|| missing(RecordKind::Eep, &query.target_eep))?;
        tracing::info!(
            "Retrieved EEP definition: {}",
            eep_definition.name().unwrap_or(UNKNOWN)
        );

        let sop_definition = self
            .lookup
            .get_record(&query.analysis_sop)
            .cloned()
            .ok_or_else(|| missing(RecordKind::Sop, &query.analysis_sop))?;
        tracing::info!(
            "Retrieved SOP definition: {}",
            sop_definition.name().unwrap_or(UNKNOWN)
        );

        let step_details = self
            .lookup
            .get_sub_record(&query.analysis_sop, &query.specific_step)
            .ok_or_else(|| {
                missing(
                    RecordKind::SopStep,
                    &format!("{} in {}", query.specific_step, query.analysis_sop),
                )
            })?;

        let signature_patterns = self.lookup.get_related_records(&query.target_eep);
        tracing::info!("Retrieved {} signature patterns", signature_patterns.len());

        let guidance = Guidance {
            eep_definition,
            sop_definition,
            step_details,
            signature_patterns,
        };
        tracing::info!("Retrieved SOP step: {}", guidance.step_name());
        Ok(self.guidance.insert(guidance))
    }

    /// Run the analysis the SOP step calls for. Steps whose name mentions
    /// "signature" run the graph classifier over `graph`, or over a synthetic
    /// small-world graph when `graph` is `None`.
    pub fn execute_analysis(&mut self, graph: Option<&Graph>) -> Result<&AnalysisOutcome> {
        let guidance = self.guidance.as_ref().ok_or(EventError::OutOfOrder(
            "must retrieve guidance before executing analysis",
        ))?;

        let step_name = guidance.step_name();
        tracing::info!("Executing analysis for step: {}", step_name);

        let outcome = if step_name.to_lowercase().contains("signature") {
            let bundle = self.classifier.classify(graph)?;
            let patterns = project(&bundle);
            tracing::info!(
                "Graph signature analysis complete. Detected {} patterns",
                patterns.len()
            );
            AnalysisOutcome {
                status: AnalysisStatus::GraphSignatureAnalysisComplete,
                patterns,
                bundle: Some(bundle),
            }
        } else {
            tracing::info!("No analysis applies to step {}", step_name);
            AnalysisOutcome {
                status: AnalysisStatus::NoApplicableAnalysis,
                patterns: PatternGroup::new(Vec::new()),
                bundle: None,
            }
        };

        Ok(self.analysis.insert(outcome))
    }

    /// Assemble the projection from the query, guidance and analysis.
    pub fn generate_output_projection(&mut self) -> Result<&OutputProjection> {
        let (Some(query), Some(guidance), Some(analysis)) =
            (&self.query, &self.guidance, &self.analysis)
        else {
            return Err(EventError::OutOfOrder(
                "must complete analysis before generating output",
            ));
        };

        let now = Local::now();
        let elapsed = (now - self.started).num_microseconds().unwrap_or(0) as f64 / 1_000_000.0;
        let eep = &guidance.eep_definition;

        let projection = OutputProjection {
            filament_event_id: self.event_id.clone(),
            timestamp: now.to_rfc3339(),
            query_summary: query.query_text.clone(),
            eep_analyzed: EepSummary {
                eep_id: eep.str("eep_id").unwrap_or(&query.target_eep).to_string(),
                eep_name: eep.name().unwrap_or(UNKNOWN).to_string(),
                category: eep.str("category").unwrap_or(UNKNOWN).to_string(),
            },
            analysis_method: MethodSummary {
                sop_used: guidance.sop_definition.name().unwrap_or(UNKNOWN).to_string(),
                step_executed: guidance.step_name().to_string(),
            },
            results: Results {
                signature_detection_summary: DetectionSummary {
                    patterns_found: analysis.patterns_found(),
                    overall_confidence: analysis.overall_confidence(),
                    status: analysis.status.as_str().to_string(),
                },
                detected_signatures: DetectedSignatures(analysis.patterns.patterns.clone()),
            },
            processing_metadata: ProcessingMetadata {
                processing_time_seconds: elapsed,
                ler_data_accessed: Guidance::KEYS.iter().map(|k| k.to_string()).collect(),
                stateless_operation: true,
            },
        };

        tracing::info!("Output projection generated successfully");
        Ok(self.projection.insert(projection))
    }

    /// Banner report of the projection, or a placeholder before one exists.
    pub fn format_human_readable(&self) -> String {
        match &self.projection {
            Some(projection) => report::format_text(projection),
            None => report::NO_OUTPUT.to_string(),
        }
    }

    /// Drop the query, guidance and analysis. The projection is kept.
    pub fn cleanup(&mut self) {
        tracing::info!("Cleaning up Filament event {}", self.event_id);
        self.query = None;
        self.guidance = None;
        self.analysis = None;
        tracing::info!("Filament event {} completed and cleaned up", self.event_id);
    }

    pub fn into_projection(self) -> Option<OutputProjection> {
        self.projection
    }
}

impl<L: DocumentLookup + ?Sized> std::fmt::Debug for FilamentEvent<'_, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilamentEvent")
            .field("event_id", &self.event_id)
            .field("query", &self.query.is_some())
            .field("guidance", &self.guidance.is_some())
            .field("analysis", &self.analysis.is_some())
            .field("projection", &self.projection.is_some())
            .finish()
    }
}

fn missing(kind: RecordKind, id: &str) -> EventError {
    tracing::warn!("{} not found: {}", kind, id);
    EventError::MissingInput {
        kind,
        id: id.to_string(),
    }
}

/// Run a whole event for `query` and return its projection.
pub fn run_event<L: DocumentLookup + ?Sized>(
    lookup: &L,
    classifier: SignatureClassifier,
    query: Query,
    graph: Option<&Graph>,
) -> Result<OutputProjection> {
    let mut event = FilamentEvent::new(lookup, classifier);
    event.process_query(query);
    event.retrieve_guidance()?;
    event.execute_analysis(graph)?;
    event.generate_output_projection()?;
    event.cleanup();
    event
        .into_projection()
        .ok_or(EventError::OutOfOrder("event finished without a projection"))
}
