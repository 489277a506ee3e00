//! CLI command implementations

use anyhow::{Context, bail};
use clap::ValueEnum;
use filament_core::{AnalysisBundle, Graph, PatternGroup, SignatureClassifier, project};
use filament_event::{FilamentConfig, FilamentEvent, report};
use filament_ler::LerStore;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn open_store(config: &FilamentConfig) -> anyhow::Result<LerStore> {
    LerStore::open(&config.ler_root)
        .with_context(|| format!("cannot open LER at {}", config.ler_root.display()))
}

fn load_graph(path: Option<&Path>) -> anyhow::Result<Option<Graph>> {
    path.map(|path| {
        Graph::load(path).with_context(|| format!("cannot load graph {}", path.display()))
    })
    .transpose()
}

/// One full event: query, guidance, analysis, projection, cleanup.
pub fn run(
    config: &FilamentConfig,
    format: OutputFormat,
    graph_path: Option<&Path>,
) -> anyhow::Result<()> {
    let text = format == OutputFormat::Text;
    let progress = |line: String| {
        if text {
            println!("{}", line);
        }
    };

    progress(format!("Starting Filament v{}", env!("CARGO_PKG_VERSION")));
    progress("=".repeat(50));

    progress("\n1. Loading LER...".to_string());
    let store = open_store(config)?;
    let info = store.system_info();
    progress(format!(
        "   ✓ LER loaded: {} EEPs, {} SOPs",
        info.total_eeps, info.total_sops
    ));
    let graph = load_graph(graph_path)?;

    progress("\n2. Creating Filament event...".to_string());
    let mut event = FilamentEvent::new(&store, SignatureClassifier::new(config.classifier.clone()));
    progress(format!("   ✓ Event created: {}", event.event_id()));

    progress("\n3. Processing query...".to_string());
    let query = event.process_query(config.query.to_query());
    progress(format!("   ✓ Query: {}", query.query_text));

    progress("\n4. Retrieving LER guidance...".to_string());
    let guidance = event.retrieve_guidance()?;
    progress(format!(
        "   ✓ Retrieved EEP: {}",
        guidance.eep_definition.name().unwrap_or("Unknown")
    ));
    progress(format!(
        "   ✓ Retrieved SOP: {}",
        guidance.sop_definition.name().unwrap_or("Unknown")
    ));
    progress(format!("   ✓ Retrieved Step: {}", guidance.step_name()));

    progress("\n5. Executing analysis...".to_string());
    let outcome = event.execute_analysis(graph.as_ref())?;
    progress(format!("   ✓ Analysis status: {}", outcome.status.as_str()));
    progress(format!("   ✓ Patterns detected: {}", outcome.patterns_found()));
    progress(format!(
        "   ✓ Overall confidence: {:.2}",
        outcome.overall_confidence()
    ));

    progress("\n6. Generating output projection...".to_string());
    let projection = event.generate_output_projection()?;
    progress(format!(
        "   ✓ Output generated: {}",
        projection.filament_event_id
    ));

    match format {
        OutputFormat::Text => {
            println!("\n7. Final results:");
            println!("{}", event.format_human_readable());
        }
        OutputFormat::Json => {
            println!("{}", report::format_json(projection)?);
        }
    }

    progress("\n8. Cleaning up...".to_string());
    event.cleanup();
    progress("   ✓ Filament event completed and cleaned up".to_string());
    progress(format!("\n{}", "=".repeat(50)));

    Ok(())
}

/// Classifier only, over a graph file or the synthetic graph.
pub fn analyze(
    config: &FilamentConfig,
    graph_path: Option<&Path>,
    seed: Option<u64>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut classifier_config = config.classifier.clone();
    if seed.is_some() {
        classifier_config.seed = seed;
    }

    let graph = load_graph(graph_path)?;
    let bundle = SignatureClassifier::new(classifier_config).classify(graph.as_ref())?;
    let patterns = project(&bundle);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "analysis": bundle,
                "patterns": patterns,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => print_analysis(&bundle, &patterns),
    }

    Ok(())
}

fn print_analysis(bundle: &AnalysisBundle, patterns: &PatternGroup) {
    let motifs = &bundle.network_motifs;
    let connectivity = &bundle.connectivity_patterns;
    let flow = &bundle.information_flow;

    println!("Category: {}", motifs.category);
    println!("Confidence: {:.3}", motifs.confidence);
    println!(
        "Nodes: {}, Edges: {}, Density: {}",
        motifs.nodes, motifs.edges, motifs.density
    );
    println!("Average clustering: {}", motifs.avg_clustering);
    println!("Average path length: {}", motifs.avg_path_length);
    println!("Small-world coefficient: {}", motifs.small_world_coefficient);
    println!("Clustering: {}", bundle.clustering_analysis.interpretation);
    println!(
        "Connectivity: {} ({} hubs above degree {})",
        connectivity.connectivity_pattern, connectivity.hub_nodes, connectivity.hub_threshold
    );
    println!(
        "Information flow: {} bottlenecks, {} well connected, efficiency {}",
        flow.information_bottlenecks, flow.well_connected_nodes, flow.flow_efficiency
    );

    println!();
    println!(
        "Patterns (overall confidence {:.2}):",
        patterns.overall_confidence
    );
    for pattern in &patterns.patterns {
        println!(
            "  • {} [{}] {:.2}: {}",
            pattern.name, pattern.pattern_type, pattern.confidence, pattern.evidence
        );
    }
}

pub fn info(config: &FilamentConfig) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let info = store.system_info();

    println!("=== LER System Info ===");
    println!("ler_root: {}", info.ler_root.display());
    println!("total_eeps: {}", info.total_eeps);
    println!("total_sops: {}", info.total_sops);
    println!("total_patterns: {}", info.total_patterns);
    println!("schema_loaded: {}", info.schema_loaded);

    println!("\n=== Available EEPs ===");
    for eep_id in store.list_eeps() {
        let name = store.get_eep(eep_id).and_then(|e| e.name()).unwrap_or("Unknown");
        println!("- {}: {}", eep_id, name);
    }

    println!("\n=== Available SOPs ===");
    for sop_id in store.list_sops() {
        let name = store.get_sop(sop_id).and_then(|s| s.name()).unwrap_or("Unknown");
        let targets = store
            .get_sop(sop_id)
            .map(|s| s.str_list("target_eeps").join(", "))
            .unwrap_or_default();
        if targets.is_empty() {
            println!("- {}: {}", sop_id, name);
        } else {
            println!("- {}: {} (targets: {})", sop_id, name, targets);
        }
    }

    println!("\n=== Signature Patterns ===");
    for name in store.list_signature_patterns() {
        let kind = store
            .signature_pattern(name)
            .and_then(|p| p.get("pattern"))
            .and_then(|p| p.as_str());
        match kind {
            Some(kind) => println!("- {}: {}", name, kind),
            None => println!("- {}", name),
        }
    }

    Ok(())
}

pub fn validate(config: &FilamentConfig, eep_id: &str) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let validation = store.validate_eep(eep_id);

    if !validation.is_valid() {
        bail!("{}: {}", eep_id, validation);
    }

    println!("✓ {} is valid", eep_id);
    let sops = store.find_sops_for_eep(eep_id);
    if !sops.is_empty() {
        println!("Analysed by:");
        for sop in sops {
            println!(
                "  - {}",
                sop.str("sop_id").or(sop.name()).unwrap_or("Unknown")
            );
        }
    }
    Ok(())
}
