//! Filament CLI entry point

use clap::{Parser, Subcommand};
use filament_event::FilamentConfig;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::OutputFormat;

#[derive(Parser)]
#[command(name = "filament")]
#[command(about = "Stateless EEP processing with graph signature classification", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./filament.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// LER root directory (overrides the config file and FILAMENT_LER_ROOT)
    #[arg(long, global = true)]
    ler_root: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one full processing event against the LER
    Run {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// JSON graph file to analyse instead of a synthetic graph
        #[arg(short, long)]
        graph: Option<PathBuf>,
    },
    /// Classify a graph without consulting the LER
    Analyze {
        /// JSON graph file to analyse instead of a synthetic graph
        #[arg(short, long)]
        graph: Option<PathBuf>,

        /// Seed for the synthetic and reference graphs
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show LER system information
    Info,
    /// Check an EEP definition for required fields
    Validate {
        /// EEP identifier, e.g. EEP_DISTRIBUTED_INTELLIGENCE
        eep_id: String,
    },
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; the target prefix covers every filament_* crate.
    // Logs go to stderr so JSON on stdout stays parseable.
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!("filament={}", log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = FilamentConfig::load(cli.config.as_deref())?;
    if let Some(root) = cli.ler_root {
        config.ler_root = root;
    }

    tracing::debug!("Filament v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("LER root: {}", config.ler_root.display());

    match cli.command {
        Commands::Run { format, graph } => commands::run(&config, format, graph.as_deref()),
        Commands::Analyze {
            graph,
            seed,
            format,
        } => commands::analyze(&config, graph.as_deref(), seed, format),
        Commands::Info => commands::info(&config),
        Commands::Validate { eep_id } => commands::validate(&config, &eep_id),
        Commands::Version => {
            println!("Filament v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
