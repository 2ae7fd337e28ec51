//! CLI application for customs declaration OCR processing.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, drafts, extract, payload, validate};

/// Customs declaration OCR - Extract shipment data from invoice and packing-list text
#[derive(Parser)]
#[command(name = "customs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract shipment data from a single OCR text or PDF file
    Extract(extract::ExtractArgs),

    /// Extract shipment data from multiple files
    Batch(batch::BatchArgs),

    /// Validate a declaration draft
    Validate(validate::ValidateArgs),

    /// Build the direct-export payload for a declaration draft
    Payload(payload::PayloadArgs),

    /// Manage saved drafts
    Drafts(drafts::DraftsArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Extract(args) => extract::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Validate(args) => validate::run(args).await,
        Commands::Payload(args) => payload::run(args, config_path).await,
        Commands::Drafts(args) => drafts::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
