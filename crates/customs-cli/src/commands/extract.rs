//! Extract command - shipment data from a single OCR text or PDF file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use customs_core::extraction::{RuleBasedParser, ShipmentParser};
use customs_core::models::document::DocumentDraft;
use customs_core::models::shipment::ShipmentRecord;
use customs_core::store::{DraftStore, StoredDocument};
use customs_core::validation::validate_document;

use super::{load_config, open_store, read_input_text};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (OCR text or text-based PDF)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Save the result as a draft in the store
    #[arg(long)]
    save: bool,

    /// Draft database (overrides config)
    #[arg(long)]
    database: Option<PathBuf>,

    /// Validate the extracted draft
    #[arg(long)]
    validate: bool,

    /// Show extraction warnings
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per line item
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Reading input...");
    pb.set_position(10);
    let text = read_input_text(&args.input)?;

    pb.set_message("Extracting shipment data...");
    pb.set_position(60);
    let parser = RuleBasedParser::from_config(&config.extraction);
    let result = parser.parse(&text);

    pb.finish_with_message("Done");

    let record = result.record;

    if args.validate {
        let issues = validate_document(&DocumentDraft::from(record.clone()));
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - [{}] {}: {}", issue.section, issue.field, issue.message);
            }
        }
    }

    if args.save {
        let store = open_store(args.database.as_deref(), &config)?;
        let document = StoredDocument::from_draft(DocumentDraft::from(record.clone()));
        store.upsert(&document)?;
        eprintln!("{} Saved draft {}", style("✓").green(), document.id);
    }

    let output = format_record(&record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_warnings && !result.warnings.is_empty() {
        eprintln!();
        for warning in &result.warnings {
            eprintln!("{} {}", style("ℹ").blue(), warning);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_record(record: &ShipmentRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &ShipmentRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "reference_number",
        "document_date",
        "exporter_name",
        "importer_name",
        "hs_code",
        "description",
        "quantity",
        "value",
        "needs_review",
    ])?;

    for item in &record.line_items {
        wtr.write_record([
            record.reference_number.as_deref().unwrap_or_default(),
            record.document_date.as_deref().unwrap_or_default(),
            record.exporter_name.as_deref().unwrap_or_default(),
            record.importer_name.as_deref().unwrap_or_default(),
            &item.harmonized_code,
            &item.description,
            &item.quantity.to_string(),
            &item.value.to_string(),
            if item.needs_review { "true" } else { "false" },
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &ShipmentRecord) -> String {
    let missing = || "(not found)".to_string();
    let mut output = String::new();

    output.push_str(&format!(
        "Reference: {}\n",
        record.reference_number.clone().unwrap_or_else(missing)
    ));
    output.push_str(&format!(
        "Date: {}\n",
        record.document_date.clone().unwrap_or_else(missing)
    ));
    output.push_str(&format!(
        "Exporter: {}\n",
        record.exporter_name.clone().unwrap_or_else(missing)
    ));
    output.push_str(&format!(
        "Importer: {}\n",
        record.importer_name.clone().unwrap_or_else(missing)
    ));
    output.push('\n');

    output.push_str("Items:\n");
    for item in &record.line_items {
        let marker = if item.needs_review { " [REVIEW]" } else { "" };
        output.push_str(&format!(
            "  {}  {}  qty {}  value {}{}\n",
            item.harmonized_code, item.description, item.quantity, item.value, marker
        ));
    }

    output
}
