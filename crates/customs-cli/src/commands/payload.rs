//! Payload command - build the direct-export job payload for a draft.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use customs_core::payload::build_payload;
use customs_core::validation::validate_document;

use super::validate::print_issues;
use super::{load_config, read_draft};

/// Arguments for the payload command.
#[derive(Args)]
pub struct PayloadArgs {
    /// Draft JSON file
    #[arg(required = true)]
    draft: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Build the payload even if the draft fails validation
    #[arg(long)]
    force: bool,
}

pub async fn run(args: PayloadArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let draft = read_draft(&args.draft)?;

    let issues = validate_document(&draft);
    if !issues.is_empty() {
        if !args.force {
            print_issues(&issues);
            anyhow::bail!(
                "Draft has {} validation issue(s). Use --force to build anyway.",
                issues.len()
            );
        }
        info!("Building payload despite {} validation issue(s)", issues.len());
    }

    let payload = build_payload(&draft, &config.export);
    let output = serde_json::to_string_pretty(&payload)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Payload written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}
