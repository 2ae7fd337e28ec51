//! Validate command - pre-submission checks on a declaration draft.

use std::path::PathBuf;

use clap::Args;
use console::style;

use customs_core::validation::{validate_document, ValidationIssue};

use super::read_draft;

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// Draft JSON file
    #[arg(required = true)]
    draft: PathBuf,

    /// Print issues as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: ValidateArgs) -> anyhow::Result<()> {
    let draft = read_draft(&args.draft)?;
    let issues = validate_document(&draft);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&issues)?);
    } else if issues.is_empty() {
        println!("{} Draft is ready for submission", style("✓").green());
    } else {
        print_issues(&issues);
    }

    if !issues.is_empty() {
        anyhow::bail!("Draft has {} validation issue(s)", issues.len());
    }

    Ok(())
}

pub fn print_issues(issues: &[ValidationIssue]) {
    println!("{}", style("Validation issues:").red());
    for issue in issues {
        println!(
            "  - [{}] {}: {}",
            style(&issue.section).bold(),
            issue.field,
            issue.message
        );
    }
}
