//! Drafts command - list, show and save stored declaration drafts.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use customs_core::store::{DraftStore, StoredDocument};

use super::{load_config, open_store, read_draft};

/// Arguments for the drafts command.
#[derive(Args)]
pub struct DraftsArgs {
    /// Draft database (overrides config)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: DraftsCommand,
}

#[derive(Subcommand)]
enum DraftsCommand {
    /// List saved drafts, most recently updated first
    List,

    /// Print a saved draft as JSON
    Show {
        /// Document id (reference number or DRAFT-<millis>)
        id: String,
    },

    /// Save a draft JSON file to the store
    Save {
        /// Draft JSON file
        draft: PathBuf,
    },
}

pub async fn run(args: DraftsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(args.database.as_deref(), &config)?;

    match args.command {
        DraftsCommand::List => list_drafts(&store),
        DraftsCommand::Show { id } => show_draft(&store, &id),
        DraftsCommand::Save { draft } => save_draft(&store, draft),
    }
}

fn list_drafts(store: &impl DraftStore) -> anyhow::Result<()> {
    let documents = store.list()?;

    if documents.is_empty() {
        println!("{} No saved drafts", style("ℹ").blue());
        return Ok(());
    }

    println!(
        "{:<24} {:<6} {:<32} {:<12} {:<10} {}",
        style("ID").bold(),
        style("TYPE").bold(),
        style("CUSTOMER").bold(),
        style("DATE").bold(),
        style("STATUS").bold(),
        style("UPDATED").bold()
    );

    for doc in documents {
        println!(
            "{:<24} {:<6} {:<32} {:<12} {:<10} {}",
            doc.id,
            doc.doc_type,
            doc.customer,
            doc.date,
            doc.status.as_str(),
            doc.updated_at.format("%Y-%m-%d %H:%M:%S")
        );
    }

    Ok(())
}

fn show_draft(store: &impl DraftStore, id: &str) -> anyhow::Result<()> {
    let document = store.get(id)?;
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

fn save_draft(store: &impl DraftStore, path: PathBuf) -> anyhow::Result<()> {
    let draft = read_draft(&path)?;
    let document = StoredDocument::from_draft(draft);
    store.upsert(&document)?;

    println!("{} Saved draft {}", style("✓").green(), document.id);
    Ok(())
}
