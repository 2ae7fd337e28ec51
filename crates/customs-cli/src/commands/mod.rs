//! CLI subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod drafts;
pub mod extract;
pub mod payload;
pub mod validate;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use customs_core::models::config::CustomsConfig;
use customs_core::models::document::DocumentDraft;
use customs_core::pdf::{read_text_layer, DEFAULT_MIN_TEXT_LENGTH};
use customs_core::SqliteDraftStore;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("customs")
        .join("config.json")
}

/// Load configuration from the given path, the default file, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CustomsConfig> {
    if let Some(path) = config_path {
        return Ok(CustomsConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(CustomsConfig::from_file(&default_path)?)
    } else {
        Ok(CustomsConfig::default())
    }
}

/// Read OCR text from a `.txt` file or the text layer of a `.pdf`.
pub fn read_input_text(path: &Path) -> anyhow::Result<String> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        // OCR dumps may carry invalid UTF-8; extraction copes with U+FFFD
        "txt" | "text" | "ocr" => Ok(String::from_utf8_lossy(&fs::read(path)?).into_owned()),
        "pdf" => {
            let data = fs::read(path)?;
            Ok(read_text_layer(&data, DEFAULT_MIN_TEXT_LENGTH)?)
        }
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

/// Whether a path has an extension the extractor understands.
pub fn is_supported_input(path: &Path) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    matches!(ext.to_lowercase().as_str(), "txt" | "text" | "ocr" | "pdf")
}

/// Load a declaration draft from a JSON file.
pub fn read_draft(path: &Path) -> anyhow::Result<DocumentDraft> {
    let content = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read draft {}: {}", path.display(), e))?;
    Ok(serde_json::from_str(&content)?)
}

/// Open the draft store, preferring an explicit database path.
pub fn open_store(database: Option<&Path>, config: &CustomsConfig) -> anyhow::Result<SqliteDraftStore> {
    let path = database.unwrap_or(&config.store.database_path);
    debug!("Opening draft store at {}", path.display());
    Ok(SqliteDraftStore::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_input_text_tolerates_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.txt");
        let mut bytes = b"Invoice No: INV-7\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        fs::write(&path, bytes).unwrap();

        let text = read_input_text(&path).unwrap();
        assert!(text.starts_with("Invoice No: INV-7\n"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn test_supported_inputs() {
        assert!(is_supported_input(Path::new("a.TXT")));
        assert!(is_supported_input(Path::new("b.pdf")));
        assert_eq!(is_supported_input(Path::new("c.png")), false);
    }
}
