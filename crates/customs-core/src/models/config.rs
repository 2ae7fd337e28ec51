//! Configuration structures for the customs pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CustomsError, Result};

/// Main configuration for the customs pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomsConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Defaults used when building the direct-export payload.
    pub export: ExportDefaults,

    /// Draft store configuration.
    pub store: StoreConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Minimum number of non-whitespace characters before a text blob is
    /// worth extracting from (shorter input only yields the placeholder).
    pub min_text_length: usize,

    /// Emit a warning for every field the engine could not find.
    pub report_missing_fields: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_text_length: 1,
            report_missing_fields: true,
        }
    }
}

/// Defaults applied by the payload transformer for data the draft does
/// not carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportDefaults {
    /// Customs office code when the draft has none.
    pub customs_code: String,
    /// Country of dispatch (ISO 3166 alpha-2).
    pub country_of_dispatch: String,
    /// Port of loading (UN/LOCODE).
    pub port_code: String,
    /// Bank code for duty payment.
    pub bank_code: String,
    /// Declarant tax number.
    pub declarant_tax_no: String,
    /// Consignor id when the draft has no exporter.
    pub consignor_id: String,
    /// Consignee country code.
    pub consignee_country_code: String,
    /// Consignee city.
    pub consignee_city: String,
    /// Consignee street.
    pub consignee_street: String,
    /// Invoice currency.
    pub currency: String,
    /// Country of origin for every item.
    pub origin_country_code: String,
    /// Customs procedure code.
    pub procedure: String,
    /// Incoterms code.
    pub incoterms: String,
    /// Gross weight per item.
    pub gross_weight: f64,
    /// Net weight per item.
    pub net_weight: f64,
    /// Packaging type code.
    pub packaging_type: String,
    /// Quantity unit code.
    pub quantity_unit: String,
}

impl Default for ExportDefaults {
    fn default() -> Self {
        Self {
            customs_code: "040300".to_string(),
            country_of_dispatch: "ID".to_string(),
            port_code: "IDJKT".to_string(),
            bank_code: "000".to_string(),
            declarant_tax_no: "000000000".to_string(),
            consignor_id: "000000000".to_string(),
            consignee_country_code: "SG".to_string(),
            consignee_city: "Singapore".to_string(),
            consignee_street: "12 5th Ave".to_string(),
            currency: "USD".to_string(),
            origin_country_code: "ID".to_string(),
            procedure: "1000".to_string(),
            incoterms: "FOB".to_string(),
            gross_weight: 10.0,
            net_weight: 8.0,
            packaging_type: "CT".to_string(),
            quantity_unit: "PCE".to_string(),
        }
    }
}

/// Draft store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database file for saved drafts.
    pub database_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("customs_drafts.db"),
        }
    }
}

impl CustomsConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Reject settings the payload builder cannot work with.
    pub fn validate(&self) -> Result<()> {
        let export = &self.export;
        if export.customs_code.trim().is_empty() {
            return Err(CustomsError::Config("export.customs_code must not be empty".into()));
        }
        if export.currency.trim().len() != 3 {
            return Err(CustomsError::Config(format!(
                "export.currency must be a 3-letter code, got {:?}",
                export.currency
            )));
        }
        if export.net_weight > export.gross_weight {
            return Err(CustomsError::Config(
                "export.net_weight exceeds export.gross_weight".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: CustomsConfig =
            serde_json::from_str(r#"{"export":{"port_code":"IDSUB"}}"#).unwrap();

        assert_eq!(config.export.port_code, "IDSUB");
        assert_eq!(config.export.customs_code, "040300");
        assert_eq!(config.extraction.min_text_length, 1);
        assert_eq!(config.store.database_path, PathBuf::from("customs_drafts.db"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = CustomsConfig::default();
        config.export.currency = "EUR".to_string();
        config.save(&path).unwrap();

        let loaded = CustomsConfig::from_file(&path).unwrap();
        assert_eq!(loaded.export.currency, "EUR");
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut config = CustomsConfig::default();
        config.export.currency = "DOLLAR".to_string();
        assert!(matches!(config.validate(), Err(CustomsError::Config(_))));

        let mut config = CustomsConfig::default();
        config.export.net_weight = 20.0;
        assert!(matches!(config.validate(), Err(CustomsError::Config(_))));
    }

    #[test]
    fn test_malformed_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(CustomsConfig::from_file(&path), Err(CustomsError::Json(_))));
    }
}
