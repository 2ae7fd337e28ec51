//! Transformation of a declaration draft into the direct-export job
//! payload accepted by the single-window customs API.
//!
//! Only the payload shape lives here; submitting it is up to the caller.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::config::ExportDefaults;
use crate::models::document::DocumentDraft;
use crate::models::shipment::timestamp_identifier;

/// Direct-export job document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectExportJobPayload {
    pub customs_code: String,
    pub exit_customs_code: String,
    pub country_of_dispatch: String,
    pub port_code: String,
    pub consignor: Consignor,
    pub consignee: Consignee,
    pub bank_code: String,
    pub declarant_tax_no: String,
    pub invoices: Vec<PayloadInvoice>,
}

/// Exporting party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consignor {
    /// Tax number or name of the exporter.
    pub id: String,
}

/// Receiving party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consignee {
    pub name_title: String,
    pub country_code: String,
    pub city_name: String,
    pub street_name: String,
}

/// Commercial invoice covered by the job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadInvoice {
    pub invoice_no: String,
    pub invoice_date: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub invoice_amount: Decimal,
    pub invoice_amount_currency: String,
    pub items: Vec<PayloadItem>,
}

/// Goods line of an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadItem {
    /// 1-based line number.
    pub item_line_no: u32,
    pub hs_code: String,
    pub origin_country_code: String,
    pub procedure: String,
    pub incoterms: String,
    pub item_description: String,
    pub gross_weight: f64,
    pub net_weight: f64,
    pub packaging_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub item_quantity: Decimal,
    pub item_quantity_unit: String,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Build the direct-export payload for a draft.
///
/// Values the draft does not carry come from `defaults`. The invoice
/// amount is the sum of the line item values.
pub fn build_payload(draft: &DocumentDraft, defaults: &ExportDefaults) -> DirectExportJobPayload {
    let customs_code = draft
        .customs_office_code()
        .unwrap_or(&defaults.customs_code)
        .to_string();

    let items: Vec<PayloadItem> = draft
        .line_items
        .iter()
        .enumerate()
        .map(|(index, item)| PayloadItem {
            item_line_no: index as u32 + 1,
            hs_code: item.harmonized_code.clone(),
            origin_country_code: defaults.origin_country_code.clone(),
            procedure: defaults.procedure.clone(),
            incoterms: defaults.incoterms.clone(),
            item_description: item.description.clone(),
            gross_weight: defaults.gross_weight,
            net_weight: defaults.net_weight,
            packaging_type: defaults.packaging_type.clone(),
            item_quantity: item.quantity,
            item_quantity_unit: defaults.quantity_unit.clone(),
        })
        .collect();

    let invoice = PayloadInvoice {
        invoice_no: non_blank(&draft.reference_number)
            .map(str::to_string)
            .unwrap_or_else(|| format!("INV-{}", timestamp_identifier())),
        invoice_date: non_blank(&draft.document_date)
            .map(str::to_string)
            .unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string()),
        invoice_amount: draft.line_items.iter().map(|item| item.value).sum(),
        invoice_amount_currency: defaults.currency.clone(),
        items,
    };

    debug!(
        "Built payload for invoice {} with {} items",
        invoice.invoice_no,
        invoice.items.len()
    );

    DirectExportJobPayload {
        exit_customs_code: customs_code.clone(),
        customs_code,
        country_of_dispatch: defaults.country_of_dispatch.clone(),
        port_code: defaults.port_code.clone(),
        consignor: Consignor {
            id: non_blank(&draft.exporter)
                .unwrap_or(&defaults.consignor_id)
                .to_string(),
        },
        consignee: Consignee {
            name_title: non_blank(&draft.importer).unwrap_or("Unknown").to_string(),
            country_code: defaults.consignee_country_code.clone(),
            city_name: defaults.consignee_city.clone(),
            street_name: defaults.consignee_street.clone(),
        },
        bank_code: defaults.bank_code.clone(),
        declarant_tax_no: defaults.declarant_tax_no.clone(),
        invoices: vec![invoice],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::extract;
    use pretty_assertions::assert_eq;

    fn draft() -> DocumentDraft {
        let mut draft = DocumentDraft::from(extract(
            "Invoice No: INV-2024/001\nDate: 29-12-2024\nExporter: PT. Sepatu\nConsignee: Runners Ltd\nfootwear",
        ));
        draft.customs_office = Some("050100 - KPPBC Tanjung Perak".to_string());
        draft
    }

    #[test]
    fn test_header_fields() {
        let payload = build_payload(&draft(), &ExportDefaults::default());

        assert_eq!(payload.customs_code, "050100");
        assert_eq!(payload.exit_customs_code, "050100");
        assert_eq!(payload.country_of_dispatch, "ID");
        assert_eq!(payload.port_code, "IDJKT");
        assert_eq!(payload.consignor.id, "PT. Sepatu");
        assert_eq!(payload.consignee.name_title, "Runners Ltd");
        assert_eq!(payload.consignee.country_code, "SG");
    }

    #[test]
    fn test_invoice_and_items() {
        let mut draft = draft();
        draft.add_item();
        let payload = build_payload(&draft, &ExportDefaults::default());
        let invoice = &payload.invoices[0];

        assert_eq!(invoice.invoice_no, "INV-2024/001");
        assert_eq!(invoice.invoice_date, "29-12-2024");
        assert_eq!(invoice.invoice_amount, Decimal::from(15000));
        assert_eq!(invoice.items.len(), 2);
        assert_eq!(invoice.items[0].item_line_no, 1);
        assert_eq!(invoice.items[0].hs_code, "6404.11.90");
        assert_eq!(invoice.items[0].item_quantity, Decimal::from(500));
        assert_eq!(invoice.items[1].item_line_no, 2);
        assert_eq!(invoice.items[1].hs_code, "0000.00.00");
    }

    #[test]
    fn test_defaults_for_empty_draft() {
        let payload = build_payload(&DocumentDraft::default(), &ExportDefaults::default());

        assert_eq!(payload.customs_code, "040300");
        assert_eq!(payload.consignor.id, "000000000");
        assert_eq!(payload.consignee.name_title, "Unknown");
        assert!(payload.invoices[0].invoice_no.starts_with("INV-"));
        assert_eq!(payload.invoices[0].invoice_date.len(), 10);
        assert!(payload.invoices[0].items.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(build_payload(&draft(), &ExportDefaults::default())).unwrap();

        assert_eq!(json["exitCustomsCode"], "050100");
        assert_eq!(json["declarantTaxNo"], "000000000");
        assert_eq!(json["consignee"]["nameTitle"], "Runners Ltd");
        assert_eq!(json["invoices"][0]["invoiceAmountCurrency"], "USD");
        assert_eq!(json["invoices"][0]["items"][0]["itemQuantityUnit"], "PCE");
        assert_eq!(json["invoices"][0]["items"][0]["itemQuantity"], 500.0);
    }
}
