//! Shipment field extraction from raw OCR text.
//!
//! Pure and synchronous: no I/O, no shared mutable state. Safe to call
//! from any number of threads at once.

mod parser;
pub mod rules;

pub use parser::{extract, ExtractionResult, RuleBasedParser, ShipmentParser};
