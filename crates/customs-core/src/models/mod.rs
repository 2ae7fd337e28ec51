//! Data models.

pub mod config;
pub mod document;
pub mod shipment;
