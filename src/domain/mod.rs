//! Domain layer containing the QR code data model and pipeline rules.
//!
//! # Architecture
//!
//! - [`entities`] - Raw and normalized QR codes, aggregate counters
//! - [`date_window`] - Optional creation-date window and the inclusion rule
//! - [`transport`] - HTTP transport trait implemented by the infrastructure layer
//!
//! # Pipeline
//!
//! 1. [`crate::application::services::InventoryService`] pages through the API
//! 2. [`crate::utils::record_normalizer::normalize_record`] turns each
//!    [`entities::RawRecord`] into an [`entities::QrCode`]
//! 3. [`date_window::include`] drops codes outside the window
//! 4. [`entities::Aggregator`] counts what is left
//! 5. [`crate::infrastructure::export::CsvExporter`] optionally writes it out

pub mod date_window;
pub mod entities;
pub mod transport;
