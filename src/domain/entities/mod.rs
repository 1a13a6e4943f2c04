//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`RawRecord`] - An untyped QR code object straight from the API
//! - [`QrCode`] - A normalized, classified QR code
//! - [`AggregateResult`] - Summary counters plus the included codes
//!
//! Raw records are transient: they are normalized as soon as a page arrives
//! and only [`QrCode`] values travel further down the pipeline.

pub mod aggregate;
pub mod qr_code;
pub mod raw_record;

pub use aggregate::{AggregateResult, Aggregator};
pub use qr_code::{QrCode, QrCodeKind, ScanCount};
pub use raw_record::RawRecord;
