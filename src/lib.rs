//! # QRCG Stats
//!
//! Bulk statistics for a QR Code Generator account: fetches the full QR code
//! inventory page by page, classifies every code as static or dynamic,
//! optionally restricts it to a creation-date window, sums up scans and
//! exports the result as CSV.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - QR code entities, date window, transport trait
//! - **Application Layer** ([`application`]) - Pagination and statistics services
//! - **Infrastructure Layer** ([`infrastructure`]) - `reqwest` transport and CSV export
//! - **Utilities** ([`utils`]) - Record normalization and markup cleanup
//! - **Presentation** ([`report`]) - Terminal rendering
//!
//! ## Quick Start
//!
//! ```bash
//! export QRCG_ACCESS_TOKEN="..."
//! cargo run -- --from 2023-08-01 --to 2023-08-31 --export
//! ```
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod report;
pub mod utils;

pub use error::{ExportError, FetchError, TransportError};

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        FetchOutcome, InventoryService, StatsReport, StatsService, Termination,
    };
    pub use crate::domain::date_window::DateWindow;
    pub use crate::domain::entities::{AggregateResult, QrCode, RawRecord, ScanCount};
    pub use crate::domain::transport::{HttpTransport, TransportResponse};
    pub use crate::error::{ExportError, FetchError, TransportError};
    pub use crate::infrastructure::export::{CsvExporter, ExportSchema};
    pub use crate::infrastructure::http::ReqwestTransport;
}
