//! Application layer services implementing the statistics pipeline.
//!
//! Services consume the [`crate::domain::transport::HttpTransport`] trait and
//! provide a clean API for the command line front end.
//!
//! # Available Services
//!
//! - [`services::inventory_service::InventoryService`] - Paginated retrieval of raw QR code records
//! - [`services::stats_service::StatsService`] - Normalization, date filtering and aggregation

pub mod services;
