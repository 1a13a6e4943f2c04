//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer and handles
//! everything that touches the network or the file system.
//!
//! # Modules
//!
//! - [`http`] - `reqwest` based [`crate::domain::transport::HttpTransport`]
//! - [`export`] - CSV export of normalized QR codes

pub mod export;
pub mod http;
