//! Error types shared across the statistics pipeline.
//!
//! Failures never abort the process on their own: a [`FetchError`] ends
//! pagination with a partial result, an [`ExportError`] only affects the
//! export step. Date parse failures are recovered inside the normalizer and
//! have no error type at all.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single HTTP exchange, before any status code is known.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),
}

/// Failure while fetching one page of the QR code listing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("failed to fetch page {page}: {source}")]
    Transport {
        page: u32,
        #[source]
        source: TransportError,
    },

    #[error("failed to fetch page {page}: upstream returned status {status}")]
    Status { page: u32, status: u16, body: String },

    #[error("failed to decode page {page}: {message}")]
    Decode { page: u32, message: String },
}

impl FetchError {
    /// Page number the failure happened on.
    pub fn page(&self) -> u32 {
        match self {
            Self::Transport { page, .. } | Self::Status { page, .. } | Self::Decode { page, .. } => {
                *page
            }
        }
    }
}

/// Failure while writing the CSV export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
}
