//! Normalized QR code entity.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// Scan counter as reported upstream.
///
/// Only [`ScanCount::Count`] takes part in aggregation. Anything else the API
/// sends (floats, numeric strings, objects) is kept verbatim for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ScanCount {
    Count(i64),
    Unparsed(String),
}

impl ScanCount {
    /// Returns the value if it is a true integer.
    pub fn as_count(&self) -> Option<i64> {
        match self {
            Self::Count(n) => Some(*n),
            Self::Unparsed(_) => None,
        }
    }
}

impl Default for ScanCount {
    fn default() -> Self {
        Self::Count(0)
    }
}

impl fmt::Display for ScanCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{}", n),
            Self::Unparsed(raw) => f.write_str(raw),
        }
    }
}

/// Static codes encode their target directly; dynamic codes go through a
/// short redirect URL and have their scans tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QrCodeKind {
    Static,
    Dynamic,
}

impl QrCodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Static => "Static",
            Self::Dynamic => "Dynamic",
        }
    }
}

impl fmt::Display for QrCodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A QR code after normalization.
///
/// Built once per raw record by
/// [`normalize_record`](crate::utils::record_normalizer::normalize_record)
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QrCode {
    pub id: String,
    /// Creation timestamp exactly as the API sent it.
    pub created: String,
    /// Parsed creation time, `None` when `created` matched neither format.
    pub created_at: Option<NaiveDateTime>,
    pub title: String,
    pub short_url: String,
    pub target_url: Option<String>,
    pub type_name: String,
    pub is_dynamic: bool,
    pub total_scans: ScanCount,
    pub unique_scans: ScanCount,
}

impl QrCode {
    pub fn kind(&self) -> QrCodeKind {
        if self.is_dynamic {
            QrCodeKind::Dynamic
        } else {
            QrCodeKind::Static
        }
    }

    /// Human readable type, e.g. `Dynamic - URL`.
    pub fn type_display(&self) -> String {
        format!("{} - {}", self.kind(), self.type_name)
    }

    /// Scans that count toward the aggregate total.
    ///
    /// Static codes have no tracked scans, so this is `None` for them even
    /// when the API reports a number.
    pub fn counted_scans(&self) -> Option<i64> {
        if self.is_dynamic {
            self.total_scans.as_count()
        } else {
            None
        }
    }
}
