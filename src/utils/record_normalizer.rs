//! Normalization of raw API records into [`QrCode`] values.
//!
//! Ensures every record yields a usable code: malformed fields fall back to
//! their defaults instead of rejecting the record.

use crate::domain::entities::{QrCode, RawRecord, ScanCount};
use crate::utils::markup::strip_markup;
use chrono::NaiveDateTime;
use serde_json::Value;

/// `created` format used when the value contains a literal `T`.
pub const CREATED_ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// `created` format used otherwise.
pub const CREATED_PLAIN_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const MISSING: &str = "N/A";
const UNKNOWN_TYPE: &str = "Unknown";

/// Normalizes one raw record.
///
/// # Normalization Rules
///
/// 1. **Classification**: dynamic iff the raw `short_url` is truthy (not
///    absent, null, `""`, `false` or `0`)
/// 2. **Title**: raw title if truthy, else `target_url`, else `My {type_name}`
/// 3. **Creation time**: parsed with [`parse_created`], `None` on failure
/// 4. **Scans**: absent or null counters become `0`; non-integer values are
///    kept for display only
/// 5. **Markup**: bracketed style tags are stripped from text fields; URLs
///    are kept as received since brackets are valid there (`http://[::1]/`)
///
/// Never fails and never panics. The same input always yields the same output.
///
/// # Examples
///
/// ```ignore
/// let raw = RawRecord::from_value(json!({ "short_url": "", "type_name": "QR Code" })).unwrap();
/// let code = normalize_record(&raw);
/// assert!(!code.is_dynamic);
/// assert_eq!(code.title, "My QR Code");
/// ```
pub fn normalize_record(raw: &RawRecord) -> QrCode {
    let id = text_field(raw, "id").unwrap_or_else(|| MISSING.to_string());
    let created = text_field(raw, "created").unwrap_or_else(|| MISSING.to_string());
    let short_url = truthy_field(raw, "short_url").unwrap_or_default();
    let target_url = truthy_field(raw, "target_url");
    let type_name = text_field(raw, "type_name").unwrap_or_else(|| UNKNOWN_TYPE.to_string());

    let title = match truthy_field(raw, "title")
        .map(|title| strip_markup(&title))
        .filter(|title| !title.is_empty())
    {
        Some(title) => title,
        None => target_url
            .clone()
            .unwrap_or_else(|| format!("My {}", type_name)),
    };

    QrCode {
        created_at: parse_created(&created),
        is_dynamic: !short_url.is_empty(),
        total_scans: scan_field(raw, "total_scans"),
        unique_scans: scan_field(raw, "unique_scans"),
        id,
        created,
        title,
        short_url,
        target_url,
        type_name,
    }
}

/// Parses an upstream creation timestamp.
///
/// Values containing `T` must match [`CREATED_ISO_FORMAT`]
/// (`2023-08-11T13:13:29.123456Z`), all others [`CREATED_PLAIN_FORMAT`]
/// (`2023-08-11 13:13:29`).
pub fn parse_created(created: &str) -> Option<NaiveDateTime> {
    let format = if created.contains('T') {
        CREATED_ISO_FORMAT
    } else {
        CREATED_PLAIN_FORMAT
    };

    match NaiveDateTime::parse_from_str(created, format) {
        Ok(at) => Some(at),
        Err(e) => {
            tracing::debug!("Unparseable created timestamp {:?}: {}", created, e);
            None
        }
    }
}

/// Reads a scalar field as text with markup stripped.
fn text_field(raw: &RawRecord, field: &str) -> Option<String> {
    scalar_field(raw, field).map(|text| strip_markup(&text))
}

/// Reads a scalar field as received, treating falsy values as absent.
fn truthy_field(raw: &RawRecord, field: &str) -> Option<String> {
    match raw.get(field)? {
        Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        _ => scalar_field(raw, field),
    }
}

/// Reads a scalar field as text. Objects and arrays count as absent.
fn scalar_field(raw: &RawRecord, field: &str) -> Option<String> {
    match raw.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn scan_field(raw: &RawRecord, field: &str) -> ScanCount {
    match raw.get(field) {
        None => ScanCount::Count(0),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(count) => ScanCount::Count(count),
            None => ScanCount::Unparsed(n.to_string()),
        },
        Some(Value::String(s)) => ScanCount::Unparsed(strip_markup(s)),
        Some(other) => ScanCount::Unparsed(other.to_string()),
    }
}
