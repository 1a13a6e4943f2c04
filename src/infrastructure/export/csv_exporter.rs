//! CSV export of normalized QR codes.

use crate::domain::entities::QrCode;
use crate::error::ExportError;
use crate::utils::markup::{sanitize_field, strip_line_breaks};
use chrono::NaiveDateTime;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Default directory for exports, relative to the working directory.
pub const DEFAULT_EXPORT_DIR: &str = "QRCG STATISTICS EXPORTS";

const STANDARD_HEADERS: &[&str] = &[
    "Created",
    "Title",
    "Short URL",
    "Target URL",
    "Solution Type",
    "QR Code Type",
    "Total Scans",
    "Unique Scans",
];

const EXTENDED_HEADERS: &[&str] = &[
    "ID",
    "Created",
    "Title",
    "Short URL",
    "Target URL",
    "Solution Type",
    "QR Code Type",
    "Total Scans",
    "Unique Scans",
];

/// Column layout of the export file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportSchema {
    /// The eight standard columns.
    Standard,
    /// Standard columns prefixed with `ID`.
    #[default]
    WithId,
}

impl ExportSchema {
    pub fn from_include_id(include_id: bool) -> Self {
        if include_id { Self::WithId } else { Self::Standard }
    }

    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            Self::Standard => STANDARD_HEADERS,
            Self::WithId => EXTENDED_HEADERS,
        }
    }

    /// One data row. Scan columns stay blank for static codes.
    pub fn row(&self, code: &QrCode) -> Vec<String> {
        let (total_scans, unique_scans) = if code.is_dynamic {
            (
                sanitize_field(&code.total_scans.to_string()),
                sanitize_field(&code.unique_scans.to_string()),
            )
        } else {
            (String::new(), String::new())
        };

        let mut row = Vec::with_capacity(self.headers().len());
        if *self == Self::WithId {
            row.push(sanitize_field(&code.id));
        }
        row.extend([
            sanitize_field(&code.created),
            sanitize_field(&code.title),
            strip_line_breaks(&code.short_url),
            code.target_url.as_deref().map(strip_line_breaks).unwrap_or_default(),
            sanitize_field(&code.type_name),
            code.kind().to_string(),
            total_scans,
            unique_scans,
        ]);
        row
    }
}

/// Writes QR codes to a CSV file.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter {
    schema: ExportSchema,
}

impl CsvExporter {
    pub fn new(schema: ExportSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> ExportSchema {
        self.schema
    }

    /// Renders the complete file in memory: header row, then one row per code.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Csv`] if a row cannot be encoded.
    pub fn render(&self, codes: &[QrCode]) -> Result<Vec<u8>, ExportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(self.schema.headers())?;
        for code in codes {
            writer.write_record(self.schema.row(code))?;
        }

        writer
            .into_inner()
            .map_err(|e| ExportError::Csv(csv::Error::from(e.into_error())))
    }

    /// Writes the export to `destination` and returns the number of bytes written.
    ///
    /// Missing parent directories are created. The file is first written
    /// next to the destination under a `.tmp` suffix and then renamed, so the
    /// destination never holds a partial export.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] if the destination cannot be created or written.
    pub fn export(&self, codes: &[QrCode], destination: &Path) -> Result<u64, ExportError> {
        let content = self.render(codes)?;
        let io_error = |source| ExportError::Io {
            path: destination.to_path_buf(),
            source,
        };

        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let staging = staging_path(destination);
        let written = fs::write(&staging, &content).and_then(|_| fs::rename(&staging, destination));
        if let Err(e) = written {
            let _ = fs::remove_file(&staging);
            error!("Export to {} failed: {}", destination.display(), e);
            return Err(io_error(e));
        }

        info!(
            "Exported {} QR codes to {} ({} bytes)",
            codes.len(),
            destination.display(),
            content.len()
        );
        Ok(content.len() as u64)
    }
}

/// Timestamped export path, e.g. `<dir>/qrcg_statistics_20230811_131329.csv`.
pub fn default_export_path(dir: &Path, now: NaiveDateTime) -> PathBuf {
    dir.join(format!("qrcg_statistics_{}.csv", now.format("%Y%m%d_%H%M%S")))
}

fn staging_path(destination: &Path) -> PathBuf {
    let mut name = OsString::from(destination.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
