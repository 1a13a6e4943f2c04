//! Tabular export of aggregated QR codes.

mod csv_exporter;

pub use csv_exporter::{CsvExporter, DEFAULT_EXPORT_DIR, ExportSchema, default_export_path};
