// PriceLens - app/report.rs
//
// Writes the catalog report to disk in the format implied by the path.

use crate::core::export::{self, ReportFormat};
use crate::core::model::Catalog;
use crate::platform::fs::write_atomically;
use crate::util::error::ExportError;
use chrono::Utc;
use std::path::Path;

/// Export the whole catalog to `path`, replacing any existing file.
///
/// Returns the number of rows written. The file is replaced atomically, so a
/// failed export leaves the previous report (if any) intact.
pub fn export(catalog: &Catalog, path: &Path) -> Result<usize, ExportError> {
    let format = ReportFormat::from_path(path);
    tracing::debug!(path = %path.display(), format = ?format, "Exporting report");

    let rows = write_atomically(
        path,
        |writer| match format {
            ReportFormat::Html => export::export_html(catalog, writer, path, Utc::now()),
            ReportFormat::Csv => export::export_csv(catalog, writer, path),
            ReportFormat::Json => export::export_json(catalog, writer, path),
        },
        |e| ExportError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    )?;

    tracing::info!(path = %path.display(), rows, "Report exported");
    Ok(rows)
}
