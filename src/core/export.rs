// PriceLens - core/export.rs
//
// HTML, CSV, and JSON rendering of the catalog report.
// Core layer: writes to any Write trait object; app::report owns the file.
//
// Every format lists records by ascending package price (not unit price).

use crate::core::model::{Catalog, PriceRecord};
use crate::util::constants;
use crate::util::error::ExportError;
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::Path;

/// Output format of a report, chosen from the target file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Html,
    Csv,
    Json,
}

impl ReportFormat {
    /// `.csv` and `.json` (any case) select those formats; everything else is HTML.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") => Self::Csv,
            Some("json") => Self::Json,
            _ => Self::Html,
        }
    }
}

/// Catalog records sorted by ascending price, ties in catalog order.
pub fn rows_by_price(catalog: &Catalog) -> Vec<&PriceRecord> {
    let mut rows: Vec<&PriceRecord> = catalog.iter().collect();
    rows.sort_by(|a, b| a.price().total_cmp(&b.price()));
    rows
}

/// Write the catalog as a self-contained HTML table.
///
/// Columns: number, name, price, weight, file, price per kg (2 decimals).
/// Returns the number of data rows written.
pub fn export_html<W: Write>(
    catalog: &Catalog,
    mut writer: W,
    export_path: &Path,
    generated_at: DateTime<Utc>,
) -> Result<usize, ExportError> {
    let io_err = |e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    };

    let rows = rows_by_price(catalog);

    write!(
        writer,
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <style>td {{padding-right: 20px;}}</style>\n\
         </head>\n\
         <body>\n\
         <table>\n\
         <tr><th>Номер</th><th>Название</th><th>Цена</th><th>Фасовка</th>\
         <th>Файл</th><th>Цена за кг.</th></tr>\n",
        title = constants::REPORT_TITLE,
    )
    .map_err(io_err)?;

    for (index, record) in rows.iter().enumerate() {
        writeln!(
            writer,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td></tr>",
            index + 1,
            escape_html(record.name()),
            record.price(),
            record.weight(),
            escape_html(record.source_file()),
            record.unit_price(),
        )
        .map_err(io_err)?;
    }

    write!(
        writer,
        "</table>\n\
         <p>Сформировано: {app} {version}, {stamp}</p>\n\
         </body>\n\
         </html>\n",
        app = constants::APP_NAME,
        version = constants::APP_VERSION,
        stamp = generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
    .map_err(io_err)?;

    writer.flush().map_err(io_err)?;
    Ok(rows.len())
}

/// Write the catalog as CSV with the same columns as the HTML table.
pub fn export_csv<W: Write>(
    catalog: &Catalog,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["number", "name", "price", "weight", "file", "price_per_kg"])
        .map_err(csv_err)?;

    let rows = rows_by_price(catalog);
    for (index, record) in rows.iter().enumerate() {
        let number = (index + 1).to_string();
        let price = record.price().to_string();
        let weight = record.weight().to_string();
        let unit_price = format!("{:.2}", record.unit_price());
        csv_writer
            .write_record([
                number.as_str(),
                record.name(),
                price.as_str(),
                weight.as_str(),
                record.source_file(),
                unit_price.as_str(),
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(rows.len())
}

/// Write the catalog as a JSON array of records.
pub fn export_json<W: Write>(
    catalog: &Catalog,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let rows = rows_by_price(catalog);
    serde_json::to_writer_pretty(writer, &rows).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(rows.len())
}

/// Escape text for use inside an HTML element.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
