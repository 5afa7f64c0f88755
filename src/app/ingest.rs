// PriceLens - app/ingest.rs
//
// Catalog loading. Orchestrates discovery and parsing of every price list in
// the catalog directory and assembles the frozen Catalog.
//
// Error policy:
//   - An unusable catalog directory is always fatal.
//   - A file without the three required columns is skipped silently.
//   - A file that fails to open or parse is rejected and reported; the other
//     files still load, unless `fail_fast` is set, in which case the first
//     such failure aborts the whole load.

use crate::core::discovery::{self, DiscoveryConfig};
use crate::core::model::{Catalog, PriceRecord, RowPolicy};
use crate::core::parser::{self, ParseOutcome};
use crate::util::error::{ParseError, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Settings for one catalog load.
#[derive(Debug, Clone, Default)]
pub struct LoadConfig {
    pub discovery: DiscoveryConfig,
    pub row_policy: RowPolicy,
    pub fail_fast: bool,
}

/// Records contributed by a single price list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub path: PathBuf,
    /// Data rows examined, blank rows excluded.
    pub rows: u64,
    pub records: usize,
}

/// A price list ignored because required columns were not found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub missing: Vec<&'static str>,
}

/// Everything a catalog load produced.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Records of every accepted file, in file order then row order.
    pub catalog: Catalog,
    /// Accepted files and their record counts.
    pub loaded_files: Vec<FileSummary>,
    /// Files skipped for missing columns (not an error).
    pub skipped_files: Vec<SkippedFile>,
    /// Files that failed to open or parse; none of their rows were kept.
    pub rejected_files: Vec<ParseError>,
    /// Rows dropped under the lenient policy.
    pub skipped_rows: Vec<ParseError>,
    /// Non-fatal discovery warnings.
    pub warnings: Vec<String>,
}

impl LoadReport {
    /// True when some data did not make it into the catalog because of errors.
    pub fn has_errors(&self) -> bool {
        !self.rejected_files.is_empty() || !self.skipped_rows.is_empty()
    }

    /// Data rows examined across every accepted file.
    pub fn rows_read(&self) -> u64 {
        self.loaded_files.iter().map(|f| f.rows).sum()
    }
}

/// Load every price list in `directory` into a new catalog.
///
/// Each call builds a fresh catalog; nothing is shared between calls.
pub fn load(directory: &Path, config: &LoadConfig) -> Result<LoadReport> {
    let (files, warnings) = discovery::discover_price_lists(directory, &config.discovery)?;

    tracing::info!(
        directory = %directory.display(),
        candidates = files.len(),
        policy = %config.row_policy,
        "Loading price lists"
    );

    let mut records: Vec<PriceRecord> = Vec::new();
    let mut report = LoadReport {
        warnings,
        ..LoadReport::default()
    };

    for path in files {
        match load_file(&path, config.row_policy) {
            Ok(ParseOutcome::Parsed(parsed)) => {
                tracing::debug!(
                    file = %path.display(),
                    rows = parsed.rows_read,
                    records = parsed.records.len(),
                    skipped_rows = parsed.skipped_rows.len(),
                    "Price list loaded"
                );
                report.loaded_files.push(FileSummary {
                    path,
                    rows: parsed.rows_read,
                    records: parsed.records.len(),
                });
                records.extend(parsed.records);
                report.skipped_rows.extend(parsed.skipped_rows);
            }
            Ok(ParseOutcome::MissingColumns { missing }) => {
                tracing::debug!(
                    file = %path.display(),
                    missing = ?missing,
                    "Required columns not found, skipping file"
                );
                report.skipped_files.push(SkippedFile { path, missing });
            }
            Err(e) => {
                if config.fail_fast {
                    return Err(e.into());
                }
                tracing::error!(error = %e, "Price list rejected");
                report.rejected_files.push(e);
            }
        }
    }

    report.catalog = Catalog::from(records);

    tracing::info!(
        records = report.catalog.len(),
        loaded = report.loaded_files.len(),
        skipped = report.skipped_files.len(),
        rejected = report.rejected_files.len(),
        "Catalog loaded"
    );

    Ok(report)
}

/// Open and parse one price list. The file handle is closed on return,
/// including when parsing stops part-way through.
fn load_file(path: &Path, policy: RowPolicy) -> std::result::Result<ParseOutcome, ParseError> {
    let file = File::open(path).map_err(|e| ParseError::Io {
        file: path.to_path_buf(),
        source: e,
    })?;
    parser::parse_price_list(BufReader::new(file), path, policy)
}
