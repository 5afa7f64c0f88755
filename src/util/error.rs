// PriceLens - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Top-level error type for all PriceLens operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum PriceLensError {
    /// Configuration loading failed.
    Config(ConfigError),

    /// Catalog directory discovery failed.
    Discovery(DiscoveryError),

    /// A price list could not be parsed.
    Parse(ParseError),

    /// Report export failed.
    Export(ExportError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for PriceLensError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Discovery(e) => write!(f, "Discovery error: {e}"),
            Self::Parse(e) => write!(f, "Parse error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for PriceLensError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Discovery(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Discovery errors
// ---------------------------------------------------------------------------

/// Errors related to listing the catalog directory.
#[derive(Debug)]
pub enum DiscoveryError {
    /// The catalog directory does not exist.
    RootNotFound { path: PathBuf },

    /// The catalog path is not a directory.
    NotADirectory { path: PathBuf },

    /// Permission denied accessing the catalog directory.
    PermissionDenied { path: PathBuf, source: io::Error },

    /// Walkdir traversal error while listing the directory.
    Traversal {
        path: PathBuf,
        source: walkdir::Error,
    },
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotFound { path } => {
                write!(f, "Catalog directory '{}' does not exist", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "Catalog path '{}' is not a directory", path.display())
            }
            Self::PermissionDenied { path, source } => {
                write!(
                    f,
                    "Permission denied accessing '{}': {source}",
                    path.display()
                )
            }
            Self::Traversal { path, source } => {
                write!(f, "Error listing '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PermissionDenied { source, .. } => Some(source),
            Self::Traversal { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DiscoveryError> for PriceLensError {
    fn from(e: DiscoveryError) -> Self {
        Self::Discovery(e)
    }
}

// ---------------------------------------------------------------------------
// Record errors
// ---------------------------------------------------------------------------

/// Value-level violations raised while constructing a `PriceRecord`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordError {
    /// Weight is zero, so the unit price would be a division by zero.
    ZeroWeight,

    /// Weight is below zero.
    NegativeWeight { weight: f64 },

    /// Price is below zero.
    NegativePrice { price: f64 },

    /// Price or weight is NaN or infinite.
    NonFinite { field: &'static str },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroWeight => write!(f, "weight is zero, unit price is undefined"),
            Self::NegativeWeight { weight } => write!(f, "weight {weight} is negative"),
            Self::NegativePrice { price } => write!(f, "price {price} is negative"),
            Self::NonFinite { field } => write!(f, "{field} is not a finite number"),
        }
    }
}

impl std::error::Error for RecordError {}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// Errors related to price list parsing.
///
/// `line` is the 1-based line in the source file where the offending record
/// starts (the header row is line 1).
#[derive(Debug)]
pub enum ParseError {
    /// The CSV reader could not decode a record (bad UTF-8, I/O failure).
    Csv { file: PathBuf, source: csv::Error },

    /// A data row has fewer cells than the resolved column index requires.
    MissingCell {
        file: PathBuf,
        line: u64,
        column: &'static str,
    },

    /// A price or weight cell is not a decimal number.
    InvalidNumber {
        file: PathBuf,
        line: u64,
        column: &'static str,
        raw: String,
    },

    /// The parsed values violate a record invariant (zero weight etc.).
    InvalidRecord {
        file: PathBuf,
        line: u64,
        source: RecordError,
    },

    /// The price list could not be opened.
    Io { file: PathBuf, source: io::Error },
}

impl ParseError {
    /// Path of the price list the error belongs to.
    pub fn file(&self) -> &Path {
        match self {
            Self::Csv { file, .. }
            | Self::MissingCell { file, .. }
            | Self::InvalidNumber { file, .. }
            | Self::InvalidRecord { file, .. }
            | Self::Io { file, .. } => file.as_path(),
        }
    }

    /// Source line of the offending record, when one is known.
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::MissingCell { line, .. }
            | Self::InvalidNumber { line, .. }
            | Self::InvalidRecord { line, .. } => Some(*line),
            Self::Csv { source, .. } => source.position().map(|p| p.line()),
            Self::Io { .. } => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv { file, source } => {
                write!(f, "'{}': malformed CSV: {source}", file.display())
            }
            Self::MissingCell { file, line, column } => write!(
                f,
                "'{}' line {line}: row has no '{column}' cell",
                file.display()
            ),
            Self::InvalidNumber {
                file,
                line,
                column,
                raw,
            } => write!(
                f,
                "'{}' line {line}: {column} '{raw}' is not a decimal number",
                file.display()
            ),
            Self::InvalidRecord { file, line, source } => {
                write!(f, "'{}' line {line}: {source}", file.display())
            }
            Self::Io { file, source } => {
                write!(f, "'{}': I/O error: {source}", file.display())
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv { source, .. } => Some(source),
            Self::InvalidRecord { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ParseError> for PriceLensError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to report export.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the report.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for PriceLensError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for PriceLensError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for PriceLens results.
pub type Result<T> = std::result::Result<T, PriceLensError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_parse_error_reports_file_and_line() {
        let err = ParseError::InvalidNumber {
            file: PathBuf::from("price_1.csv"),
            line: 4,
            column: "price",
            raw: "abc".to_string(),
        };
        assert_eq!(err.line(), Some(4));
        assert_eq!(err.file(), Path::new("price_1.csv"));
        let msg = err.to_string();
        assert!(msg.contains("price_1.csv"), "{msg}");
        assert!(msg.contains("line 4"), "{msg}");
        assert!(msg.contains("'abc'"), "{msg}");
    }

    #[test]
    fn test_invalid_record_chains_source() {
        let err: PriceLensError = ParseError::InvalidRecord {
            file: PathBuf::from("price_2.csv"),
            line: 2,
            source: RecordError::ZeroWeight,
        }
        .into();
        let parse = err.source().expect("parse error source");
        let record = parse.source().expect("record error source");
        assert!(record.to_string().contains("zero"));
    }
}
