// PriceLens - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "PriceLens";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "PriceLens";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the optional configuration file inside the platform config dir.
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Catalog loading
// =============================================================================

/// Directory scanned for price lists when neither CLI nor config names one.
pub const DEFAULT_CATALOG_DIR: &str = ".";

/// Filename glob a candidate price list must match.
///
/// Equivalent to "name contains `price` and ends with `.csv`"; matching is
/// case-sensitive.
pub const DEFAULT_INCLUDE_PATTERN: &str = "*price*.csv";

/// Maximum length of a user-supplied include pattern.
pub const MAX_INCLUDE_PATTERN_LENGTH: usize = 256;

// =============================================================================
// Report export
// =============================================================================

/// Report file written at the end of a run, relative to the working directory.
pub const DEFAULT_REPORT_FILE: &str = "output.html";

/// Title of the HTML report document.
pub const REPORT_TITLE: &str = "Позиции продуктов";

// =============================================================================
// Interactive prompt
// =============================================================================

/// Prompt printed before each search phrase is read.
pub const SEARCH_PROMPT: &str = "Поиск: ";

/// Phrase that ends the interactive loop (compared case-insensitively).
pub const EXIT_COMMAND: &str = "exit";

/// Column widths of the fixed-width result listing.
pub const LISTING_INDEX_WIDTH: usize = 3;
pub const LISTING_NAME_WIDTH: usize = 40;
pub const LISTING_PRICE_WIDTH: usize = 15;
pub const LISTING_WEIGHT_WIDTH: usize = 15;
pub const LISTING_FILE_WIDTH: usize = 20;

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, --debug, nor config set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Process exit codes
// =============================================================================

/// A fatal error stopped the run.
pub const EXIT_FATAL: u8 = 1;

/// The run completed but at least one price list was rejected.
pub const EXIT_REJECTED_FILES: u8 = 2;
