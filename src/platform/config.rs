// PriceLens - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::model::RowPolicy;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Default location of config.toml, or `None` if no platform directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    match ProjectDirs::from("", "", constants::APP_ID) {
        Some(dirs) => {
            let path = dirs.config_dir().join(constants::CONFIG_FILE_NAME);
            tracing::debug!(path = %path.display(), "Platform config path resolved");
            Some(path)
        }
        None => {
            tracing::warn!("Could not determine platform config directory");
            None
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[catalog]` section.
    pub catalog: CatalogSection,
    /// `[export]` section.
    pub export: ExportSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[catalog]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    /// Directory scanned for price lists.
    pub directory: Option<String>,
    /// Filename glob selecting price lists.
    pub include_pattern: Option<String>,
    /// "strict" or "lenient".
    pub row_policy: Option<String>,
    /// Abort the whole load on the first bad file.
    pub fail_fast: Option<bool>,
}

/// `[export]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Report path; the extension selects HTML, CSV, or JSON.
    pub output: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- Catalog --
    pub catalog_dir: PathBuf,
    pub include_pattern: String,
    pub row_policy: RowPolicy,
    pub fail_fast: bool,

    // -- Export --
    pub report_path: PathBuf,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_dir: PathBuf::from(constants::DEFAULT_CATALOG_DIR),
            include_pattern: constants::DEFAULT_INCLUDE_PATTERN.to_string(),
            row_policy: RowPolicy::default(),
            fail_fast: false,
            report_path: PathBuf::from(constants::DEFAULT_REPORT_FILE),
            log_level: None,
        }
    }
}

/// Load and validate a config file.
///
/// With `required == false` a missing file yields defaults and no warnings
/// (first run). With `required == true` (an explicit `--config`) a missing
/// or unreadable file is an error. An unparseable file is always an error so
/// a typo never silently changes which files are loaded.
pub fn load_config(path: &Path, required: bool) -> Result<(AppConfig, Vec<String>), ConfigError> {
    if !required && !path.exists() {
        tracing::debug!(path = %path.display(), "No config.toml found; using defaults");
        return Ok((AppConfig::default(), Vec::new()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let raw: RawConfig = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), "Loaded config.toml");
    Ok(validate(raw))
}

/// Validate each field, accumulating a warning per rejected value.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- Catalog: directory --
    if let Some(dir) = raw.catalog.directory {
        if dir.trim().is_empty() {
            warnings.push(format!(
                "[catalog] directory is empty. Using default (\"{}\").",
                constants::DEFAULT_CATALOG_DIR
            ));
        } else {
            config.catalog_dir = PathBuf::from(dir);
        }
    }

    // -- Catalog: include_pattern --
    if let Some(pattern) = raw.catalog.include_pattern {
        if pattern.is_empty() || pattern.len() > constants::MAX_INCLUDE_PATTERN_LENGTH {
            warnings.push(format!(
                "[catalog] include_pattern must be 1-{} characters. Using default (\"{}\").",
                constants::MAX_INCLUDE_PATTERN_LENGTH,
                constants::DEFAULT_INCLUDE_PATTERN,
            ));
        } else if let Err(e) = glob::Pattern::new(&pattern) {
            warnings.push(format!(
                "[catalog] include_pattern = \"{pattern}\" is not a valid glob ({e}). \
                 Using default (\"{}\").",
                constants::DEFAULT_INCLUDE_PATTERN,
            ));
        } else {
            config.include_pattern = pattern;
        }
    }

    // -- Catalog: row_policy --
    if let Some(ref policy) = raw.catalog.row_policy {
        match RowPolicy::from_name(policy) {
            Some(p) => config.row_policy = p,
            None => warnings.push(format!(
                "[catalog] row_policy = \"{policy}\" is not recognised. \
                 Expected \"strict\" or \"lenient\". Using default (strict).",
            )),
        }
    }

    // -- Catalog: fail_fast --
    if let Some(fail_fast) = raw.catalog.fail_fast {
        config.fail_fast = fail_fast;
    }

    // -- Export: output --
    if let Some(output) = raw.export.output {
        if output.trim().is_empty() {
            warnings.push(format!(
                "[export] output is empty. Using default (\"{}\").",
                constants::DEFAULT_REPORT_FILE
            ));
        } else {
            config.report_path = PathBuf::from(output);
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}
