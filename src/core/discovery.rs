// PriceLens - core/discovery.rs
//
// Price list discovery in a single catalog directory.
//
// Architecture note: this module uses `walkdir` for directory listing as an
// OS abstraction. It reads only directory entries, never file contents --
// that boundary is owned by the app layer (app::ingest).
//
// Listing is one level deep. Unreadable entries are non-fatal and collected
// as warnings; a missing or unusable root is fatal.

use crate::util::constants;
use crate::util::error::DiscoveryError;
use std::path::{Path, PathBuf};

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for a discovery operation.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Glob a file name MUST match to be treated as a price list.
    pub include_pattern: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            include_pattern: constants::DEFAULT_INCLUDE_PATTERN.to_string(),
        }
    }
}

// =============================================================================
// Discovery
// =============================================================================

/// List the price lists directly inside `root`, sorted by file name.
///
/// Only regular files (symlinks are followed) whose name matches the include
/// pattern are returned. Subdirectories are never descended into.
///
/// # Non-fatal errors
/// Entries that cannot be inspected are recorded as human-readable strings in
/// the returned warnings vector.
///
/// # Fatal errors
/// Returns `Err` only if the root itself is unusable (`RootNotFound`,
/// `NotADirectory`, `PermissionDenied`, `Traversal`). An invalid include
/// pattern is a warning and falls back to the default pattern.
pub fn discover_price_lists(
    root: &Path,
    config: &DiscoveryConfig,
) -> Result<(Vec<PathBuf>, Vec<String>), DiscoveryError> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(DiscoveryError::NotADirectory {
                path: root.to_path_buf(),
            })
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(DiscoveryError::PermissionDenied {
                path: root.to_path_buf(),
                source: e,
            })
        }
        Err(_) => {
            return Err(DiscoveryError::RootNotFound {
                path: root.to_path_buf(),
            })
        }
    }

    let mut warnings: Vec<String> = Vec::new();
    let pattern = compile_pattern(&config.include_pattern, &mut warnings);

    tracing::debug!(
        root = %root.display(),
        pattern = pattern.as_str(),
        "Discovery starting"
    );

    let walker = walkdir::WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    let mut files: Vec<PathBuf> = Vec::new();

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                // The root itself failing to open is fatal; a single entry is not.
                if e.depth() == 0 {
                    return Err(DiscoveryError::Traversal {
                        path: root.to_path_buf(),
                        source: e,
                    });
                }
                let path_str = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                let msg = format!("Cannot access '{path_str}': {e}");
                tracing::debug!(warning = %msg, "Discovery warning");
                warnings.push(msg);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n,
            None => {
                warnings.push(format!("Skipping '{}': non-UTF-8 filename", path.display()));
                continue;
            }
        };

        if !pattern.matches(file_name) {
            tracing::trace!(file = file_name, "Not matched by include pattern");
            continue;
        }

        files.push(path.to_path_buf());
    }

    tracing::debug!(
        files = files.len(),
        warnings = warnings.len(),
        "Discovery complete"
    );

    Ok((files, warnings))
}

/// Compile the include glob, falling back to the default on error.
fn compile_pattern(pattern: &str, warnings: &mut Vec<String>) -> glob::Pattern {
    match glob::Pattern::new(pattern) {
        Ok(compiled) => compiled,
        Err(e) => {
            tracing::warn!(pattern, error = %e, "Invalid include pattern, using default");
            warnings.push(format!(
                "Include pattern '{pattern}' is invalid ({e}); using '{}'",
                constants::DEFAULT_INCLUDE_PATTERN
            ));
            default_pattern()
        }
    }
}

fn default_pattern() -> glob::Pattern {
    glob::Pattern::new(constants::DEFAULT_INCLUDE_PATTERN).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_default_pattern_semantics() {
        let pat = default_pattern();
        assert!(pat.matches("price.csv"));
        assert!(pat.matches("price_list.csv"));
        assert!(pat.matches("shop_price_2.csv"));
        assert!(!pat.matches("Price_list.csv"));
        assert!(!pat.matches("price_list.txt"));
        assert!(!pat.matches("price_list.csv.bak"));
        assert!(!pat.matches("list.csv"));
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["price_b.csv", "price_a.csv", "notes.csv", "price.txt"] {
            fs::write(dir.path().join(name), "товар,цена,вес\n").unwrap();
        }
        fs::create_dir(dir.path().join("price_dir.csv")).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("price_c.csv"), "x").unwrap();

        let (files, warnings) =
            discover_price_lists(dir.path(), &DiscoveryConfig::default()).unwrap();
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(names(&files), vec!["price_a.csv", "price_b.csv"]);
    }

    #[test]
    fn test_discover_custom_pattern() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("stock.csv"), "").unwrap();
        fs::write(dir.path().join("price.csv"), "").unwrap();
        let config = DiscoveryConfig {
            include_pattern: "stock*.csv".to_string(),
        };
        let (files, _) = discover_price_lists(dir.path(), &config).unwrap();
        assert_eq!(names(&files), vec!["stock.csv"]);
    }

    #[test]
    fn test_invalid_pattern_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("price.csv"), "").unwrap();
        let config = DiscoveryConfig {
            include_pattern: "[".to_string(),
        };
        let (files, warnings) = discover_price_lists(dir.path(), &config).unwrap();
        assert_eq!(names(&files), vec!["price.csv"]);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result =
            discover_price_lists(&dir.path().join("absent"), &DiscoveryConfig::default());
        assert!(matches!(result, Err(DiscoveryError::RootNotFound { .. })));
    }

    #[test]
    fn test_file_root_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("price.csv");
        fs::write(&file, "").unwrap();
        let result = discover_price_lists(&file, &DiscoveryConfig::default());
        assert!(matches!(result, Err(DiscoveryError::NotADirectory { .. })));
    }
}
