// PriceLens - util/logging.rs
//
// Diagnostics go to stderr through `tracing`; stdout carries only the search
// listing and the load summary.
//
// Level sources, highest priority first:
//   RUST_LOG > --debug > [logging] level in config.toml > "info"

use super::constants;
use tracing_subscriber::EnvFilter;

/// Where the active filter came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSource {
    Environment,
    DebugFlag,
    Config,
    Default,
}

/// Pick the filter directive from the available sources.
///
/// `env` is the raw value of RUST_LOG, if set.
pub fn select_directive(
    env: Option<String>,
    debug_flag: bool,
    config_level: Option<&str>,
) -> (String, LevelSource) {
    match (env, debug_flag, config_level) {
        (Some(directive), _, _) => (directive, LevelSource::Environment),
        (None, true, _) => ("debug".to_string(), LevelSource::DebugFlag),
        (None, false, Some(level)) => (level.to_string(), LevelSource::Config),
        (None, false, None) => (
            constants::DEFAULT_LOG_LEVEL.to_string(),
            LevelSource::Default,
        ),
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (directive, source) = select_directive(env, debug_flag, config_level);

    // An unparsable RUST_LOG falls back to the default level instead of
    // silencing everything.
    let filter = EnvFilter::try_new(&directive)
        .unwrap_or_else(|_| EnvFilter::new(constants::DEFAULT_LOG_LEVEL));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(debug_flag)
        .with_file(debug_flag)
        .with_line_number(debug_flag)
        .compact()
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(
            app = constants::APP_NAME,
            version = constants::APP_VERSION,
            filter = %directive,
            source = ?source,
            "Logging initialised"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_wins() {
        let (directive, source) =
            select_directive(Some("pricelens=trace".into()), true, Some("warn"));
        assert_eq!(directive, "pricelens=trace");
        assert_eq!(source, LevelSource::Environment);
    }

    #[test]
    fn test_debug_flag_beats_config() {
        assert_eq!(
            select_directive(None, true, Some("warn")),
            ("debug".to_string(), LevelSource::DebugFlag)
        );
    }

    #[test]
    fn test_config_then_default() {
        assert_eq!(
            select_directive(None, false, Some("warn")),
            ("warn".to_string(), LevelSource::Config)
        );
        assert_eq!(
            select_directive(None, false, None),
            ("info".to_string(), LevelSource::Default)
        );
    }
}
