// PriceLens - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading and logging initialisation
// 3. One catalog load, then searches, then one report export

use clap::Parser;
use pricelens::app::{ingest, prompt, report};
use pricelens::core::discovery::DiscoveryConfig;
use pricelens::core::model::RowPolicy;
use pricelens::platform::config::{self, AppConfig};
use pricelens::util::{self, constants, error::PriceLensError};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// PriceLens - price list search and report tool.
///
/// Loads every `*price*.csv` file in a directory, lets you search products
/// by name ordered by price per kilogram, and exports the full list sorted
/// by price.
#[derive(Parser, Debug)]
#[command(name = "PriceLens", version, about)]
struct Cli {
    /// Directory containing the price lists (default: current directory).
    path: Option<PathBuf>,

    /// Report file; .csv and .json select those formats, anything else is HTML.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Configuration file (default: platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Search phrase to run instead of the interactive prompt (repeatable).
    #[arg(short = 'q', long = "query")]
    queries: Vec<String>,

    /// Skip malformed rows instead of rejecting the whole file.
    #[arg(long)]
    lenient: bool,

    /// Stop at the first price list that cannot be loaded.
    #[arg(long = "fail-fast")]
    fail_fast: bool,

    /// Do not write a report at the end of the run.
    #[arg(long = "no-export")]
    no_export: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Configuration is read before logging so its level can take effect.
    let config_result = match cli.config.as_deref() {
        Some(path) => config::load_config(path, true),
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, false),
            None => Ok((AppConfig::default(), Vec::new())),
        },
    };

    let (app_config, config_warnings) = match config_result {
        Ok(loaded) => loaded,
        Err(e) => {
            util::logging::init(cli.debug, None);
            tracing::error!(error = %e, "Configuration could not be loaded");
            eprintln!("Error: {e}");
            return ExitCode::from(constants::EXIT_FATAL);
        }
    };

    util::logging::init(cli.debug, app_config.log_level.as_deref());
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Configuration warning");
    }

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "PriceLens starting"
    );

    match run(&cli, apply_overrides(&cli, app_config)) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Run aborted");
            eprintln!("Error: {e}");
            ExitCode::from(constants::EXIT_FATAL)
        }
    }
}

/// CLI flags take priority over config.toml values.
fn apply_overrides(cli: &Cli, mut config: AppConfig) -> AppConfig {
    if let Some(ref path) = cli.path {
        config.catalog_dir = path.clone();
    }
    if let Some(ref output) = cli.output {
        config.report_path = output.clone();
    }
    if cli.lenient {
        config.row_policy = RowPolicy::Lenient;
    }
    if cli.fail_fast {
        config.fail_fast = true;
    }
    config
}

/// Load once, search, export once.
fn run(cli: &Cli, config: AppConfig) -> Result<ExitCode, PriceLensError> {
    let load_config = ingest::LoadConfig {
        discovery: DiscoveryConfig {
            include_pattern: config.include_pattern.clone(),
        },
        row_policy: config.row_policy,
        fail_fast: config.fail_fast,
    };

    let loaded = ingest::load(&config.catalog_dir, &load_config)?;

    for warning in &loaded.warnings {
        tracing::warn!(warning = %warning, "Discovery warning");
    }
    for rejected in &loaded.rejected_files {
        eprintln!("Файл отклонён: {rejected}");
    }
    for row in &loaded.skipped_rows {
        eprintln!("Строка пропущена: {row}");
    }

    let catalog = &loaded.catalog;
    println!(
        "Данные загружены: {} позиций из {} файлов ({} строк)",
        catalog.len(),
        loaded.loaded_files.len(),
        loaded.rows_read()
    );
    if loaded.has_errors() {
        eprintln!(
            "Часть данных не загружена: отклонено файлов {}, пропущено строк {}",
            loaded.rejected_files.len(),
            loaded.skipped_rows.len()
        );
    }

    let stdout = io::stdout();
    let prompt_io = |e: io::Error| PriceLensError::Io {
        path: PathBuf::from("<stdio>"),
        operation: "search",
        source: e,
    };

    if cli.queries.is_empty() {
        prompt::run(catalog, io::stdin().lock(), stdout.lock()).map_err(prompt_io)?;
    } else {
        let mut out = stdout.lock();
        for query in &cli.queries {
            writeln!(out, "{}{query}", constants::SEARCH_PROMPT).map_err(prompt_io)?;
            prompt::answer(catalog, query, &mut out).map_err(prompt_io)?;
        }
    }

    if !cli.no_export {
        report::export(catalog, &config.report_path)?;
        println!(
            "Все позиции выгружены в файл: \"{}\"",
            config.report_path.display()
        );
    }

    if loaded.rejected_files.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::warn!(
            rejected = loaded.rejected_files.len(),
            "Some price lists were rejected"
        );
        Ok(ExitCode::from(constants::EXIT_REJECTED_FILES))
    }
}
