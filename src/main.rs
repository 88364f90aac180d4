// logtrim - main.rs
//
// CLI entry point. Handles:
// 1. Argument parsing
// 2. Config file loading and logging initialisation
// 3. Timestamp pattern compilation (fail fast, before any text is read)
// 4. Window-size resolution (flag > environment > config file > disabled)
// 5. Dispatch to single-file or directory processing

use clap::Parser;
use std::path::PathBuf;

use logtrim::app::{pipeline, settings};
use logtrim::core::dedup::DedupConfig;
use logtrim::core::discovery::DiscoveryConfig;
use logtrim::core::matcher::TimestampMatcher;
use logtrim::platform;
use logtrim::util;
use logtrim::util::constants;

/// logtrim - timestamp-aware log deduplicator.
///
/// Collapses runs of log lines (or multi-line groups) that are identical
/// except for embedded timestamps/durations, keeping the newest occurrence.
/// When INPUT is a directory, every discovered log file beneath it is
/// deduplicated onto the mirrored path under OUTPUT.
#[derive(Parser, Debug)]
#[command(name = "logtrim", version, about)]
struct Cli {
    /// Input log file (or directory to process recursively).
    input: PathBuf,

    /// Output file (or directory root in directory mode).
    output: PathBuf,

    /// Regex for timestamps. Default matches ISO, abbreviated-month,
    /// bare-time, duration, and syslog forms.
    #[arg(long = "timestamp-regex")]
    timestamp_regex: Option<String>,

    /// Maximum block size for multi-pass deduplication. 0 disables.
    /// Falls back to LOGTRIM_WINDOW, then the config file; with none of
    /// them set, the input passes through unchanged.
    #[arg(long = "window-size")]
    window_size: Option<usize>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config is loaded before logging init so [logging] level can apply;
    // anything load_config traces before init is dropped, but its warnings
    // are carried back and logged below.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (app_config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, app_config.log_level.as_deref());

    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "logtrim starting"
    );

    // Compile the timestamp pattern first: a bad pattern must fail before
    // any input is read. Flag > config file > built-in default.
    let pattern = cli
        .timestamp_regex
        .as_deref()
        .or(app_config.timestamp_regex.as_deref())
        .unwrap_or(constants::DEFAULT_TIMESTAMP_PATTERN);

    let matcher = match TimestampMatcher::new(pattern) {
        Ok(m) => m,
        Err(e) => {
            tracing::error!(error = %e, "Timestamp pattern rejected");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    tracing::debug!(pattern = matcher.as_str(), "Timestamp pattern compiled");

    let env_window = std::env::var(constants::WINDOW_ENV_VAR).ok();
    let window_size =
        settings::resolve_window_size(cli.window_size, env_window.as_deref(), app_config.window_size);

    let dedup = if app_config.dedup_enabled {
        DedupConfig::new(matcher, window_size)
    } else {
        DedupConfig::disabled(matcher)
    };

    if !dedup.is_active() {
        tracing::info!("Deduplication disabled; input passes through unchanged");
    }

    let result = if cli.input.is_dir() {
        let discovery_config = DiscoveryConfig {
            max_depth: app_config.max_depth,
            max_files: app_config.max_files,
            include_patterns: app_config.include_patterns.clone(),
            exclude_patterns: app_config.exclude_patterns.clone(),
        };
        pipeline::process_tree(&cli.input, &cli.output, &dedup, &discovery_config).map(|report| {
            for warning in &report.warnings {
                eprintln!("Warning: {warning}");
            }
            for failure in &report.failures {
                eprintln!("Warning: {failure}");
            }
        })
    } else {
        pipeline::process_file(&cli.input, &cli.output, &dedup).map(|_| ())
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Run failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
