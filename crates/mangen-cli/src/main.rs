//! CLI entry point for mangen.
//!
//! This binary scans dataset directories for files with the given extensions
//! and writes their paths to a manifest, optionally shuffled and split into
//! train/val/test subsets.
//!
//! # Usage
//!
//! ```bash
//! # All images directly inside two directories
//! mangen -i data/a data/b -o images.txt
//!
//! # Whole tree, 8 threads, paths relative to data/
//! mangen -i data -o lists/all.txt -r -t 8 --strip-prefix data
//!
//! # Shuffled 80/10/10 split into all_train.txt, all_val.txt, all_test.txt
//! mangen -i data -o all.txt -r --shuffle --split 0.8 0.1 0.1
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::Write;
use std::num::NonZeroUsize;

use camino::Utf8PathBuf;
use clap::Parser;
use mangen_core::{
    Config, ConfigError, DEFAULT_EXTENSIONS, ExtensionSet, OutputConfig, ScanRequest, SplitSpec,
};
use mangen_scanner::{Scanner, StatsSnapshot};
use mangen_writer::{ManifestWriter, WriteOutcome, WrittenManifest};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Fast and reliable manifest generator for ML/DL datasets.
///
/// Collects the paths of matching files under one or more directories into a
/// newline-delimited manifest.
#[derive(Debug, Parser)]
#[command(name = "mangen", version, about, long_about = None)]
struct Cli {
    /// Paths to one or more dataset directories.
    #[arg(short, long = "input-dir", required = true, num_args = 1..)]
    input_dir: Vec<Utf8PathBuf>,

    /// Path to the output manifest file.
    #[arg(short, long)]
    output_file: Utf8PathBuf,

    /// Search directories recursively.
    #[arg(short, long)]
    recursive: bool,

    /// Number of threads (1 keeps the output in sequential order).
    #[arg(short, long, default_value = "1", env = "MANGEN_THREADS")]
    threads: NonZeroUsize,

    /// File extensions to include.
    #[arg(
        short,
        long,
        num_args = 1..,
        default_values_t = DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect::<Vec<_>>()
    )]
    ext: Vec<String>,

    /// Write paths relative to this directory when files lie under it.
    #[arg(long)]
    strip_prefix: Option<Utf8PathBuf>,

    /// Shuffle the paths before saving.
    #[arg(long)]
    shuffle: bool,

    /// Seed for `--shuffle`, for a reproducible order.
    #[arg(long, requires = "shuffle")]
    seed: Option<u64>,

    /// Split ratios for train/val/test (e.g. 0.8 0.2).
    #[arg(long, num_args = 1.., allow_negative_numbers = true)]
    split: Option<Vec<f64>>,

    /// Print the run summary as JSON.
    #[arg(long)]
    json: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default. Logs go
/// to stderr so stdout only carries the summary.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},ignore=warn"))
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Builds a validated [`Config`] from CLI arguments.
///
/// Runs before any filesystem access, so a bad split aborts the run without
/// scanning anything.
fn build_config(cli: &Cli) -> Result<Config, ConfigError> {
    let split = cli.split.as_deref().map(SplitSpec::new).transpose()?;

    let scan = ScanRequest::new(cli.input_dir.clone())?
        .with_recursive(cli.recursive)
        .with_extensions(ExtensionSet::new(&cli.ext))
        .with_strip_prefix(cli.strip_prefix.clone())
        .with_threads(cli.threads);

    let output = OutputConfig::new(cli.output_file.clone())?
        .with_shuffle(cli.shuffle)
        .with_seed(cli.seed)
        .with_split(split);

    Ok(Config::new(scan, output))
}

// =============================================================================
// COMMAND IMPLEMENTATION
// =============================================================================

/// Everything a run produced, as reported to the user.
#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    config: &'a Config,
    stats: StatsSnapshot,
    manifests: Vec<WrittenManifest>,
    total: usize,
}

/// Scans the inputs and writes the manifest(s).
///
/// # Errors
///
/// Returns an error if the worker pool can't be built or a manifest can't be
/// written. Missing or unreadable input directories are not errors.
fn run(config: &Config) -> color_eyre::Result<RunSummary<'_>> {
    info!(
        directories = config.scan.directories().len(),
        recursive = config.scan.recursive(),
        threads = config.scan.threads().get(),
        "Starting scan"
    );

    let scan = Scanner::new(&config.scan).scan()?;
    let stats = scan.stats;
    let outcome = ManifestWriter::new(&config.output).write(scan.paths)?;

    let total = outcome.total();
    let manifests = match outcome {
        WriteOutcome::Empty => Vec::new(),
        WriteOutcome::Written(manifests) => manifests,
    };

    Ok(RunSummary {
        config,
        stats,
        manifests,
        total,
    })
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Prints the human-readable run summary.
fn print_summary(summary: &RunSummary<'_>) {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    if summary.manifests.is_empty() {
        let _ = writeln!(handle, "No valid files found! Manifest was not created.");
        return;
    }

    if summary.config.output.split().is_some() {
        for manifest in &summary.manifests {
            let name = manifest.path.file_name().unwrap_or(manifest.path.as_str());
            let _ = writeln!(handle, "Saved {} paths to {name}", manifest.count);
        }
    } else {
        for manifest in &summary.manifests {
            let name = manifest.path.file_name().unwrap_or(manifest.path.as_str());
            let _ = writeln!(handle, "Done! Saved {} paths to {name}", manifest.count);
        }
    }

    let stats = &summary.stats;
    if !stats.is_clean() {
        let _ = writeln!(
            handle,
            "Warnings: {} input(s) skipped, {} directory scan(s) failed, {} path(s) not UTF-8",
            stats.directories_skipped, stats.directories_failed, stats.paths_skipped
        );
    }
}

/// Prints the run summary as pretty JSON.
fn print_json_summary(summary: &RunSummary<'_>) -> color_eyre::Result<()> {
    let json = serde_json::to_string_pretty(summary)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to serialize JSON: {}", e))?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{json}")?;

    Ok(())
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    // 4. Validate configuration before touching the filesystem
    let config = build_config(&cli)?;

    // 5. Scan, write, report
    let summary = run(&config)?;
    if cli.json {
        print_json_summary(&summary)?;
    } else {
        print_summary(&summary);
    }

    Ok(())
}
