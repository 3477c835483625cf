//! Parallel directory scanner that collects dataset file paths.
//!
//! This crate walks the input directories of a [`ScanRequest`] and gathers
//! every file whose extension is allowed, formatted for the manifest.
//!
//! # Overview
//!
//! The main entry point is [`Scanner`], which combines:
//!
//! - [`DirectoryWalker`]: enumerates one directory with the `ignore` crate
//! - [`PathFormatter`]: strips the configured prefix from matched paths
//! - [`ResultCollection`]: the mutex-guarded list every worker appends to
//! - [`ScanStats`]: atomic counters reported once the scan is done
//!
//! # Example
//!
//! ```ignore
//! use mangen_core::ScanRequest;
//! use mangen_scanner::Scanner;
//!
//! let request = ScanRequest::new(vec!["./data".into()])?.with_recursive(true);
//! let result = Scanner::new(&request).scan()?;
//! println!("Matched {} files", result.paths.len());
//! ```
//!
//! # Architecture
//!
//! ```text
//! Scanner (orchestrator)
//!     │
//!     ├── sequential: one DirectoryWalker per input, in order
//!     │
//!     └── parallel: plan_tasks() -> rayon pool of `threads` workers
//!             │
//!             └── DirectoryWalker per task ──push──> ResultCollection (Mutex)
//! ```
//!
//! # Ordering
//!
//! A sequential scan yields input order, then filesystem enumeration order.
//! A parallel scan yields the same set of paths in no particular order.

#![deny(clippy::all)]
#![warn(missing_docs)]

mod collection;
mod error;
mod format;
mod stats;
mod walker;

pub use collection::ResultCollection;
pub use error::ScanError;
pub use format::{FormattedPath, PathFormatter, relative_to};
pub use stats::{ScanStats, StatsSnapshot};
pub use walker::DirectoryWalker;

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use mangen_core::ScanRequest;
use rayon::ThreadPoolBuilder;
use tracing::{debug, info, warn};

/// One unit of work for a scan worker: a directory and a recursion flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTask {
    /// Directory to enumerate.
    pub directory: Utf8PathBuf,
    /// Whether the worker descends into subdirectories.
    pub recursive: bool,
}

impl ScanTask {
    /// Creates a new scan task.
    #[must_use]
    pub fn new(directory: impl Into<Utf8PathBuf>, recursive: bool) -> Self {
        Self {
            directory: directory.into(),
            recursive,
        }
    }
}

/// Result of a scan operation.
#[derive(Debug)]
pub struct ScanResult {
    /// Formatted paths of every matched file.
    pub paths: Vec<String>,
    /// Statistics snapshot from the scan.
    pub stats: StatsSnapshot,
}

/// The scan orchestrator.
///
/// Picks sequential or parallel execution from the request's thread count,
/// runs every worker, and only returns once all of them are done.
///
/// # Failure isolation
///
/// Missing inputs and per-directory enumeration failures are logged and
/// counted, never returned: they only affect their own directory.
#[derive(Debug)]
pub struct Scanner<'a> {
    /// The scan request.
    request: &'a ScanRequest,
    /// Formatter built from the request's strip prefix.
    formatter: PathFormatter,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner for the given request.
    #[must_use]
    pub fn new(request: &'a ScanRequest) -> Self {
        Self {
            request,
            formatter: PathFormatter::new(request.strip_prefix()),
        }
    }

    /// Scans every input directory and returns the collected paths.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::ThreadPool`] if the worker pool can't be built.
    /// Nothing else is fatal.
    pub fn scan(&self) -> Result<ScanResult, ScanError> {
        let results = ResultCollection::new();
        let stats = ScanStats::new();

        if self.request.is_parallel() {
            self.scan_parallel(&results, &stats)?;
        } else {
            self.scan_sequential(&results, &stats);
        }

        let paths = results.into_paths();
        let stats = stats.snapshot();

        info!(
            files = paths.len(),
            tasks = stats.tasks,
            skipped = stats.directories_skipped,
            failed = stats.directories_failed,
            "Scan completed"
        );

        Ok(ScanResult { paths, stats })
    }

    /// Builds the task list used by a parallel scan.
    ///
    /// Missing inputs are skipped. A recursive request turns each input into
    /// one non-recursive task for the directory itself plus one recursive
    /// task per immediate subdirectory.
    pub fn plan_tasks(&self, stats: &ScanStats) -> Vec<ScanTask> {
        let mut tasks = Vec::new();

        for directory in self.existing_directories(stats) {
            if !self.request.recursive() {
                tasks.push(ScanTask::new(directory, false));
                continue;
            }

            match immediate_subdirectories(directory, stats) {
                Ok(subdirectories) => {
                    tasks.push(ScanTask::new(directory, false));
                    tasks.extend(
                        subdirectories
                            .into_iter()
                            .map(|sub| ScanTask::new(sub, true)),
                    );
                }
                Err(e) => {
                    warn!(error = %e, "Falling back to a single recursive task");
                    tasks.push(ScanTask::new(directory, true));
                }
            }
        }

        tasks
    }

    /// Runs one walker per input directory on the calling thread.
    fn scan_sequential(&self, results: &ResultCollection, stats: &ScanStats) {
        info!("Running in sequential mode");

        for directory in self.existing_directories(stats) {
            let task = ScanTask::new(directory, self.request.recursive());
            self.run_task(&task, results, stats);
        }
    }

    /// Fans tasks out over a dedicated pool and blocks until all finish.
    fn scan_parallel(&self, results: &ResultCollection, stats: &ScanStats) -> Result<(), ScanError> {
        let threads = self.request.threads().get();
        let tasks = self.plan_tasks(stats);

        info!(threads, tasks = tasks.len(), "Running in parallel mode");

        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("mangen-scan-{index}"))
            .build()?;

        pool.scope(|scope| {
            for task in &tasks {
                scope.spawn(move |_| self.run_task(task, results, stats));
            }
        });

        Ok(())
    }

    /// Runs a single task, logging rather than propagating failures.
    fn run_task(&self, task: &ScanTask, results: &ResultCollection, stats: &ScanStats) {
        stats.increment_tasks();

        let walker = DirectoryWalker::new(&task.directory, task.recursive);
        match walker.scan_into(self.request.extensions(), &self.formatter, results, stats) {
            Ok(matched) => {
                stats.increment_directories_scanned();
                debug!(
                    directory = %task.directory,
                    recursive = task.recursive,
                    matched,
                    "Scanned directory"
                );
            }
            Err(e) => {
                stats.increment_directories_failed();
                warn!(directory = %task.directory, error = %e, "Error scanning directory");
            }
        }
    }

    /// Input directories that exist, in order. Others are logged and counted.
    fn existing_directories<'s>(
        &'s self,
        stats: &'s ScanStats,
    ) -> impl Iterator<Item = &'s Utf8Path> + 's {
        self.request
            .directories()
            .iter()
            .map(Utf8PathBuf::as_path)
            .filter(move |directory| match check_directory(directory) {
                Ok(()) => true,
                Err(e) => {
                    stats.increment_directories_skipped();
                    warn!(error = %e, "Skipping input directory");
                    false
                }
            })
    }
}

/// Verifies that an input path exists and is a directory.
fn check_directory(directory: &Utf8Path) -> Result<(), ScanError> {
    match fs::metadata(directory) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(ScanError::NotADirectory(directory.to_owned())),
        Err(_) => Err(ScanError::NotFound(directory.to_owned())),
    }
}

/// Lists the immediate subdirectories of `directory`, without following
/// symlinks (the walker doesn't follow them either).
fn immediate_subdirectories(
    directory: &Utf8Path,
    stats: &ScanStats,
) -> Result<Vec<Utf8PathBuf>, ScanError> {
    let entries =
        fs::read_dir(directory).map_err(|e| ScanError::list_subdirectories(directory, e))?;

    let mut subdirectories = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ScanError::list_subdirectories(directory, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| ScanError::list_subdirectories(directory, e))?;
        if !file_type.is_dir() {
            continue;
        }

        match Utf8PathBuf::from_path_buf(entry.path()) {
            Ok(path) => subdirectories.push(path),
            Err(path) => {
                let err = ScanError::NonUtf8Path(path);
                stats.increment_paths_skipped();
                warn!(error = %err, "Skipping subdirectory");
            }
        }
    }

    Ok(subdirectories)
}
