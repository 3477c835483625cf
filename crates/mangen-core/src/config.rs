//! Run configuration for mangen.
//!
//! This module provides the configuration types handed to each component:
//!
//! - [`ScanRequest`] - what to scan and how (directories, recursion, filter, threads)
//! - [`OutputConfig`] - where and how to write the manifest
//! - [`Config`] - root configuration combining both
//!
//! Both parts are immutable once built: builder methods consume `self` and
//! components only ever receive shared references. Configuration is never
//! loaded from disk; it is assembled from CLI flags and serialized only to
//! echo the effective settings in the run summary.

use std::num::NonZeroUsize;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

use crate::error::ConfigError;
use crate::extensions::{DEFAULT_EXTENSIONS, ExtensionSet};
use crate::split::SplitSpec;

/// Describes a scan: which directories, which files, how many threads.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
/// use camino::Utf8PathBuf;
/// use mangen_core::ScanRequest;
///
/// let request = ScanRequest::new(vec![Utf8PathBuf::from("./data")])?
///     .with_recursive(true)
///     .with_threads(NonZeroUsize::new(4).unwrap_or(NonZeroUsize::MIN));
///
/// assert!(request.is_parallel());
/// assert_eq!(request.extensions().len(), 5);
/// # Ok::<(), mangen_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanRequest {
    directories: Vec<Utf8PathBuf>,
    recursive: bool,
    extensions: ExtensionSet,
    strip_prefix: Option<Utf8PathBuf>,
    threads: NonZeroUsize,
}

impl ScanRequest {
    /// Creates a sequential, non-recursive request with the default
    /// extension set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoInputDirectories`] if `directories` is empty.
    pub fn new(directories: Vec<Utf8PathBuf>) -> Result<Self, ConfigError> {
        if directories.is_empty() {
            return Err(ConfigError::NoInputDirectories);
        }

        Ok(Self {
            directories,
            recursive: false,
            extensions: ExtensionSet::new(DEFAULT_EXTENSIONS),
            strip_prefix: None,
            threads: NonZeroUsize::MIN,
        })
    }

    /// Sets whether directories are scanned recursively.
    #[must_use]
    pub const fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Replaces the extension filter.
    #[must_use]
    pub fn with_extensions(mut self, extensions: ExtensionSet) -> Self {
        self.extensions = extensions;
        self
    }

    /// Sets the prefix stripped from output paths.
    #[must_use]
    pub fn with_strip_prefix(mut self, prefix: Option<Utf8PathBuf>) -> Self {
        self.strip_prefix = prefix;
        self
    }

    /// Sets the worker thread count. One thread means a sequential scan.
    #[must_use]
    pub const fn with_threads(mut self, threads: NonZeroUsize) -> Self {
        self.threads = threads;
        self
    }

    /// Input directories, in the order given.
    #[inline]
    #[must_use]
    pub fn directories(&self) -> &[Utf8PathBuf] {
        &self.directories
    }

    /// Whether directories are scanned recursively.
    #[inline]
    #[must_use]
    pub const fn recursive(&self) -> bool {
        self.recursive
    }

    /// The extension filter.
    #[inline]
    #[must_use]
    pub const fn extensions(&self) -> &ExtensionSet {
        &self.extensions
    }

    /// The prefix stripped from output paths, if any.
    #[inline]
    #[must_use]
    pub fn strip_prefix(&self) -> Option<&Utf8Path> {
        self.strip_prefix.as_deref()
    }

    /// Number of worker threads.
    #[inline]
    #[must_use]
    pub const fn threads(&self) -> NonZeroUsize {
        self.threads
    }

    /// Returns `true` if the scan fans out over a worker pool.
    #[inline]
    #[must_use]
    pub const fn is_parallel(&self) -> bool {
        self.threads.get() > 1
    }
}

/// Describes where and how the manifest is written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputConfig {
    path: Utf8PathBuf,
    shuffle: bool,
    seed: Option<u64>,
    split: Option<SplitSpec>,
}

impl OutputConfig {
    /// Creates an unshuffled, unsplit output targeting `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if `path` has no file name
    /// (e.g. `/` or `..`), since split file names are derived from it.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        if path.file_name().is_none() {
            return Err(ConfigError::invalid_option(
                "output_file",
                format!("'{path}' has no file name"),
            ));
        }

        Ok(Self {
            path,
            shuffle: false,
            seed: None,
            split: None,
        })
    }

    /// Sets whether paths are shuffled before writing.
    #[must_use]
    pub const fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Seeds the shuffle so it is reproducible.
    #[must_use]
    pub const fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Splits the manifest into several files by ratio.
    #[must_use]
    pub fn with_split(mut self, split: Option<SplitSpec>) -> Self {
        self.split = split;
        self
    }

    /// The manifest path (or the template for split file names).
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Whether paths are shuffled before writing.
    #[inline]
    #[must_use]
    pub const fn shuffle(&self) -> bool {
        self.shuffle
    }

    /// The shuffle seed, if any.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// The split ratios, if the manifest is split.
    #[inline]
    #[must_use]
    pub const fn split(&self) -> Option<&SplitSpec> {
        self.split.as_ref()
    }
}

/// Root configuration for a mangen run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    /// Scanner configuration.
    pub scan: ScanRequest,

    /// Output configuration.
    pub output: OutputConfig,
}

impl Config {
    /// Combines a scan request and an output configuration.
    #[must_use]
    pub const fn new(scan: ScanRequest, output: OutputConfig) -> Self {
        Self { scan, output }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_request_defaults() {
        let request = ScanRequest::new(vec![Utf8PathBuf::from("data")]).unwrap();
        assert_eq!(request.directories(), &[Utf8PathBuf::from("data")]);
        assert!(!request.recursive());
        assert!(!request.is_parallel());
        assert_eq!(request.threads().get(), 1);
        assert!(request.strip_prefix().is_none());
        assert_eq!(
            request.extensions().sorted(),
            vec![".bmp", ".jpeg", ".jpg", ".png", ".webp"]
        );
    }

    #[test]
    fn test_scan_request_requires_directories() {
        let err = ScanRequest::new(Vec::new()).unwrap_err();
        assert!(matches!(err, ConfigError::NoInputDirectories));
    }

    #[test]
    fn test_scan_request_builders() {
        let request = ScanRequest::new(vec![Utf8PathBuf::from("a"), Utf8PathBuf::from("b")])
            .unwrap()
            .with_recursive(true)
            .with_extensions(ExtensionSet::new(["txt"]))
            .with_strip_prefix(Some(Utf8PathBuf::from("/data")))
            .with_threads(NonZeroUsize::new(8).unwrap());

        assert!(request.recursive());
        assert!(request.is_parallel());
        assert_eq!(request.threads().get(), 8);
        assert_eq!(request.strip_prefix(), Some(Utf8Path::new("/data")));
        assert!(request.extensions().matches("TXT"));
        assert!(!request.extensions().matches("png"));
    }

    #[test]
    fn test_output_config_defaults() {
        let output = OutputConfig::new("out/manifest.txt").unwrap();
        assert_eq!(output.path(), Utf8Path::new("out/manifest.txt"));
        assert!(!output.shuffle());
        assert!(output.seed().is_none());
        assert!(output.split().is_none());
    }

    #[test]
    fn test_output_config_rejects_pathless_target() {
        assert!(OutputConfig::new("/").is_err());
        assert!(OutputConfig::new("..").is_err());
    }

    #[test]
    fn test_config_serialization() {
        let scan = ScanRequest::new(vec![Utf8PathBuf::from("data")])
            .unwrap()
            .with_extensions(ExtensionSet::new(["png"]));
        let output = OutputConfig::new("list.txt")
            .unwrap()
            .with_shuffle(true)
            .with_seed(Some(7))
            .with_split(Some(SplitSpec::new(&[0.8, 0.2]).unwrap()));

        let value = serde_json::to_value(Config::new(scan, output)).unwrap();
        assert_eq!(value["scan"]["directories"][0], "data");
        assert_eq!(value["scan"]["extensions"][0], ".png");
        assert_eq!(value["scan"]["threads"], 1);
        assert_eq!(value["output"]["path"], "list.txt");
        assert_eq!(value["output"]["seed"], 7);
        assert_eq!(value["output"]["split"][1], 0.2);
    }
}
