//! Error types for the mangen-scanner crate.
//!
//! This module provides the [`ScanError`] type for errors that can occur
//! while enumerating input directories.

use camino::Utf8PathBuf;

/// Errors that can occur during scanning operations.
///
/// # Error Recovery Strategy
///
/// Almost everything here is scoped to a single directory or file:
///
/// - **Missing inputs** ([`ScanError::NotFound`], [`ScanError::NotADirectory`]):
///   log warning, skip the input, continue with the rest
/// - **Walk errors** ([`ScanError::Walk`], [`ScanError::ListSubdirectories`]):
///   log warning, stop that directory, keep whatever it already produced
/// - **Non-UTF-8 paths** ([`ScanError::NonUtf8Path`]): log warning, skip file
/// - **Thread pool** ([`ScanError::ThreadPool`]): fatal, nothing can be scanned
///
/// # Examples
///
/// ```
/// use mangen_scanner::ScanError;
/// use camino::Utf8PathBuf;
///
/// let err = ScanError::NotFound(Utf8PathBuf::from("/missing"));
/// assert!(err.is_recoverable());
/// assert!(err.to_string().contains("/missing"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Enumerating a directory failed part-way through.
    #[error("failed to scan directory {directory}: {source}")]
    Walk {
        /// The directory whose scan was cut short.
        directory: Utf8PathBuf,
        /// The underlying walker error.
        #[source]
        source: ignore::Error,
    },

    /// Listing the immediate subdirectories of an input failed.
    #[error("failed to list subdirectories of {directory}: {source}")]
    ListSubdirectories {
        /// The input directory.
        directory: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An input directory does not exist.
    #[error("directory not found: {0}")]
    NotFound(Utf8PathBuf),

    /// An input path exists but is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(Utf8PathBuf),

    /// A path is not valid UTF-8 and cannot be written to a manifest.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),

    /// The worker pool could not be created.
    #[error("failed to build scan thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl ScanError {
    /// Creates a new [`ScanError::Walk`] error.
    #[inline]
    pub fn walk(directory: impl Into<Utf8PathBuf>, source: ignore::Error) -> Self {
        Self::Walk {
            directory: directory.into(),
            source,
        }
    }

    /// Creates a new [`ScanError::ListSubdirectories`] error.
    #[inline]
    pub fn list_subdirectories(directory: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::ListSubdirectories {
            directory: directory.into(),
            source,
        }
    }

    /// Returns `true` if this error is recoverable (scanning can continue).
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::ThreadPool(_))
    }

    /// Returns `true` if this error is fatal (the run should stop).
    #[inline]
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Returns the directory associated with this error, if any.
    #[must_use]
    pub fn directory(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::Walk { directory, .. } | Self::ListSubdirectories { directory, .. } => {
                Some(directory)
            }
            Self::NotFound(directory) | Self::NotADirectory(directory) => Some(directory),
            Self::NonUtf8Path(_) | Self::ThreadPool(_) => None,
        }
    }
}
