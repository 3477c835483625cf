//! Error types for the mangen-writer crate.

use camino::Utf8PathBuf;

/// Errors that can occur while writing manifest files.
///
/// Write failures are always fatal: a half-written split set is not a usable
/// dataset description.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// Creating, writing, or flushing a manifest file failed.
    #[error("failed to write manifest {path}: {source}")]
    Io {
        /// The manifest file being written.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl WriteError {
    /// Creates a new [`WriteError::Io`] error.
    #[inline]
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the manifest path associated with this error.
    #[must_use]
    pub const fn path(&self) -> &Utf8PathBuf {
        match self {
            Self::Io { path, .. } => path,
        }
    }
}
