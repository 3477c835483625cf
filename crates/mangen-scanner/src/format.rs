//! Output formatting for scanned file paths.
//!
//! A [`PathFormatter`] turns a file path found on disk into the string that
//! goes into the manifest: relative to the strip prefix when the file lies
//! under it, absolute otherwise.

use std::fmt;
use std::path::{self, Path, PathBuf};

use camino::{Utf8Path, Utf8PathBuf};
use tracing::warn;

use crate::error::ScanError;

/// A formatted manifest path.
///
/// Falling back to an absolute path is an ordinary outcome (the file simply
/// isn't under the prefix), so both branches are plain values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedPath {
    /// The path relative to the strip prefix.
    Relative(Utf8PathBuf),
    /// The absolute path of the file.
    Absolute(Utf8PathBuf),
}

impl FormattedPath {
    /// Returns the formatted path.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Utf8Path {
        match self {
            Self::Relative(path) | Self::Absolute(path) => path,
        }
    }

    /// Returns `true` if the strip prefix was removed.
    #[inline]
    #[must_use]
    pub const fn is_relative(&self) -> bool {
        matches!(self, Self::Relative(_))
    }

    /// Consumes the value and returns the manifest line.
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::Relative(path) | Self::Absolute(path) => path.into_string(),
        }
    }
}

impl fmt::Display for FormattedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_path(), f)
    }
}

/// Expresses an absolute `path` relative to an absolute `prefix`.
///
/// Purely lexical: no filesystem access. A path equal to the prefix becomes
/// `.`.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use mangen_scanner::{relative_to, FormattedPath};
///
/// let path = Utf8Path::new("/a/b/c.png");
/// assert_eq!(relative_to(path, Utf8Path::new("/a")).as_path(), "b/c.png");
/// assert_eq!(relative_to(path, Utf8Path::new("/x")).as_path(), "/a/b/c.png");
/// ```
#[must_use]
pub fn relative_to(path: &Utf8Path, prefix: &Utf8Path) -> FormattedPath {
    match path.strip_prefix(prefix) {
        Ok(rel) if rel.as_str().is_empty() => FormattedPath::Relative(Utf8PathBuf::from(".")),
        Ok(rel) => FormattedPath::Relative(rel.to_owned()),
        Err(_) => FormattedPath::Absolute(path.to_owned()),
    }
}

/// Formats scanned file paths for the manifest.
///
/// The strip prefix is canonicalized once, up front. A prefix that can't be
/// canonicalized (usually because it doesn't exist) has nothing under it, so
/// every file formats as absolute.
#[derive(Debug, Clone, Default)]
pub struct PathFormatter {
    prefix: Option<Utf8PathBuf>,
}

impl PathFormatter {
    /// Creates a formatter for the given strip prefix.
    #[must_use]
    pub fn new(strip_prefix: Option<&Utf8Path>) -> Self {
        let prefix = strip_prefix.and_then(|prefix| match prefix.canonicalize_utf8() {
            Ok(canonical) => Some(canonical),
            Err(e) => {
                warn!(prefix = %prefix, error = %e, "Cannot resolve strip prefix, paths stay absolute");
                None
            }
        });

        Self { prefix }
    }

    /// Returns the canonical strip prefix, if one is active.
    #[inline]
    #[must_use]
    pub fn prefix(&self) -> Option<&Utf8Path> {
        self.prefix.as_deref()
    }

    /// Formats one file path.
    ///
    /// With a strip prefix the file is canonicalized and made relative to
    /// it when possible. Without one the file's absolute path is used as is
    /// (symlinks are not resolved).
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::NonUtf8Path`] if the resulting path is not UTF-8.
    pub fn format(&self, path: &Path) -> Result<FormattedPath, ScanError> {
        match &self.prefix {
            Some(prefix) => {
                let resolved = path.canonicalize().unwrap_or_else(|_| absolute(path));
                Ok(relative_to(&to_utf8(resolved)?, prefix))
            }
            None => Ok(FormattedPath::Absolute(to_utf8(absolute(path))?)),
        }
    }
}

/// Lexically absolute form of `path`, or the path itself if the current
/// directory is unavailable.
fn absolute(path: &Path) -> PathBuf {
    path::absolute(path).unwrap_or_else(|_| path.to_owned())
}

fn to_utf8(path: PathBuf) -> Result<Utf8PathBuf, ScanError> {
    Utf8PathBuf::from_path_buf(path).map_err(ScanError::NonUtf8Path)
}
