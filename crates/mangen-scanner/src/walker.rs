//! Single-directory scan worker.
//!
//! This module provides [`DirectoryWalker`], which enumerates one directory
//! (recursively or only its immediate children) with the `ignore` crate and
//! appends every matching file to a shared [`ResultCollection`].
//!
//! # Filtering
//!
//! - Only regular files are considered (a symlink to a regular file counts)
//! - The file's extension must be in the request's [`ExtensionSet`]
//! - Hidden files and `.gitignore`d files are included: a manifest lists
//!   what is on disk
//! - Symlinked directories are not descended into
//! - An unreadable directory below the root is skipped; its siblings are
//!   still walked
//!
//! # Examples
//!
//! ```ignore
//! use mangen_scanner::{DirectoryWalker, PathFormatter, ResultCollection, ScanStats};
//!
//! let results = ResultCollection::new();
//! let stats = ScanStats::new();
//! let walker = DirectoryWalker::new(Utf8Path::new("./data"), true);
//! walker.scan_into(&extensions, &PathFormatter::default(), &results, &stats)?;
//! ```

use std::ffi::OsStr;

use camino::{Utf8Path, Utf8PathBuf};
use ignore::{DirEntry, WalkBuilder};
use mangen_core::ExtensionSet;
use tracing::warn;

use crate::collection::ResultCollection;
use crate::error::ScanError;
use crate::format::PathFormatter;
use crate::stats::ScanStats;

/// Enumerates one directory and collects matching files.
#[derive(Debug, Clone)]
pub struct DirectoryWalker {
    /// The directory to enumerate.
    root: Utf8PathBuf,
    /// Whether to descend into subdirectories.
    recursive: bool,
}

impl DirectoryWalker {
    /// Creates a walker for `root`.
    #[must_use]
    pub fn new(root: &Utf8Path, recursive: bool) -> Self {
        Self {
            root: root.to_owned(),
            recursive,
        }
    }

    /// Walks the directory and appends every matching file to `results`.
    ///
    /// Each match takes the collection lock once. Files whose formatted path
    /// is not UTF-8 are skipped with a warning and counted in `stats`.
    /// A subdirectory that can't be read is logged, counted as failed, and
    /// left out; the rest of the tree is still walked.
    ///
    /// # Returns
    ///
    /// The number of paths appended.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Walk`] if the root itself can't be enumerated.
    /// Paths appended before the failure stay in `results`.
    pub fn scan_into(
        &self,
        extensions: &ExtensionSet,
        formatter: &PathFormatter,
        results: &ResultCollection,
        stats: &ScanStats,
    ) -> Result<usize, ScanError> {
        let mut matched = 0;

        for entry in self.build_walker() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth().is_some_and(|depth| depth > 0) => {
                    stats.increment_directories_failed();
                    warn!(directory = %self.root, error = %err, "Skipping unreadable subdirectory");
                    continue;
                }
                Err(source) => return Err(ScanError::walk(&self.root, source)),
            };

            if !is_regular_file(&entry) {
                continue;
            }

            let path = entry.path();
            let Some(extension) = path.extension().and_then(OsStr::to_str) else {
                continue;
            };
            if !extensions.matches(extension) {
                continue;
            }

            match formatter.format(path) {
                Ok(formatted) => {
                    results.push(formatted.into_string());
                    stats.increment_files_matched();
                    matched += 1;
                }
                Err(e) => {
                    stats.increment_paths_skipped();
                    warn!(directory = %self.root, error = %e, "Skipping file");
                }
            }
        }

        Ok(matched)
    }

    /// Builds the ignore walker with every filter switched off.
    fn build_walker(&self) -> ignore::Walk {
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .standard_filters(false)
            .follow_links(false)
            .threads(1);

        if !self.recursive {
            builder.max_depth(Some(1));
        }

        builder.build()
    }
}

/// Regular files, plus symlinks that resolve to regular files.
fn is_regular_file(entry: &DirEntry) -> bool {
    entry.file_type().is_some_and(|ft| {
        ft.is_file() || (ft.is_symlink() && entry.path().is_file())
    })
}
