//! Scan statistics with atomic counters.
//!
//! This module provides [`ScanStats`], shared by every worker during a scan,
//! and [`StatsSnapshot`], the plain copy reported once the scan is done.
//!
//! # Thread Safety
//!
//! All counters use [`AtomicU64`] with [`Relaxed`](std::sync::atomic::Ordering::Relaxed)
//! ordering. The numbers are informational and are only read after the
//! worker pool has been joined.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Atomic counters for a single scan.
///
/// # Examples
///
/// ```
/// use mangen_scanner::ScanStats;
///
/// let stats = ScanStats::new();
/// stats.increment_tasks();
/// stats.increment_directories_scanned();
/// stats.increment_files_matched();
///
/// let snap = stats.snapshot();
/// assert_eq!(snap.files_matched, 1);
/// ```
#[derive(Debug, Default)]
pub struct ScanStats {
    /// Scan tasks executed.
    tasks: AtomicU64,
    /// Tasks that finished enumerating their directory.
    directories_scanned: AtomicU64,
    /// Input paths skipped because they are missing or not directories.
    directories_skipped: AtomicU64,
    /// Tasks cut short by an enumeration error.
    directories_failed: AtomicU64,
    /// Files appended to the result collection.
    files_matched: AtomicU64,
    /// Matching paths dropped because they are not valid UTF-8.
    paths_skipped: AtomicU64,
}

impl ScanStats {
    /// Creates a new [`ScanStats`] with all counters at zero.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the executed task counter.
    #[inline]
    pub fn increment_tasks(&self) {
        self.tasks.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the completed directory counter.
    #[inline]
    pub fn increment_directories_scanned(&self) {
        self.directories_scanned.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the skipped input counter.
    #[inline]
    pub fn increment_directories_skipped(&self) {
        self.directories_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the failed directory counter.
    #[inline]
    pub fn increment_directories_failed(&self) {
        self.directories_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the matched file counter.
    #[inline]
    pub fn increment_files_matched(&self) {
        self.files_matched.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the skipped path counter.
    #[inline]
    pub fn increment_paths_skipped(&self) {
        self.paths_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns a point-in-time snapshot of all statistics.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            tasks: self.tasks.load(Ordering::Relaxed),
            directories_scanned: self.directories_scanned.load(Ordering::Relaxed),
            directories_skipped: self.directories_skipped.load(Ordering::Relaxed),
            directories_failed: self.directories_failed.load(Ordering::Relaxed),
            files_matched: self.files_matched.load(Ordering::Relaxed),
            paths_skipped: self.paths_skipped.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of scan statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatsSnapshot {
    /// Scan tasks executed.
    pub tasks: u64,
    /// Tasks that finished enumerating their directory.
    pub directories_scanned: u64,
    /// Input paths skipped because they are missing or not directories.
    pub directories_skipped: u64,
    /// Tasks cut short by an enumeration error.
    pub directories_failed: u64,
    /// Files appended to the result collection.
    pub files_matched: u64,
    /// Matching paths dropped because they are not valid UTF-8.
    pub paths_skipped: u64,
}

impl StatsSnapshot {
    /// Returns `true` if every task ran to completion and no input or path
    /// was dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use mangen_scanner::StatsSnapshot;
    ///
    /// let snap = StatsSnapshot { tasks: 3, directories_scanned: 3, ..Default::default() };
    /// assert!(snap.is_clean());
    ///
    /// let snap = StatsSnapshot { directories_skipped: 1, ..snap };
    /// assert!(!snap.is_clean());
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.directories_skipped == 0 && self.directories_failed == 0 && self.paths_skipped == 0
    }
}
