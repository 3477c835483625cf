//! The shared, lock-protected list of matched paths.
//!
//! Every scan worker appends into a single [`ResultCollection`]. Appends take
//! the lock once per matching file; the orchestrator freezes the collection
//! with [`ResultCollection::into_paths`] once all workers have finished.

use parking_lot::Mutex;

/// An append-only list of formatted manifest paths.
///
/// Order is the append order, which is only deterministic when a single
/// thread does all the appending.
///
/// # Examples
///
/// ```
/// use mangen_scanner::ResultCollection;
///
/// let results = ResultCollection::new();
/// results.push("a.png".to_owned());
/// results.push("b.png".to_owned());
///
/// assert_eq!(results.into_paths(), vec!["a.png", "b.png"]);
/// ```
#[derive(Debug, Default)]
pub struct ResultCollection {
    paths: Mutex<Vec<String>>,
}

impl ResultCollection {
    /// Creates an empty collection.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one path.
    #[inline]
    pub fn push(&self, path: String) {
        self.paths.lock().push(path);
    }

    /// Returns the number of paths collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.lock().len()
    }

    /// Returns `true` if nothing has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.lock().is_empty()
    }

    /// Freezes the collection and returns its contents.
    #[must_use]
    pub fn into_paths(self) -> Vec<String> {
        self.paths.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_empty() {
        let results = ResultCollection::new();
        assert!(results.is_empty());
        assert!(results.into_paths().is_empty());
    }

    #[test]
    fn test_concurrent_appends_lose_nothing() {
        let results = ResultCollection::new();

        thread::scope(|s| {
            for worker in 0..8 {
                let results = &results;
                s.spawn(move || {
                    for i in 0..250 {
                        results.push(format!("{worker}/{i}.png"));
                    }
                });
            }
        });

        assert_eq!(results.len(), 2000);
        let mut paths = results.into_paths();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), 2000);
    }
}
