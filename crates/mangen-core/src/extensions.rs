//! File extension normalization and matching.
//!
//! User input like `png`, `.JPG` or `..webp` is normalized into a single
//! canonical form (`.png`, `.jpg`, `.webp`) so that matching a file reduces
//! to one set lookup.

use rustc_hash::FxHashSet;
use serde::{Serialize, Serializer};

/// Extensions collected when the user does not pass `--ext`.
pub const DEFAULT_EXTENSIONS: &[&str] = &["png", "jpeg", "jpg", "webp", "bmp"];

/// Normalizes one extension token to its lowercase, single-dot form.
///
/// Leading dots are stripped before the dot is re-added, so `..ext` never
/// appears.
///
/// # Examples
///
/// ```
/// use mangen_core::normalize_extension;
///
/// assert_eq!(normalize_extension("PNG"), ".png");
/// assert_eq!(normalize_extension(".jpg"), ".jpg");
/// assert_eq!(normalize_extension("..WebP"), ".webp");
/// ```
#[must_use]
pub fn normalize_extension(token: &str) -> String {
    format!(".{}", token.trim_start_matches('.').to_lowercase())
}

/// A set of normalized file extensions.
///
/// An empty set matches nothing.
///
/// # Examples
///
/// ```
/// use mangen_core::ExtensionSet;
///
/// let set = ExtensionSet::new(["PNG", ".png", "png"]);
/// assert_eq!(set.len(), 1);
/// assert!(set.matches("Png"));
/// assert!(!set.matches("gif"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionSet {
    extensions: FxHashSet<String>,
}

impl ExtensionSet {
    /// Builds a set from raw extension tokens, normalizing each one.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens.into_iter().collect()
    }

    /// Returns `true` if a file extension (as returned by
    /// [`Utf8Path::extension`](camino::Utf8Path::extension), without the dot)
    /// is in the set. Comparison is case-insensitive.
    ///
    /// An empty extension (a name ending in `.`) never matches.
    #[must_use]
    pub fn matches(&self, extension: &str) -> bool {
        if extension.is_empty() {
            return false;
        }
        self.extensions.contains(&normalize_extension(extension))
    }

    /// Returns `true` if the normalized token (e.g. `.png`) is in the set.
    #[inline]
    #[must_use]
    pub fn contains(&self, normalized: &str) -> bool {
        self.extensions.contains(normalized)
    }

    /// Returns the number of distinct extensions.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Returns `true` if the set is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Returns the normalized extensions in sorted order.
    #[must_use]
    pub fn sorted(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.extensions.iter().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExtensionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            extensions: iter
                .into_iter()
                .map(|token| normalize_extension(token.as_ref()))
                .collect(),
        }
    }
}

impl Serialize for ExtensionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.sorted())
    }
}
