//! Error types for the mangen-core crate.
//!
//! This module provides the [`ConfigError`] type for configuration problems
//! detected before any scanning starts.

/// Errors that can occur while building and validating a run configuration.
///
/// Every variant is fatal: a configuration error aborts the run before any
/// directory is touched.
///
/// # Examples
///
/// ```
/// use mangen_core::ConfigError;
///
/// let error = ConfigError::SplitSumMismatch { sum: 1.1 };
/// assert!(error.to_string().contains("1.100"));
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A split ratio is not strictly between 0 and 1 (or is NaN).
    #[error("split ratio #{index} must be greater than 0 and less than 1 (got {value})")]
    SplitRatioOutOfRange {
        /// Position of the offending ratio.
        index: usize,
        /// The rejected value.
        value: f64,
    },

    /// The split ratios do not add up to 1.0 within tolerance.
    #[error("split ratios must sum to 1.0 (got {sum:.3})")]
    SplitSumMismatch {
        /// The actual sum of all ratios.
        sum: f64,
    },

    /// A split was requested with no ratios at all.
    #[error("at least one split ratio is required")]
    EmptySplit,

    /// No input directories were given.
    #[error("at least one input directory is required")]
    NoInputDirectories,

    /// A configuration option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },
}

impl ConfigError {
    /// Creates a new [`ConfigError::InvalidOption`] error.
    #[inline]
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }
}
