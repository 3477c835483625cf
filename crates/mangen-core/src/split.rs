//! Validated split ratios for partitioning a manifest.

use serde::Serialize;
use smallvec::SmallVec;

use crate::error::ConfigError;

/// How far the sum of split ratios may drift from exactly 1.0.
pub const SPLIT_SUM_TOLERANCE: f64 = 1e-5;

/// An ordered list of split ratios.
///
/// Each ratio is strictly between 0 and 1, and together they sum to 1.0
/// within [`SPLIT_SUM_TOLERANCE`]. Ratios are positional: the first is the
/// train split, the second validation, the third test.
///
/// # Examples
///
/// ```
/// use mangen_core::SplitSpec;
///
/// let split = SplitSpec::new(&[0.8, 0.2])?;
/// assert_eq!(split.len(), 2);
///
/// assert!(SplitSpec::new(&[0.5, 0.6]).is_err());
/// assert!(SplitSpec::new(&[0.0, 0.5, 0.5]).is_err());
/// # Ok::<(), mangen_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SplitSpec {
    ratios: SmallVec<[f64; 4]>,
}

impl SplitSpec {
    /// Validates and wraps a list of ratios.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptySplit`] if `ratios` is empty
    /// - [`ConfigError::SplitRatioOutOfRange`] if any ratio is not in `(0, 1)`
    /// - [`ConfigError::SplitSumMismatch`] if the ratios don't sum to 1.0
    pub fn new(ratios: &[f64]) -> Result<Self, ConfigError> {
        if ratios.is_empty() {
            return Err(ConfigError::EmptySplit);
        }

        // Written as a negated range check so NaN is rejected too.
        if let Some((index, &value)) = ratios
            .iter()
            .enumerate()
            .find(|&(_, &r)| !(r > 0.0 && r < 1.0))
        {
            return Err(ConfigError::SplitRatioOutOfRange { index, value });
        }

        let sum: f64 = ratios.iter().sum();
        if (sum - 1.0).abs() > SPLIT_SUM_TOLERANCE {
            return Err(ConfigError::SplitSumMismatch { sum });
        }

        Ok(Self {
            ratios: SmallVec::from_slice(ratios),
        })
    }

    /// Returns the ratios in order.
    #[inline]
    #[must_use]
    pub fn ratios(&self) -> &[f64] {
        &self.ratios
    }

    /// Returns the number of splits.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    /// Always `false`: a validated split has at least one ratio.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_splits() {
        assert!(SplitSpec::new(&[0.8, 0.2]).is_ok());
        assert!(SplitSpec::new(&[0.33, 0.33, 0.34]).is_ok());
        assert!(SplitSpec::new(&[0.25, 0.25, 0.25, 0.25]).is_ok());
    }

    #[test]
    fn test_sum_mismatch() {
        let err = SplitSpec::new(&[0.5, 0.6]).unwrap_err();
        assert!(matches!(err, ConfigError::SplitSumMismatch { .. }));
    }

    #[test]
    fn test_zero_ratio_rejected() {
        let err = SplitSpec::new(&[0.0, 0.5, 0.5]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::SplitRatioOutOfRange { index: 0, .. }
        ));
    }

    #[test]
    fn test_full_ratio_rejected() {
        let err = SplitSpec::new(&[1.0]).unwrap_err();
        assert!(matches!(err, ConfigError::SplitRatioOutOfRange { .. }));
    }

    #[test]
    fn test_nan_rejected() {
        let err = SplitSpec::new(&[f64::NAN, 0.5]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::SplitRatioOutOfRange { index: 0, .. }
        ));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            SplitSpec::new(&[]).unwrap_err(),
            ConfigError::EmptySplit
        ));
    }

    #[test]
    fn test_sum_within_tolerance() {
        assert!(SplitSpec::new(&[0.333_333, 0.333_333, 0.333_334]).is_ok());
        assert!(SplitSpec::new(&[0.7, 0.1, 0.1, 0.1]).is_ok());
    }

    #[test]
    fn test_serializes_as_list() {
        let split = SplitSpec::new(&[0.8, 0.2]).unwrap();
        let json = serde_json::to_string(&split).unwrap();
        assert_eq!(json, "[0.8,0.2]");
    }
}
