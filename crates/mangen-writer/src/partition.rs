//! Ratio-based partitioning and split file naming.
//!
//! A manifest of `total` paths is cut into contiguous slices, one per ratio.
//! Every slice but the last gets `floor(total * ratio)` paths; the last one
//! takes whatever remains, so rounding never drops or duplicates a path.

use std::borrow::Cow;
use std::ops::Range;

use camino::{Utf8Path, Utf8PathBuf};
use smallvec::SmallVec;

/// Labels for the first three splits, by position.
pub const SPLIT_LABELS: [&str; 3] = ["_train", "_val", "_test"];

/// Returns the file name label for split `index`.
///
/// # Examples
///
/// ```
/// use mangen_writer::split_label;
///
/// assert_eq!(split_label(0), "_train");
/// assert_eq!(split_label(2), "_test");
/// assert_eq!(split_label(3), "_split_3");
/// ```
#[must_use]
pub fn split_label(index: usize) -> Cow<'static, str> {
    SPLIT_LABELS
        .get(index)
        .map_or_else(|| Cow::Owned(format!("_split_{index}")), |label| Cow::Borrowed(*label))
}

/// Computes the slice of each split.
///
/// The ranges are contiguous, start at 0, and the last one always ends at
/// `total`. Ends are clamped to `total`.
///
/// # Examples
///
/// ```
/// use mangen_writer::partition_bounds;
///
/// let bounds = partition_bounds(10, &[0.8, 0.2]);
/// assert_eq!(bounds.as_slice(), &[0..8, 8..10]);
/// ```
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)] // Ratios are in (0, 1), so the product is a non-negative count <= total
pub fn partition_bounds(total: usize, ratios: &[f64]) -> SmallVec<[Range<usize>; 4]> {
    let mut bounds = SmallVec::with_capacity(ratios.len());
    let mut start = 0;

    for (index, ratio) in ratios.iter().enumerate() {
        let end = if index + 1 == ratios.len() {
            total
        } else {
            (start + (total as f64 * ratio).floor() as usize).min(total)
        };
        bounds.push(start..end);
        start = end;
    }

    bounds
}

/// Derives the file path for split `index` from the output path.
///
/// The label goes between the stem and the extension, in the same directory:
/// `out/list.txt` becomes `out/list_train.txt`.
#[must_use]
pub fn split_path(output: &Utf8Path, index: usize) -> Utf8PathBuf {
    let stem = output.file_stem().unwrap_or_default();
    let label = split_label(index);
    let name = match output.extension() {
        Some(extension) => format!("{stem}{label}.{extension}"),
        None => format!("{stem}{label}"),
    };
    output.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(total: usize, ratios: &[f64]) -> Vec<usize> {
        partition_bounds(total, ratios).iter().map(ExactSizeIterator::len).collect()
    }

    #[test]
    fn test_two_way_split() {
        assert_eq!(sizes(10, &[0.8, 0.2]), vec![8, 2]);
    }

    #[test]
    fn test_last_split_absorbs_remainder() {
        assert_eq!(sizes(100, &[0.33, 0.33, 0.34]), vec![33, 33, 34]);
        assert_eq!(sizes(7, &[0.5, 0.5]), vec![3, 4]);
        assert_eq!(sizes(10, &[0.34, 0.33, 0.33]), vec![3, 3, 4]);
    }

    #[test]
    fn test_bounds_cover_everything_once() {
        for total in [0, 1, 2, 3, 10, 99, 1000] {
            let bounds = partition_bounds(total, &[0.7, 0.15, 0.1, 0.05]);
            assert_eq!(bounds.len(), 4);
            assert_eq!(bounds[0].start, 0);
            assert_eq!(bounds[3].end, total);
            for pair in bounds.windows(2) {
                assert_eq!(pair[0].end, pair[1].start);
            }
        }
    }

    #[test]
    fn test_tiny_total_yields_empty_slices() {
        assert_eq!(sizes(1, &[0.5, 0.5]), vec![0, 1]);
    }

    #[test]
    fn test_split_labels() {
        let labels: Vec<_> = (0..5).map(split_label).collect();
        assert_eq!(labels, vec!["_train", "_val", "_test", "_split_3", "_split_4"]);
    }

    #[test]
    fn test_split_path() {
        let output = Utf8Path::new("out/list.txt");
        assert_eq!(split_path(output, 0), Utf8PathBuf::from("out/list_train.txt"));
        assert_eq!(split_path(output, 1), Utf8PathBuf::from("out/list_val.txt"));
        assert_eq!(split_path(output, 4), Utf8PathBuf::from("out/list_split_4.txt"));
    }

    #[test]
    fn test_split_path_without_extension() {
        assert_eq!(
            split_path(Utf8Path::new("manifest"), 2),
            Utf8PathBuf::from("manifest_test")
        );
    }

    #[test]
    fn test_split_path_keeps_only_last_extension() {
        assert_eq!(
            split_path(Utf8Path::new("data.tar.lst"), 0),
            Utf8PathBuf::from("data.tar_train.lst")
        );
    }
}
