//! Shuffles, splits, and writes mangen manifest files.
//!
//! The writer consumes the frozen list of scanned paths exactly once:
//!
//! 1. An empty list writes nothing and reports [`WriteOutcome::Empty`]
//! 2. With shuffling enabled the list is permuted in place
//! 3. With a split, contiguous slices go to `{stem}_train{ext}`,
//!    `{stem}_val{ext}`, `{stem}_test{ext}`, then `{stem}_split_{i}{ext}`
//! 4. Without one, everything goes to the output path
//!
//! Every file holds one path per line, each line ending in `\n`.

#![deny(clippy::all)]
#![warn(missing_docs)]

mod error;
mod partition;

pub use error::WriteError;
pub use partition::{SPLIT_LABELS, partition_bounds, split_label, split_path};

use std::fs::File;
use std::io::{BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use mangen_core::OutputConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::info;

/// One manifest file that was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenManifest {
    /// Where the file was written.
    pub path: Utf8PathBuf,
    /// Number of paths in it.
    pub count: usize,
}

/// What the writer did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// No paths were given, so no file was created.
    Empty,
    /// One file per split (or a single file without a split).
    Written(Vec<WrittenManifest>),
}

impl WriteOutcome {
    /// The manifests written, in split order.
    #[must_use]
    pub fn manifests(&self) -> &[WrittenManifest] {
        match self {
            Self::Empty => &[],
            Self::Written(manifests) => manifests,
        }
    }

    /// Total number of paths written across all files.
    #[must_use]
    pub fn total(&self) -> usize {
        self.manifests().iter().map(|m| m.count).sum()
    }

    /// Returns `true` if nothing was written.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Writes manifests according to an [`OutputConfig`].
///
/// # Examples
///
/// ```ignore
/// use mangen_core::{OutputConfig, SplitSpec};
/// use mangen_writer::ManifestWriter;
///
/// let config = OutputConfig::new("lists/images.txt")?
///     .with_shuffle(true)
///     .with_split(Some(SplitSpec::new(&[0.8, 0.2])?));
///
/// let outcome = ManifestWriter::new(&config).write(paths)?;
/// for manifest in outcome.manifests() {
///     println!("{}: {}", manifest.path, manifest.count);
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ManifestWriter<'a> {
    config: &'a OutputConfig,
}

impl<'a> ManifestWriter<'a> {
    /// Creates a writer for the given output configuration.
    #[must_use]
    pub const fn new(config: &'a OutputConfig) -> Self {
        Self { config }
    }

    /// Shuffles (if configured), partitions (if configured), and writes.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Io`] if any manifest file can't be created or
    /// written. Files written before the failure are left in place.
    pub fn write(&self, mut paths: Vec<String>) -> Result<WriteOutcome, WriteError> {
        if paths.is_empty() {
            info!("No valid files found, manifest was not created");
            return Ok(WriteOutcome::Empty);
        }

        if self.config.shuffle() {
            info!(count = paths.len(), seed = ?self.config.seed(), "Shuffling paths");
            self.shuffle(&mut paths);
        }

        let manifests = match self.config.split() {
            Some(split) => partition_bounds(paths.len(), split.ratios())
                .into_iter()
                .enumerate()
                .map(|(index, range)| {
                    let path = split_path(self.config.path(), index);
                    write_lines(&path, &paths[range])
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => vec![write_lines(self.config.path(), &paths)?],
        };

        Ok(WriteOutcome::Written(manifests))
    }

    /// Permutes `paths` in place, reproducibly when a seed is configured.
    fn shuffle(&self, paths: &mut [String]) {
        match self.config.seed() {
            Some(seed) => paths.shuffle(&mut StdRng::seed_from_u64(seed)),
            None => paths.shuffle(&mut rand::rng()),
        }
    }
}

/// Writes `lines` to `path`, one per line with a trailing newline.
fn write_lines(path: &Utf8Path, lines: &[String]) -> Result<WrittenManifest, WriteError> {
    let file = File::create(path).map_err(|e| WriteError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    for line in lines {
        writeln!(writer, "{line}").map_err(|e| WriteError::io(path, e))?;
    }
    writer.flush().map_err(|e| WriteError::io(path, e))?;

    info!(count = lines.len(), path = %path, "Saved paths");

    Ok(WrittenManifest {
        path: path.to_owned(),
        count: lines.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use mangen_core::SplitSpec;
    use tempfile::TempDir;

    fn paths(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("images/{i:03}.png")).collect()
    }

    fn output_in(temp: &TempDir, name: &str) -> Utf8PathBuf {
        Utf8Path::from_path(temp.path())
            .expect("Invalid path")
            .join(name)
    }

    fn read_lines(path: &Utf8Path) -> Vec<String> {
        fs::read_to_string(path)
            .expect("Failed to read manifest")
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn test_empty_writes_nothing() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let output = output_in(&temp, "list.txt");
        let config = OutputConfig::new(output.clone()).expect("Invalid output");

        let outcome = ManifestWriter::new(&config).write(Vec::new()).expect("Write failed");

        assert!(outcome.is_empty());
        assert_eq!(outcome.total(), 0);
        assert!(!output.exists());
    }

    #[test]
    fn test_single_manifest_has_trailing_newline() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let output = output_in(&temp, "list.txt");
        let config = OutputConfig::new(output.clone()).expect("Invalid output");

        let outcome = ManifestWriter::new(&config)
            .write(vec!["a.png".to_owned(), "b/c.png".to_owned()])
            .expect("Write failed");

        assert_eq!(
            outcome.manifests(),
            &[WrittenManifest {
                path: output.clone(),
                count: 2
            }]
        );
        let content = fs::read_to_string(&output).expect("Failed to read manifest");
        assert_eq!(content, "a.png\nb/c.png\n");
    }

    #[test]
    fn test_split_eighty_twenty() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let config = OutputConfig::new(output_in(&temp, "list.txt"))
            .expect("Invalid output")
            .with_split(Some(SplitSpec::new(&[0.8, 0.2]).expect("Invalid split")));

        let outcome = ManifestWriter::new(&config).write(paths(10)).expect("Write failed");

        let counts: Vec<_> = outcome.manifests().iter().map(|m| m.count).collect();
        assert_eq!(counts, vec![8, 2]);

        let train = read_lines(&output_in(&temp, "list_train.txt"));
        let val = read_lines(&output_in(&temp, "list_val.txt"));
        assert_eq!(train, paths(10)[..8]);
        assert_eq!(val, paths(10)[8..]);
        assert!(!output_in(&temp, "list.txt").exists());
    }

    #[test]
    fn test_split_beyond_three_uses_index_labels() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let config = OutputConfig::new(output_in(&temp, "set.lst"))
            .expect("Invalid output")
            .with_split(Some(
                SplitSpec::new(&[0.4, 0.3, 0.2, 0.1]).expect("Invalid split"),
            ));

        let outcome = ManifestWriter::new(&config).write(paths(20)).expect("Write failed");

        let names: Vec<_> = outcome
            .manifests()
            .iter()
            .filter_map(|m| m.path.file_name())
            .collect();
        assert_eq!(
            names,
            vec!["set_train.lst", "set_val.lst", "set_test.lst", "set_split_3.lst"]
        );
        assert_eq!(outcome.total(), 20);
    }

    #[test]
    fn test_empty_slice_writes_empty_file() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let config = OutputConfig::new(output_in(&temp, "list.txt"))
            .expect("Invalid output")
            .with_split(Some(SplitSpec::new(&[0.5, 0.5]).expect("Invalid split")));

        ManifestWriter::new(&config).write(paths(1)).expect("Write failed");

        let train = fs::read_to_string(output_in(&temp, "list_train.txt")).expect("Missing file");
        assert!(train.is_empty());
        assert_eq!(read_lines(&output_in(&temp, "list_val.txt")).len(), 1);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let output = output_in(&temp, "list.txt");
        let config = OutputConfig::new(output.clone())
            .expect("Invalid output")
            .with_shuffle(true);

        ManifestWriter::new(&config).write(paths(50)).expect("Write failed");

        let mut written = read_lines(&output);
        written.sort();
        assert_eq!(written, paths(50));
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let first = OutputConfig::new(output_in(&temp, "first.txt"))
            .expect("Invalid output")
            .with_shuffle(true)
            .with_seed(Some(42));
        let second = OutputConfig::new(output_in(&temp, "second.txt"))
            .expect("Invalid output")
            .with_shuffle(true)
            .with_seed(Some(42));

        ManifestWriter::new(&first).write(paths(50)).expect("Write failed");
        ManifestWriter::new(&second).write(paths(50)).expect("Write failed");

        let first = read_lines(&output_in(&temp, "first.txt"));
        let second = read_lines(&output_in(&temp, "second.txt"));
        assert_eq!(first, second);
        assert_ne!(first, paths(50));
    }

    #[test]
    fn test_missing_parent_directory_is_error() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let output = output_in(&temp, "missing/list.txt");
        let config = OutputConfig::new(output.clone()).expect("Invalid output");

        let err = ManifestWriter::new(&config).write(paths(3)).unwrap_err();
        assert_eq!(err.path(), &output);
    }
}
