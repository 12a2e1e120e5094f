//! Corpus loading from JSON Lines files

use std::fs;
use std::path::{Path, PathBuf};

use llmbench_core::{BenchError, BenchResult};
use serde::de::DeserializeOwned;

/// Loader for benchmark splits under a data directory
#[derive(Debug, Clone)]
pub struct CorpusLoader {
    /// Root of the corpora
    data_dir: PathBuf,
}

impl CorpusLoader {
    /// Create a loader rooted at `data_dir`
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// Root of the corpora
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of one split file
    pub fn split_path(&self, benchmark: &str, split: &str) -> PathBuf {
        self.data_dir.join(benchmark).join(format!("{}.jsonl", split))
    }

    /// Whether a split file exists
    pub fn has_split(&self, benchmark: &str, split: &str) -> bool {
        self.split_path(benchmark, split).is_file()
    }

    /// Load every sample of a split, in file order.
    ///
    /// Blank lines are skipped. A missing file or a line that does not
    /// decode fails the whole split.
    pub fn load_split<T: DeserializeOwned>(&self, benchmark: &str, split: &str) -> BenchResult<Vec<T>> {
        let path = self.split_path(benchmark, split);
        let content = fs::read_to_string(&path).map_err(|e| {
            BenchError::corpus(benchmark, format!("cannot read {}: {}", path.display(), e))
        })?;

        let samples = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str(line).map_err(|e| {
                    BenchError::corpus(
                        benchmark,
                        format!("{}:{}: {}", path.display(), index + 1, e),
                    )
                })
            })
            .collect::<BenchResult<Vec<T>>>()?;

        tracing::debug!(
            benchmark,
            split,
            samples = samples.len(),
            "loaded corpus split"
        );
        Ok(samples)
    }
}
