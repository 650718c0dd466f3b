//! Persistent word-frequency index
//!
//! The index is a single human-readable JSON object mapping each word to its
//! cumulative occurrence count across every article processed so far, in
//! this run and previous ones. It is loaded fully into memory, merged
//! additively, and rewritten wholesale after every merge, so a crash loses
//! at most the in-flight merge.

mod error;

pub use error::StoreError;

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, instrument, warn};

pub use crate::article::WordFrequency;

/// Default location of the persistent index.
pub const DEFAULT_STORE_PATH: &str = "word-counts.json";

/// Durable word → cumulative count store.
///
/// A missing store file reads as empty; a corrupt one is recovered by
/// starting over from empty with a logged warning, since losing accumulated
/// counts is cheaper than blocking all future aggregation. Writes go to a
/// sibling temp file that is renamed over the store, so readers never see a
/// partial write.
///
/// Within one process all merges must go through a single handle. Multiple
/// processes sharing one store path must serialize the load-merge-write
/// cycle externally (file locking); nothing here guards against concurrent
/// writers.
pub struct FrequencyStore {
    path: PathBuf,
}

impl FrequencyStore {
    /// Create a store over the JSON document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted mapping.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<WordFrequency, StoreError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no store at {} yet, starting empty", self.path.display());
                return Ok(WordFrequency::new());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&raw) {
            Ok(counts) => Ok(counts),
            Err(e) => {
                warn!(
                    "store at {} is corrupt ({}), starting over from empty",
                    self.path.display(),
                    e
                );
                Ok(WordFrequency::new())
            }
        }
    }

    /// Add `increment` onto the persisted counts and write the result back.
    ///
    /// Absent words count from zero. Returns the merged totals.
    #[instrument(skip(self, increment), fields(words = increment.len()))]
    pub async fn merge(&self, increment: &WordFrequency) -> Result<WordFrequency, StoreError> {
        let mut totals = self.load().await?;
        for (word, count) in increment {
            *totals.entry(word.clone()).or_insert(0) += count;
        }

        self.persist(&totals).await?;
        debug!(
            "merged {} words into {}, {} distinct total",
            increment.len(),
            self.path.display(),
            totals.len()
        );
        Ok(totals)
    }

    /// The `n` most frequent words, descending, count ties broken by word.
    pub async fn top_n(&self, n: usize) -> Result<Vec<(String, u64)>, StoreError> {
        let totals = self.load().await?;

        let mut entries: Vec<(String, u64)> = totals.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(n);
        Ok(entries)
    }

    async fn persist(&self, totals: &WordFrequency) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(totals)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u64)]) -> WordFrequency {
        pairs
            .iter()
            .map(|(word, count)| (word.to_string(), *count))
            .collect()
    }

    fn store_in(dir: &tempfile::TempDir) -> FrequencyStore {
        FrequencyStore::new(dir.path().join("word-counts.json"))
    }

    #[tokio::test]
    async fn missing_store_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_store_recovers_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{not valid json").unwrap();

        assert!(store.load().await.unwrap().is_empty());

        // A merge after recovery must still persist cleanly.
        let totals = store.merge(&counts(&[("mew", 2)])).await.unwrap();
        assert_eq!(totals.get("mew"), Some(&2));
    }

    #[tokio::test]
    async fn merges_accumulate_additively() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.merge(&counts(&[("a", 2)])).await.unwrap();
        let totals = store.merge(&counts(&[("a", 3), ("b", 1)])).await.unwrap();

        assert_eq!(totals.get("a"), Some(&5));
        assert_eq!(totals.get("b"), Some(&1));
    }

    #[tokio::test]
    async fn merge_order_does_not_matter() {
        let dir = tempfile::tempdir().unwrap();
        let forward = FrequencyStore::new(dir.path().join("forward.json"));
        let backward = FrequencyStore::new(dir.path().join("backward.json"));

        forward.merge(&counts(&[("a", 2)])).await.unwrap();
        forward.merge(&counts(&[("a", 3), ("b", 1)])).await.unwrap();

        backward.merge(&counts(&[("a", 3), ("b", 1)])).await.unwrap();
        backward.merge(&counts(&[("a", 2)])).await.unwrap();

        assert_eq!(forward.load().await.unwrap(), backward.load().await.unwrap());
    }

    #[tokio::test]
    async fn merged_counts_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("word-counts.json");

        FrequencyStore::new(&path)
            .merge(&counts(&[("kanto", 4)]))
            .await
            .unwrap();

        let reopened = FrequencyStore::new(&path);
        assert_eq!(reopened.load().await.unwrap().get("kanto"), Some(&4));
    }

    #[tokio::test]
    async fn top_n_sorts_by_count_then_word() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store
            .merge(&counts(&[("pikachu", 5), ("eevee", 2), ("abra", 2)]))
            .await
            .unwrap();

        let top = store.top_n(2).await.unwrap();
        assert_eq!(
            top,
            vec![("pikachu".to_string(), 5), ("abra".to_string(), 2)]
        );
    }
}
