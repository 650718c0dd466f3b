//! Bounded breadth-first wiki crawling
//!
//! Starting from a seed phrase, the crawler walks outbound content links in
//! FIFO order up to a configured depth, deduplicating phrases against a
//! visited set and merging each visited article's word counts into the
//! persistent frequency index, with a pause between fetches. A bad article
//! is skipped and recorded; only an unfetchable seed aborts the run.
//!
//! The queue and visited set live in the crawler alone, and merges all flow
//! through one [`FrequencyStore`] handle, so the traversal is race-free by
//! construction.

mod config;
mod error;

pub use config::{CrawlerConfig, CrawlerConfigBuilder};
pub use error::CrawlError;

use std::collections::{HashSet, VecDeque};

use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::article::{ExtractError, WordFrequency};
use crate::fetch::{ArticleStore, ContentSource, FetchError};
use crate::frequency::FrequencyStore;

/// Progress update emitted as each article starts processing: its phrase
/// and crawl depth.
pub type CrawlProgress = (String, u32);

/// One skipped article and why it was skipped.
#[derive(Debug)]
pub struct CrawlFailure {
    /// Phrase of the skipped article
    pub phrase: String,
    /// Depth the phrase was queued at
    pub depth: u32,
    /// Human-readable cause
    pub reason: String,
}

/// Outcome of a crawl run.
#[derive(Debug, Default)]
pub struct CrawlReport {
    /// Articles whose word counts were extracted
    pub visited: usize,
    /// Distinct words in the index after the last merge
    pub distinct_words: usize,
    /// Articles skipped over per-node fetch or extraction failures
    pub failed: Vec<CrawlFailure>,
    /// Whether the run was ended early by the cancellation token
    pub cancelled: bool,
}

/// Per-article failure during a visit. Both kinds degrade to a skip.
#[derive(Debug, Error)]
enum VisitError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Breadth-first crawler over wiki content links.
pub struct Crawler<S> {
    store: ArticleStore<S>,
    index: FrequencyStore,
    config: CrawlerConfig,
}

impl<S: ContentSource> Crawler<S> {
    /// Create a crawler fetching through `store` and aggregating into
    /// `index`.
    pub fn new(store: ArticleStore<S>, index: FrequencyStore, config: CrawlerConfig) -> Self {
        Self {
            store,
            index,
            config,
        }
    }

    /// The frequency index this crawler merges into.
    pub fn index(&self) -> &FrequencyStore {
        &self.index
    }

    /// Crawl outward from `seed`.
    ///
    /// Processes the seed at depth 0, then visits queued phrases in FIFO
    /// order so every depth-*d* article is handled before any at depth
    /// *d + 1*. Newly discovered phrases are sorted before enqueueing to
    /// keep sibling order deterministic. `cancel` is checked at the top of
    /// every step; when it fires the report accumulated so far is returned.
    /// Progress updates are sent on `progress` when provided.
    #[instrument(skip(self, cancel, progress), fields(max_depth = self.config.max_depth))]
    pub async fn run(
        &self,
        seed: &str,
        cancel: CancellationToken,
        progress: Option<mpsc::Sender<CrawlProgress>>,
    ) -> Result<CrawlReport, CrawlError> {
        let mut report = CrawlReport::default();
        let mut queue: VecDeque<(String, u32)> = VecDeque::new();
        let mut visited: HashSet<String> = HashSet::new();

        visited.insert(seed.to_string());
        queue.push_back((seed.to_string(), 0));

        let mut first = true;
        while let Some((phrase, depth)) = queue.pop_front() {
            if cancel.is_cancelled() {
                info!("crawl cancelled, {} articles visited", report.visited);
                report.cancelled = true;
                break;
            }

            if !first && !self.config.wait.is_zero() {
                debug!("waiting {:?} before next fetch", self.config.wait);
                tokio::select! {
                    _ = tokio::time::sleep(self.config.wait) => {}
                    _ = cancel.cancelled() => {
                        report.cancelled = true;
                        break;
                    }
                }
            }

            if let Some(progress) = &progress {
                let _ = progress.send((phrase.clone(), depth)).await;
            }

            info!("counting words on '{}' (depth {})", phrase, depth);
            match self.visit(&phrase, depth < self.config.max_depth).await {
                Ok((counts, links)) => {
                    report.visited += 1;
                    if !counts.is_empty() {
                        let totals = self.index.merge(&counts).await?;
                        report.distinct_words = totals.len();
                    }
                    for link in links {
                        if visited.insert(link.clone()) {
                            queue.push_back((link, depth + 1));
                        }
                    }
                }
                // An unfetchable seed means nothing was crawled at all.
                Err(VisitError::Fetch(e)) if first => return Err(CrawlError::Seed(e)),
                Err(e) => {
                    warn!("skipping '{}': {}", phrase, e);
                    report.failed.push(CrawlFailure {
                        phrase,
                        depth,
                        reason: e.to_string(),
                    });
                }
            }
            first = false;
        }

        info!(
            "crawl finished: {} visited, {} skipped, {} distinct words",
            report.visited,
            report.failed.len(),
            report.distinct_words
        );
        Ok(report)
    }

    /// Fetch one article and pull out its word counts, plus its outbound
    /// links sorted lexicographically when the depth bound still allows
    /// expansion.
    async fn visit(
        &self,
        phrase: &str,
        expand: bool,
    ) -> Result<(WordFrequency, Vec<String>), VisitError> {
        let article = self.store.fetch(phrase).await?;

        let counts = article.word_count()?;
        let links = if expand {
            let mut links: Vec<String> = article.linked_phrases()?.into_iter().collect();
            links.sort();
            links
        } else {
            Vec::new()
        };

        Ok((counts, links))
    }
}
