//! # wikiscout — wiki article extraction and crawling
//!
//! This crate fetches encyclopedia-style wiki articles and derives
//! structured data from their HTML: the summary paragraph, a selected
//! table, word-frequency statistics, and the set of outbound content links.
//! A bounded breadth-first crawler walks those links outward from a seed
//! article, accumulating word counts into a persistent index that survives
//! across runs.
//!
//! ## Features
//!
//! - Content extraction scoped to the page's main content region, with a
//!   uniform error when the region is missing
//! - Table extraction with promoted row labels, optional header rows, and
//!   empty-string padding for ragged markup
//! - Link filtering that keeps content articles and drops file, template,
//!   category, and other maintenance namespaces
//! - Pluggable article sources: live HTTP retrieval or local HTML snapshots
//! - Depth-bounded, deduplicated, rate-limited crawling with per-article
//!   failure isolation and cooperative cancellation
//! - Durable additive word-frequency aggregation in a human-readable JSON
//!   store
//!
//! ## Example
//!
//! ```rust,no_run
//! use wikiscout::fetch::{ArticleStore, HttpSource, DEFAULT_BASE_URL};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = ArticleStore::new(HttpSource::new(DEFAULT_BASE_URL), "en");
//!
//!     let article = store.fetch("Kanto").await?;
//!     println!("{}", article.summary()?);
//!     Ok(())
//! }
//! ```

mod error;

pub mod article;
pub mod crawler;
pub mod fetch;
pub mod frequency;

pub use error::Error;

/// Re-export of common types for public use
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
}
