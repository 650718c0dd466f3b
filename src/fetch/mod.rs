//! Article fetching
//!
//! This module turns a phrase into a parsed [`Article`]. The transport is
//! abstracted behind the [`ContentSource`] trait with two implementations:
//! [`HttpSource`] for live wiki retrieval and [`FileSource`] for local HTML
//! snapshots. [`ArticleStore`] is the fetch façade the rest of the crate
//! works against.

mod error;
mod file;
mod http;

pub use error::FetchError;
pub use file::FileSource;
pub use http::{HttpSource, DEFAULT_BASE_URL};

use async_trait::async_trait;
use tracing::instrument;

use crate::article::Article;

/// A source of raw article HTML.
///
/// Implementations own the phrase-to-resource mapping (underscore
/// substitution, file extensions, URL construction) and surface every
/// failure to obtain content as a [`FetchError`].
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Return the raw HTML for `phrase`.
    async fn fetch_html(&self, phrase: &str) -> Result<String, FetchError>;

    /// Human-readable location `phrase` resolves to, for attribution output.
    fn locate(&self, phrase: &str) -> String;
}

#[async_trait]
impl<T: ContentSource + ?Sized> ContentSource for Box<T> {
    async fn fetch_html(&self, phrase: &str) -> Result<String, FetchError> {
        (**self).fetch_html(phrase).await
    }

    fn locate(&self, phrase: &str) -> String {
        (**self).locate(phrase)
    }
}

/// Fetch façade: obtains raw HTML from a [`ContentSource`] and parses it
/// into an [`Article`] tagged with a language code.
///
/// Does not retry and does not cache; callers may fetch the same phrase
/// repeatedly within one process.
pub struct ArticleStore<S> {
    source: S,
    language: String,
}

impl<S: ContentSource> ArticleStore<S> {
    /// Create a store over `source`, tagging articles with `language`.
    pub fn new(source: S, language: impl Into<String>) -> Self {
        Self {
            source,
            language: language.into(),
        }
    }

    /// The language code fetched articles are tagged with.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The underlying content source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch and parse the article for `phrase`.
    ///
    /// Source failures propagate unchanged; parsing itself never fails.
    #[instrument(skip(self))]
    pub async fn fetch(&self, phrase: &str) -> Result<Article, FetchError> {
        let html = self.source.fetch_html(phrase).await?;
        Ok(Article::parse(phrase, html, &self.language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticSource;

    #[async_trait]
    impl ContentSource for StaticSource {
        async fn fetch_html(&self, _phrase: &str) -> Result<String, FetchError> {
            Ok("<div class=\"mw-content-ltr mw-parser-output\"><p>Mew.</p></div>".to_string())
        }

        fn locate(&self, phrase: &str) -> String {
            format!("static:{phrase}")
        }
    }

    #[tokio::test]
    async fn store_tags_articles_with_its_language() {
        let store = ArticleStore::new(StaticSource, "en");

        let article = store.fetch("Mew").await.unwrap();
        assert_eq!(article.title(), "Mew");
        assert_eq!(article.language(), "en");
        assert_eq!(article.summary().unwrap(), "Mew.");
    }

    #[tokio::test]
    async fn boxed_sources_delegate() {
        let source: Box<dyn ContentSource> = Box::new(StaticSource);
        let store = ArticleStore::new(source, "en");

        let article = store.fetch("Mew").await.unwrap();
        assert_eq!(article.summary().unwrap(), "Mew.");
        assert_eq!(store.source().locate("Mew"), "static:Mew");
    }
}
