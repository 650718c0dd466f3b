//! Parsed wiki articles and content extraction
//!
//! This module provides the [`Article`] type, a parsed wiki page together
//! with the operations that derive structured views from its main content
//! region: the summary paragraph, a selected table, a word-frequency map,
//! and the set of outbound article links.
//!
//! Parsing never fails: a page without a recognizable content region is still
//! a valid, inspectable article. Every extraction operation re-checks the
//! region and fails with [`ExtractError::MissingContentRegion`] when it is
//! absent, so none of them can partially succeed on a malformed page.

mod error;
mod table;

pub use error::ExtractError;
pub use table::{Table, TableRow};

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Signature of the element conventionally holding the article body.
const CONTENT_REGION_SELECTOR: &str = "div.mw-content-ltr.mw-parser-output";

/// Path prefix of internal article links.
const ARTICLE_PATH_PREFIX: &str = "/wiki/";

/// Namespace prefixes that mark technical or maintenance pages rather than
/// content articles. Matched case-sensitively against the wiki's convention.
const BANNED_LINK_PREFIXES: [&str; 9] = [
    "/wiki/File:",
    "/wiki/Template:",
    "/wiki/Bulbapedia:",
    "/wiki/MediaWiki:",
    "/wiki/User:",
    "/wiki/Category:",
    "/wiki/Help:",
    "/wiki/Browse:",
    "/wiki/Special:",
];

static CONTENT_REGION: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(CONTENT_REGION_SELECTOR).expect("content region selector")
});
static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("paragraph selector"));
static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector"));
static WORD_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("word token pattern"));

/// Word-to-occurrence-count mapping for one article's content region.
pub type WordFrequency = HashMap<String, u64>;

/// A parsed wiki article.
///
/// Holds the parsed HTML document; the content region is located again on
/// every extraction call rather than cached at construction, so a document
/// without one can still be constructed and logged by the caller.
///
/// The parsed document is not `Send`; extraction is synchronous, and async
/// callers should finish extracting before the next suspension point.
pub struct Article {
    title: String,
    language: String,
    html: String,
    document: Html,
}

impl Article {
    /// Parse raw HTML into an article. Never fails; structural problems
    /// surface from the extraction operations instead.
    pub fn parse(
        title: impl Into<String>,
        html: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        let html = html.into();
        let document = Html::parse_document(&html);
        Self {
            title: title.into(),
            language: language.into(),
            html,
            document,
        }
    }

    /// The phrase this article was fetched under.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Language code the article was tagged with at fetch time.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The raw HTML the article was parsed from.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Locate the main content region, failing if the page does not carry
    /// the expected signature.
    fn content_region(&self) -> Result<ElementRef<'_>, ExtractError> {
        self.document
            .select(&CONTENT_REGION)
            .next()
            .ok_or_else(|| ExtractError::MissingContentRegion {
                title: self.title.clone(),
            })
    }

    /// Extract the article summary: the text of the first paragraph in the
    /// content region, trimmed.
    pub fn summary(&self) -> Result<String, ExtractError> {
        let region = self.content_region()?;

        let first_paragraph =
            region
                .select(&PARAGRAPH)
                .next()
                .ok_or_else(|| ExtractError::NoParagraph {
                    title: self.title.clone(),
                })?;

        Ok(first_paragraph.text().collect::<String>().trim().to_string())
    }

    /// Extract the `index`-th table (1-based, document order) from the
    /// content region.
    ///
    /// The first column is promoted to row labels. With
    /// `first_row_is_header` the first row's cells become column labels and
    /// are removed from the data rows. Missing cells are padded with empty
    /// strings; cell text is kept raw.
    pub fn table(&self, index: usize, first_row_is_header: bool) -> Result<Table, ExtractError> {
        let region = self.content_region()?;
        table::extract(region, &self.title, index, first_row_is_header)
    }

    /// Count word occurrences in the content region's visible text.
    ///
    /// Text is lower-cased and scanned for maximal runs of word characters;
    /// only tokens made up entirely of alphabetic characters are counted.
    /// Element boundaries act as token separators, so text split across tags
    /// never fuses into one token.
    pub fn word_count(&self) -> Result<WordFrequency, ExtractError> {
        let region = self.content_region()?;

        let text = region.text().collect::<Vec<_>>().join(" ").to_lowercase();

        let mut counts = WordFrequency::new();
        for token in WORD_RUNS.find_iter(&text) {
            let word = token.as_str();
            if word.chars().all(char::is_alphabetic) {
                *counts.entry(word.to_string()).or_insert(0) += 1;
            }
        }

        debug!(
            title = %self.title,
            distinct = counts.len(),
            "counted words in content region"
        );
        Ok(counts)
    }

    /// Collect the unique phrases linked from the content region.
    ///
    /// Only hrefs under the internal article path and outside the banned
    /// namespaces qualify; fragments are stripped so in-page anchors on the
    /// same target collapse into one phrase.
    pub fn linked_phrases(&self) -> Result<HashSet<String>, ExtractError> {
        let region = self.content_region()?;

        let mut phrases = HashSet::new();
        for anchor in region.select(&ANCHOR) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if is_content_link(href) {
                phrases.insert(normalize_phrase(href));
            }
        }

        Ok(phrases)
    }
}

/// Whether an href points at a content article rather than a technical or
/// maintenance page.
fn is_content_link(href: &str) -> bool {
    if !href.starts_with(ARTICLE_PATH_PREFIX) {
        return false;
    }

    !BANNED_LINK_PREFIXES
        .iter()
        .any(|prefix| href.starts_with(prefix))
}

/// Turn a valid content href into the bare article phrase: strip the article
/// path prefix and any trailing `#fragment`.
fn normalize_phrase(href: &str) -> String {
    let path = href.strip_prefix(ARTICLE_PATH_PREFIX).unwrap_or(href);
    match path.split_once('#') {
        Some((phrase, _fragment)) => phrase.to_string(),
        None => path.to_string(),
    }
}
