//! End-to-end tests over local HTML snapshots: fetch through the file
//! source, extract, and crawl into a persistent store.

use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use wikiscout::crawler::{Crawler, CrawlerConfig};
use wikiscout::fetch::{ArticleStore, FileSource};
use wikiscout::frequency::FrequencyStore;

const KANTO_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><title>Kanto - Bulbapedia</title></head>
<body>
<nav id="site-nav"><a href="/wiki/Main_Page">Main Page</a></nav>
<div id="content">
<div class="mw-content-ltr mw-parser-output">
<p>The <b>Kanto region</b> (Japanese: <i>カントー地方</i> <i>Kanto region</i>) is a region
of the <a href="/wiki/Pokémon_world">Pokémon world</a>. Kanto is located east of
<a href="/wiki/Johto">Johto</a>, which together form a joint landmass that is south of
<a href="/wiki/Sinnoh">Sinnoh</a>.
</p>
<p>Second paragraph that must not be part of the summary.</p>
</div>
</div>
<footer>Site footer chrome</footer>
</body>
</html>"#;

fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn first_chars(text: &str, n: usize) -> String {
    text.chars().take(n).collect()
}

fn last_chars(text: &str, n: usize) -> String {
    let total = text.chars().count();
    text.chars().skip(total.saturating_sub(n)).collect()
}

#[tokio::test]
async fn kanto_summary_matches_reference_text() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("Kanto.html"), KANTO_HTML).unwrap();

    let expected = normalize(
        "The Kanto region (Japanese: カントー地方 Kanto region) is a region \
         of the Pokémon world. Kanto is located east of Johto, which \
         together form a joint landmass that is south of Sinnoh.",
    );

    let store = ArticleStore::new(FileSource::new(dir.path()), "en");
    let article = store.fetch("Kanto").await.unwrap();

    let summary = normalize(&article.summary().unwrap());
    assert!(
        summary.starts_with(&first_chars(&expected, 50)),
        "summary started with: {}",
        first_chars(&summary, 50)
    );
    assert!(
        summary.ends_with(&last_chars(&expected, 50)),
        "summary ended with: {}",
        last_chars(&summary, 50)
    );
}

/// Wiki-shaped page whose body is one distinct word, linking to `links`.
fn linked_page(unique_word: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|link| format!("<a href=\"/wiki/{link}\"></a>"))
        .collect();
    format!(
        "<html><body><div class=\"mw-content-ltr mw-parser-output\">\
         <p>{unique_word}</p>{anchors}</div></body></html>"
    )
}

#[tokio::test]
async fn crawl_deduplicates_cycles_and_reaches_depth_two() {
    let dir = TempDir::new().unwrap();
    // A <-> B cycle; D is only reachable through B at depth 2. A also links
    // B once more through a fragment anchor, which must collapse.
    std::fs::write(
        dir.path().join("A.html"),
        linked_page("alpha", &["B", "B#History", "C"]),
    )
    .unwrap();
    std::fs::write(dir.path().join("B.html"), linked_page("beta", &["A", "D"])).unwrap();
    std::fs::write(dir.path().join("C.html"), linked_page("gamma", &[])).unwrap();
    std::fs::write(dir.path().join("D.html"), linked_page("delta", &[])).unwrap();

    let store = ArticleStore::new(FileSource::new(dir.path()), "en");
    let index = FrequencyStore::new(dir.path().join("word-counts.json"));
    let config = CrawlerConfig::builder()
        .max_depth(2)
        .wait(std::time::Duration::ZERO)
        .build();
    let crawler = Crawler::new(store, index, config);

    let report = crawler
        .run("A", CancellationToken::new(), None)
        .await
        .unwrap();

    assert_eq!(report.visited, 4);
    assert!(report.failed.is_empty());

    // Each page was processed exactly once: its unique word counts to 1.
    let totals = crawler.index().load().await.unwrap();
    assert_eq!(totals.get("alpha"), Some(&1));
    assert_eq!(totals.get("beta"), Some(&1));
    assert_eq!(totals.get("gamma"), Some(&1));
    assert_eq!(totals.get("delta"), Some(&1));
}

#[tokio::test]
async fn counts_accumulate_across_separate_crawls() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("A.html"), linked_page("alpha", &[])).unwrap();

    let store_path = dir.path().join("word-counts.json");
    for _ in 0..2 {
        let store = ArticleStore::new(FileSource::new(dir.path()), "en");
        let index = FrequencyStore::new(&store_path);
        let config = CrawlerConfig::builder()
            .max_depth(0)
            .wait(std::time::Duration::ZERO)
            .build();
        let crawler = Crawler::new(store, index, config);
        crawler
            .run("A", CancellationToken::new(), None)
            .await
            .unwrap();
    }

    let totals = FrequencyStore::new(&store_path).load().await.unwrap();
    assert_eq!(totals.get("alpha"), Some(&2));
}
