//! # wikiscout CLI Application
//!
//! Command-line interface over the wikiscout crate, exposing its extraction
//! and crawling operations as subcommands:
//!
//! - `summary`: print an article's summary paragraph
//! - `table`: extract a table, optionally exporting it as CSV
//! - `count-words`: merge one article's word counts into the persistent index
//! - `crawl`: breadth-first crawl from a seed article with rate limiting
//! - `stats`: show the most frequent words accumulated so far
//!
//! Articles are read from the configured wiki over HTTP, or from a local
//! directory of HTML snapshots with `--local-dir`. Long crawls show a
//! progress spinner and stop cleanly on Ctrl-C.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::instrument;
use tracing_subscriber::{
    layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter, Layer,
};

use wikiscout::article::Table;
use wikiscout::crawler::{Crawler, CrawlerConfig};
use wikiscout::fetch::{ArticleStore, ContentSource, FileSource, HttpSource, DEFAULT_BASE_URL};
use wikiscout::frequency::{FrequencyStore, DEFAULT_STORE_PATH};

#[derive(Parser)]
#[command(author, version, about = "Wiki article extraction and word-frequency crawling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print an article's summary paragraph
    Summary(SummaryArgs),

    /// Extract a table from an article, with optional CSV export
    Table(TableArgs),

    /// Merge one article's word counts into the persistent index
    CountWords(CountWordsArgs),

    /// Crawl outward from a seed article, accumulating word counts
    Crawl(CrawlArgs),

    /// Show the most frequent words accumulated so far
    Stats(StatsArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Base URL of the wiki's article path
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Read articles from .html files in this directory instead of the network
    #[arg(long)]
    local_dir: Option<PathBuf>,

    /// Language code articles are tagged with
    #[arg(short, long, default_value = "en")]
    language: String,
}

#[derive(Args, Debug)]
struct SummaryArgs {
    /// Article phrase to summarize
    #[arg(required = true)]
    phrase: String,

    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Args, Debug)]
struct TableArgs {
    /// Article phrase to take the table from
    #[arg(required = true)]
    phrase: String,

    /// Which table to extract (1-based, in document order)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    number: u32,

    /// Treat the table's first row as column labels
    #[arg(short, long)]
    first_row_is_header: bool,

    /// Write the table to this CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Args, Debug)]
struct CountWordsArgs {
    /// Article phrase to count words on
    #[arg(required = true)]
    phrase: String,

    /// Path of the persistent word-count store
    #[arg(long, default_value = DEFAULT_STORE_PATH)]
    store: PathBuf,

    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Args, Debug)]
struct CrawlArgs {
    /// Seed article phrase
    #[arg(required = true)]
    phrase: String,

    /// Maximum link depth to crawl; the seed is depth 0
    #[arg(short, long, default_value = "1")]
    depth: u32,

    /// Seconds to pause between article fetches
    #[arg(short, long, default_value = "1.0", value_parser = parse_wait)]
    wait: f64,

    /// Path of the persistent word-count store
    #[arg(long, default_value = DEFAULT_STORE_PATH)]
    store: PathBuf,

    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Args, Debug)]
struct StatsArgs {
    /// How many words to show
    #[arg(short, long, default_value = "10")]
    count: usize,

    /// Path of the persistent word-count store
    #[arg(long, default_value = DEFAULT_STORE_PATH)]
    store: PathBuf,
}

fn parse_wait(s: &str) -> Result<f64, String> {
    let wait: f64 = s.parse().map_err(|e| format!("invalid wait: {e}"))?;
    if !wait.is_finite() || wait < 0.0 {
        return Err("wait must be a non-negative number of seconds".to_string());
    }
    Ok(wait)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Summary(args) => summary_command(args).await?,
        Commands::Table(args) => table_command(args).await?,
        Commands::CountWords(args) => count_words_command(args).await?,
        Commands::Crawl(args) => crawl_command(args).await?,
        Commands::Stats(args) => stats_command(args).await?,
    }

    Ok(())
}

fn init_tracing() {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_default_env());

    tracing_subscriber::registry().with(console_layer).init();
}

fn build_store(source: &SourceArgs) -> ArticleStore<Box<dyn ContentSource>> {
    let content_source: Box<dyn ContentSource> = match &source.local_dir {
        Some(dir) => Box::new(FileSource::new(dir)),
        None => Box::new(HttpSource::new(&source.base_url)),
    };
    ArticleStore::new(content_source, &source.language)
}

/// The wiki's content carries its own license; say where output came from.
fn print_attribution(location: &str) {
    println!();
    println!("Output licensed to match its source (CC BY-NC-SA).");
    println!("Data retrieved from: {location}");
}

#[instrument]
async fn summary_command(args: SummaryArgs) -> anyhow::Result<()> {
    let store = build_store(&args.source);

    let article = store.fetch(&args.phrase).await?;
    let summary = article.summary()?;

    println!("-----Summary-----");
    println!("{summary}");
    print_attribution(&store.source().locate(&args.phrase));
    Ok(())
}

#[instrument]
async fn table_command(args: TableArgs) -> anyhow::Result<()> {
    let store = build_store(&args.source);

    let article = store.fetch(&args.phrase).await?;
    let table = article.table(args.number as usize, args.first_row_is_header)?;
    drop(article);

    println!("-----Table-----");
    print!("{table}");

    if let Some(output) = &args.output {
        tokio::fs::write(output, table_to_csv(&table))
            .await
            .with_context(|| format!("failed to write {}", output.display()))?;
        println!("Table saved to file: '{}'.", output.display());
    }

    print_value_counts(&table);
    print_attribution(&store.source().locate(&args.phrase));
    Ok(())
}

#[instrument]
async fn count_words_command(args: CountWordsArgs) -> anyhow::Result<()> {
    let store = build_store(&args.source);
    let index = FrequencyStore::new(&args.store);

    let article = store.fetch(&args.phrase).await?;
    let counts = article.word_count()?;
    drop(article);

    let totals = index.merge(&counts).await?;
    println!(
        "Counted {} distinct words on '{}'; '{}' now holds {} words.",
        counts.len(),
        args.phrase,
        index.path().display(),
        totals.len()
    );
    print_attribution(&store.source().locate(&args.phrase));
    Ok(())
}

#[instrument]
async fn crawl_command(args: CrawlArgs) -> anyhow::Result<()> {
    println!("Crawling from '{}' (depth {})...", args.phrase, args.depth);

    let store = build_store(&args.source);
    let seed_location = store.source().locate(&args.phrase);
    let index = FrequencyStore::new(&args.store);
    let config = CrawlerConfig::builder()
        .max_depth(args.depth)
        .wait_secs(args.wait)
        .build();
    let crawler = Crawler::new(store, index, config);

    // Stop cleanly on Ctrl-C; the crawler checks the token each step.
    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_cancel.cancel();
        }
    });

    // Create a channel for progress updates
    let (progress_sender, mut progress_receiver) = mpsc::channel(100);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {pos} articles {msg}")
            .unwrap(),
    );

    // Spawn a task to process progress updates
    let progress_handle = tokio::spawn({
        let spinner = spinner.clone();
        async move {
            while let Some((phrase, depth)) = progress_receiver.recv().await {
                spinner.inc(1);
                spinner.set_message(format!("processing '{}' (depth {})", phrase, depth));
            }
            spinner.finish_and_clear();
        }
    });

    let report = crawler
        .run(&args.phrase, cancel, Some(progress_sender))
        .await?;

    // The progress task ends when the crawler drops its sender.
    let _ = progress_handle.await;

    if report.cancelled {
        println!("Crawl cancelled.");
    }
    println!(
        "Visited {} articles; '{}' now holds {} distinct words.",
        report.visited,
        crawler.index().path().display(),
        report.distinct_words
    );
    if !report.failed.is_empty() {
        println!("Skipped {} articles:", report.failed.len());
        for failure in &report.failed {
            println!(
                "  '{}' (depth {}): {}",
                failure.phrase, failure.depth, failure.reason
            );
        }
    }
    print_attribution(&seed_location);
    Ok(())
}

#[instrument]
async fn stats_command(args: StatsArgs) -> anyhow::Result<()> {
    let index = FrequencyStore::new(&args.store);
    let top = index.top_n(args.count).await?;

    if top.is_empty() {
        println!(
            "No word counts collected yet in '{}'.",
            index.path().display()
        );
        return Ok(());
    }

    println!("-----Most Frequent Words-----");
    let width = top
        .iter()
        .map(|(word, _)| word.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);
    for (word, count) in top {
        println!("{:width$}  {}", word, count);
    }
    Ok(())
}

fn table_to_csv(table: &Table) -> String {
    let mut out = String::new();

    if let Some(labels) = &table.column_labels {
        let mut record = vec![String::new()];
        record.extend(labels.iter().cloned());
        out.push_str(&csv_record(&record));
    }
    for row in &table.rows {
        let mut record = vec![row.label.clone()];
        record.extend(row.cells.iter().cloned());
        out.push_str(&csv_record(&record));
    }
    out
}

fn csv_record(fields: &[String]) -> String {
    let mut line = fields
        .iter()
        .map(|field| csv_field(field))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

fn csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn print_value_counts(table: &Table) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in &table.rows {
        for cell in &row.cells {
            *counts.entry(cell.as_str()).or_default() += 1;
        }
    }

    let mut entries: Vec<(&str, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let width = entries
        .iter()
        .map(|(value, _)| value.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);
    println!();
    println!("{:width$}  Count", "Value");
    for (value, count) in entries {
        println!("{:width$}  {}", value, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wikiscout::article::TableRow;

    #[test]
    fn wait_must_be_a_non_negative_number() {
        assert_eq!(parse_wait("1.5").unwrap(), 1.5);
        assert_eq!(parse_wait("0").unwrap(), 0.0);
        assert!(parse_wait("-1").is_err());
        assert!(parse_wait("soon").is_err());
        assert!(parse_wait("inf").is_err());
    }

    #[test]
    fn csv_escapes_quotes_commas_and_newlines() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn table_csv_includes_header_and_label_column() {
        let table = Table {
            column_labels: Some(vec!["Leader".to_string(), "Badge".to_string()]),
            rows: vec![
                TableRow {
                    label: "Pewter".to_string(),
                    cells: vec!["Brock".to_string(), "Boulder".to_string()],
                },
                TableRow {
                    label: "Cerulean".to_string(),
                    cells: vec!["Misty".to_string(), "Cascade".to_string()],
                },
            ],
        };

        assert_eq!(
            table_to_csv(&table),
            ",Leader,Badge\nPewter,Brock,Boulder\nCerulean,Misty,Cascade\n"
        );
    }
}
