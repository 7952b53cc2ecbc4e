use clap::{Parser, Subcommand};
use std::path::PathBuf;

use scripture_freq::Granularity;

/// CLI для scripture-freq: batch-агрегация и запросы по снимку.
///
/// Пути по умолчанию берутся из SF_INPUT / SF_SNAPSHOT (см. FreqConfig).
#[derive(Parser, Debug)]
#[command(
    name = "scripture-freq",
    version,
    about = "Word/phrase frequency across the standard works",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Build the snapshot from the verse source (run once before querying)
    ///
    /// Пример:
    ///   scripture-freq aggregate --input ./lds-scriptures-json.txt --out ./data/processed_word_counts.json
    Aggregate {
        /// Verse source: JSON array or JSON Lines (volume_title, book_title, scripture_text)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Snapshot file to write
        #[arg(long)]
        out: Option<PathBuf>,
        /// Lemma dictionary for lemmatized_word_counts
        #[arg(long)]
        lemma_dict: Option<PathBuf>,
        /// Skip lemmatization (lemmatized counts mirror raw tokens)
        #[arg(long, default_value_t = false)]
        no_lemmatize: bool,
        /// Compact JSON instead of pretty-printed
        #[arg(long, default_value_t = false)]
        compact: bool,
    },
    /// Frequency of a word in the snapshot
    ///
    /// Пример:
    ///   scripture-freq query --term faith --granularity book
    Query {
        /// Search term (trimmed, lowercased; exact token match)
        #[arg(long)]
        term: String,
        /// combined | standard-work | book
        #[arg(long, value_parser = parse_granularity, default_value = "combined")]
        granularity: Granularity,
        #[arg(long)]
        snapshot: Option<PathBuf>,
        /// JSON output (array of rows)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Validate the snapshot and print totals per standard work
    Status {
        #[arg(long)]
        snapshot: Option<PathBuf>,
        /// JSON output (single object)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

fn parse_granularity(s: &str) -> Result<Granularity, String> {
    s.parse::<Granularity>().map_err(|e| e.to_string())
}
