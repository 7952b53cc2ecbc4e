//! Aggregator - однопроходный подсчёт слов по стихам.
//!
//! Для каждого стиха:
//! 1) пропуск, если нет volume_title/book_title/scripture_text или volume_title
//!    не из списка STANDARD_WORKS (не ошибка, только метрика + debug-лог);
//! 2) tokenize -> сырые токены, Normalizer -> леммы (та же длина);
//! 3) бакет (standard work, book) создаётся при первом обращении;
//! 4) тоталы книги / standard work / общий растут на число СЫРЫХ токенов.
//!
//! Порядок стихов на итоговые счётчики не влияет.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;

use crate::config::FreqConfig;
use crate::lemma::Normalizer;
use crate::metrics;
use crate::snapshot::{write_snapshot, BookAggregate, Snapshot, StandardWorkAggregate};
use crate::tokenizer::tokenize;
use crate::util::group_thousands;
use crate::verse::{load_verses, SkipReason, VerseRecord};

/// Итог одного прогона агрегатора.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateReport {
    pub verses_seen: u64,
    pub verses_accepted: u64,
    pub skipped_missing_field: u64,
    pub skipped_unknown_work: u64,
    pub tokens: u64,
}

impl AggregateReport {
    pub fn skipped(&self) -> u64 {
        self.skipped_missing_field + self.skipped_unknown_work
    }
}

/// Построить снимок из последовательности стихов.
pub fn aggregate<'a, I>(verses: I, normalizer: &Normalizer) -> Snapshot
where
    I: IntoIterator<Item = &'a VerseRecord>,
{
    aggregate_with_report(verses, normalizer).0
}

pub fn aggregate_with_report<'a, I>(verses: I, normalizer: &Normalizer) -> (Snapshot, AggregateReport)
where
    I: IntoIterator<Item = &'a VerseRecord>,
{
    let mut snap = Snapshot::new();
    let mut report = AggregateReport::default();

    for verse in verses {
        report.verses_seen += 1;
        metrics::record_verse_seen();

        let accepted = match verse.accept() {
            Ok(v) => v,
            Err(SkipReason::MissingField) => {
                report.skipped_missing_field += 1;
                metrics::record_verse_skipped_missing();
                debug!("skip verse: missing field ({:?} / {:?})", verse.standard_work, verse.book);
                continue;
            }
            Err(SkipReason::UnknownStandardWork) => {
                report.skipped_unknown_work += 1;
                metrics::record_verse_skipped_unknown_work();
                debug!(
                    "skip verse: unrecognized standard work {:?}",
                    verse.standard_work.as_deref().unwrap_or_default()
                );
                continue;
            }
        };

        let raw = tokenize(accepted.text);
        let lemmas = normalizer.normalize(&raw);
        let n = raw.len() as u64;

        let sw = snap
            .standard_works
            .get_or_insert_with(accepted.standard_work, StandardWorkAggregate::default);
        let book = sw
            .books
            .get_or_insert_with(accepted.book, BookAggregate::default);

        for t in raw {
            *book.word_counts.entry(t).or_insert(0) += 1;
        }
        for t in lemmas {
            *book.lemmatized_word_counts.entry(t).or_insert(0) += 1;
        }

        book.total_words += n;
        sw.total_words_in_standard_work += n;
        snap.total_words_overall += n;

        report.verses_accepted += 1;
        report.tokens += n;
        metrics::record_verse_accepted(n as usize);
    }

    (snap, report)
}

/// Полный batch: прочитать источник, посчитать, атомарно записать снимок.
/// Нечитаемый/битый источник - ошибка, снимок не пишется.
pub fn run_batch(cfg: &FreqConfig) -> Result<AggregateReport> {
    info!("starting aggregation: {}", cfg);
    let verses = load_verses(&cfg.input_path)?;
    info!("loaded {} verses from {}", verses.len(), cfg.input_path.display());

    let normalizer = Normalizer::from_config(cfg);
    info!("normalizer: {}", normalizer.backend_name());

    let (snap, report) = aggregate_with_report(&verses, &normalizer);
    snap.validate().context("aggregated snapshot failed total invariants")?;

    info!(
        "aggregated {} of {} verses ({} skipped: {} missing field, {} unrecognized standard work)",
        report.verses_accepted,
        report.verses_seen,
        report.skipped(),
        report.skipped_missing_field,
        report.skipped_unknown_work
    );
    for s in snap.summary() {
        info!(
            "  - {} (Total Words: {}, Books: {})",
            s.name,
            group_thousands(s.total_words),
            s.books
        );
    }

    write_snapshot(&cfg.snapshot_path, &snap, cfg.pretty_json)?;
    info!("snapshot saved to {}", cfg.snapshot_path.display());
    Ok(report)
}
