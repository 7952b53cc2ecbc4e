//! Snapshot - frozen frequency table produced by the aggregator.
//!
//! Структура (serde-имена совпадают с форматом файла):
//! - Snapshot { standard_works: name -> StandardWorkAggregate, total_words_overall }
//!   - StandardWorkAggregate { books: name -> BookAggregate, total_words_in_standard_work }
//!     - BookAggregate { word_counts, lemmatized_word_counts, total_words }
//!
//! Инварианты (проверяет validate()):
//! - book.total_words == сумма word_counts
//! - total_words_in_standard_work == сумма total_words по книгам
//! - total_words_overall == сумма total_words_in_standard_work
//!
//! Submodules:
//! - ordered.rs: OrderedMap (порядок вставки, order-insensitive равенство).
//! - io.rs: write_snapshot (tmp+rename) / read_snapshot (parse + validate).
//! - handle.rs: SnapshotHandle - загружается один раз, дальше только чтение.

pub mod handle;
pub mod io;
pub mod ordered;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use handle::SnapshotHandle;
pub use io::{read_snapshot, write_snapshot};
pub use ordered::OrderedMap;

/// token -> count. BTreeMap: детерминированный вывод файла.
pub type WordCount = BTreeMap<String, u64>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookAggregate {
    pub word_counts: WordCount,
    /// Reserved: carried through the snapshot, no query reads it.
    #[serde(default)]
    pub lemmatized_word_counts: WordCount,
    pub total_words: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardWorkAggregate {
    pub books: OrderedMap<BookAggregate>,
    pub total_words_in_standard_work: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub standard_works: OrderedMap<StandardWorkAggregate>,
    pub total_words_overall: u64,
}

/// Одна строка сводки (по standard work).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandardWorkSummary {
    pub name: String,
    pub total_words: u64,
    pub books: usize,
}

fn checked_sum<I: IntoIterator<Item = u64>>(values: I) -> Result<u64> {
    values
        .into_iter()
        .try_fold(0u64, |acc, v| acc.checked_add(v))
        .ok_or_else(|| anyhow!("counter sum overflows u64"))
}

impl BookAggregate {
    pub fn count_of(&self, token: &str) -> u64 {
        self.word_counts.get(token).copied().unwrap_or(0)
    }
}

impl StandardWorkAggregate {
    pub fn count_of(&self, token: &str) -> u64 {
        self.books.values().map(|b| b.count_of(token)).sum()
    }
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn book(&self, standard_work: &str, book: &str) -> Option<&BookAggregate> {
        self.standard_works.get(standard_work)?.books.get(book)
    }

    pub fn count_of(&self, token: &str) -> u64 {
        self.standard_works.values().map(|sw| sw.count_of(token)).sum()
    }

    pub fn book_count(&self) -> usize {
        self.standard_works.values().map(|sw| sw.books.len()).sum()
    }

    /// Проверить все три инварианта тоталов.
    /// Переполнение любой суммы (битый файл) - тоже ошибка.
    pub fn validate(&self) -> Result<()> {
        let mut overall: u64 = 0;
        for (sw_name, sw) in self.standard_works.iter() {
            let mut sw_sum: u64 = 0;
            for (book_name, book) in sw.books.iter() {
                let counted = checked_sum(book.word_counts.values().copied())
                    .with_context(|| format!("{sw_name} / {book_name}: word_counts"))?;
                if counted != book.total_words {
                    bail!(
                        "{sw_name} / {book_name}: total_words={} but word_counts sum to {counted}",
                        book.total_words
                    );
                }
                if !book.lemmatized_word_counts.is_empty() {
                    let lem = checked_sum(book.lemmatized_word_counts.values().copied())
                        .with_context(|| format!("{sw_name} / {book_name}: lemmatized_word_counts"))?;
                    if lem != book.total_words {
                        bail!(
                            "{sw_name} / {book_name}: total_words={} but lemmatized_word_counts sum to {lem}",
                            book.total_words
                        );
                    }
                }
                sw_sum = checked_sum([sw_sum, book.total_words])
                    .with_context(|| format!("{sw_name}: books total_words"))?;
            }
            if sw_sum != sw.total_words_in_standard_work {
                bail!(
                    "{sw_name}: total_words_in_standard_work={} but books sum to {sw_sum}",
                    sw.total_words_in_standard_work
                );
            }
            overall = checked_sum([overall, sw.total_words_in_standard_work])
                .context("standard works total_words_in_standard_work")?;
        }
        if overall != self.total_words_overall {
            bail!(
                "total_words_overall={} but standard works sum to {overall}",
                self.total_words_overall
            );
        }
        Ok(())
    }

    pub fn summary(&self) -> Vec<StandardWorkSummary> {
        self.standard_works
            .iter()
            .map(|(name, sw)| StandardWorkSummary {
                name: name.to_string(),
                total_words: sw.total_words_in_standard_work,
                books: sw.books.len(),
            })
            .collect()
    }
}
