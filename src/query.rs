//! Query engine - частота термина по снимку на выбранной гранулярности.
//!
//! - термин: trim + lowercase; пустой термин -> пустой результат (не ошибка);
//! - поиск только точного совпадения токена в word_counts (без нечёткого поиска);
//! - нормализация: raw / total * 10 000, при total == 0 -> 0;
//! - отсутствие термина - законный ноль, а не ошибка.
//!
//! Только чтение снимка: запросы можно гонять параллельно.

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::consts::{COMBINED_SCOPE_LABEL, PER_WORDS};
use crate::metrics;
use crate::snapshot::Snapshot;
use crate::util::group_thousands;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    /// Одна строка по всем standard works.
    Combined,
    /// Строка на каждый standard work.
    PerStandardWork,
    /// Строка на каждую книгу, сгруппировано по standard work.
    PerBook,
}

impl Granularity {
    pub const ALL: [Granularity; 3] = [
        Granularity::Combined,
        Granularity::PerStandardWork,
        Granularity::PerBook,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Combined => "combined",
            Granularity::PerStandardWork => "standard-work",
            Granularity::PerBook => "book",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "combined" | "all" => Ok(Granularity::Combined),
            "standard-work" | "per-standard-work" | "sw" => Ok(Granularity::PerStandardWork),
            "book" | "per-book" => Ok(Granularity::PerBook),
            other => Err(anyhow!(
                "unknown granularity '{}' (expected combined|standard-work|book)",
                other
            )),
        }
    }
}

/// Строка результата. standard_work/book заполнены по гранулярности:
/// Combined - оба None, PerStandardWork - только standard_work, PerBook - оба.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub standard_work: Option<String>,
    pub book: Option<String>,
    pub term: String,
    pub raw_count: u64,
    /// Вхождений на 10 000 слов, фиксированная точка с 2 знаками ("100.00").
    pub per_10k: String,
    pub total_words: u64,
    /// total_words с разделителями тысяч ("5,000").
    pub total_words_display: String,
}

impl ResultRow {
    fn new(
        standard_work: Option<&str>,
        book: Option<&str>,
        term: &str,
        raw_count: u64,
        total_words: u64,
    ) -> Self {
        Self {
            standard_work: standard_work.map(str::to_string),
            book: book.map(str::to_string),
            term: term.to_string(),
            raw_count,
            per_10k: format_rate(rate_per_10k(raw_count, total_words)),
            total_words,
            total_words_display: group_thousands(total_words),
        }
    }

    pub fn scope_label(&self) -> String {
        match (&self.standard_work, &self.book) {
            (Some(sw), Some(b)) => format!("{sw} / {b}"),
            (Some(sw), None) => sw.clone(),
            _ => COMBINED_SCOPE_LABEL.to_string(),
        }
    }
}

/// trim + lowercase.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

pub fn rate_per_10k(raw: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        raw as f64 / total as f64 * PER_WORDS
    }
}

pub fn format_rate(rate: f64) -> String {
    format!("{:.2}", rate)
}

/// Выполнить запрос по снимку.
pub fn query(term: &str, snap: &Snapshot, granularity: Granularity) -> Vec<ResultRow> {
    let term = normalize_term(term);
    metrics::record_query(term.is_empty());
    if term.is_empty() {
        return Vec::new();
    }

    match granularity {
        Granularity::Combined => {
            let raw = snap.count_of(&term);
            vec![ResultRow::new(None, None, &term, raw, snap.total_words_overall)]
        }
        Granularity::PerStandardWork => snap
            .standard_works
            .iter()
            .map(|(sw_name, sw)| {
                ResultRow::new(
                    Some(sw_name),
                    None,
                    &term,
                    sw.count_of(&term),
                    sw.total_words_in_standard_work,
                )
            })
            .collect(),
        Granularity::PerBook => {
            let mut rows = Vec::with_capacity(snap.book_count());
            for (sw_name, sw) in snap.standard_works.iter() {
                for (book_name, book) in sw.books.iter() {
                    rows.push(ResultRow::new(
                        Some(sw_name),
                        Some(book_name),
                        &term,
                        book.count_of(&term),
                        book.total_words,
                    ));
                }
            }
            rows
        }
    }
}
