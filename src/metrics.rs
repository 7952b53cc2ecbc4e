//! Lightweight global metrics for scripture-freq.
//!
//! Потокобезопасные атомарные счётчики для подсистем:
//! - Aggregator (стихи: принятые/пропущенные, токены)
//! - Lemmatizer (батчи, откаты на identity)
//! - Query engine (запросы, пустые термины)
//!
//! Пропуски записей и деградация лемматизатора не поднимаются как ошибки -
//! они видны только здесь и в логах.

use std::sync::atomic::{AtomicU64, Ordering};

// ----- Aggregator -----
static VERSES_SEEN: AtomicU64 = AtomicU64::new(0);
static VERSES_ACCEPTED: AtomicU64 = AtomicU64::new(0);
static VERSES_SKIPPED_MISSING: AtomicU64 = AtomicU64::new(0);
static VERSES_SKIPPED_UNKNOWN_WORK: AtomicU64 = AtomicU64::new(0);
static TOKENS_COUNTED: AtomicU64 = AtomicU64::new(0);

// ----- Lemmatizer -----
static LEMMA_BATCHES: AtomicU64 = AtomicU64::new(0);
static LEMMA_FALLBACKS: AtomicU64 = AtomicU64::new(0);

// ----- Query -----
static QUERIES_TOTAL: AtomicU64 = AtomicU64::new(0);
static QUERIES_EMPTY_TERM: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    // Aggregator
    pub verses_seen: u64,
    pub verses_accepted: u64,
    pub verses_skipped_missing_field: u64,
    pub verses_skipped_unknown_work: u64,
    pub tokens_counted: u64,

    // Lemmatizer
    pub lemma_batches: u64,
    pub lemma_fallbacks: u64,

    // Query
    pub queries_total: u64,
    pub queries_empty_term: u64,
}

impl MetricsSnapshot {
    pub fn verses_skipped(&self) -> u64 {
        self.verses_skipped_missing_field + self.verses_skipped_unknown_work
    }

    pub fn lemma_fallback_ratio(&self) -> f64 {
        if self.lemma_batches == 0 {
            0.0
        } else {
            self.lemma_fallbacks as f64 / self.lemma_batches as f64
        }
    }
}

// ----- Recorders (Aggregator) -----
pub fn record_verse_seen() {
    VERSES_SEEN.fetch_add(1, Ordering::Relaxed);
}

pub fn record_verse_accepted(tokens: usize) {
    VERSES_ACCEPTED.fetch_add(1, Ordering::Relaxed);
    TOKENS_COUNTED.fetch_add(tokens as u64, Ordering::Relaxed);
}

pub fn record_verse_skipped_missing() {
    VERSES_SKIPPED_MISSING.fetch_add(1, Ordering::Relaxed);
}

pub fn record_verse_skipped_unknown_work() {
    VERSES_SKIPPED_UNKNOWN_WORK.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (Lemmatizer) -----
pub fn record_lemma_batch() {
    LEMMA_BATCHES.fetch_add(1, Ordering::Relaxed);
}

pub fn record_lemma_fallback() {
    LEMMA_FALLBACKS.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (Query) -----
pub fn record_query(empty_term: bool) {
    QUERIES_TOTAL.fetch_add(1, Ordering::Relaxed);
    if empty_term {
        QUERIES_EMPTY_TERM.fetch_add(1, Ordering::Relaxed);
    }
}

// ----- Snapshot / Reset -----
pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        verses_seen: VERSES_SEEN.load(Ordering::Relaxed),
        verses_accepted: VERSES_ACCEPTED.load(Ordering::Relaxed),
        verses_skipped_missing_field: VERSES_SKIPPED_MISSING.load(Ordering::Relaxed),
        verses_skipped_unknown_work: VERSES_SKIPPED_UNKNOWN_WORK.load(Ordering::Relaxed),
        tokens_counted: TOKENS_COUNTED.load(Ordering::Relaxed),

        lemma_batches: LEMMA_BATCHES.load(Ordering::Relaxed),
        lemma_fallbacks: LEMMA_FALLBACKS.load(Ordering::Relaxed),

        queries_total: QUERIES_TOTAL.load(Ordering::Relaxed),
        queries_empty_term: QUERIES_EMPTY_TERM.load(Ordering::Relaxed),
    }
}

pub fn reset() {
    VERSES_SEEN.store(0, Ordering::Relaxed);
    VERSES_ACCEPTED.store(0, Ordering::Relaxed);
    VERSES_SKIPPED_MISSING.store(0, Ordering::Relaxed);
    VERSES_SKIPPED_UNKNOWN_WORK.store(0, Ordering::Relaxed);
    TOKENS_COUNTED.store(0, Ordering::Relaxed);

    LEMMA_BATCHES.store(0, Ordering::Relaxed);
    LEMMA_FALLBACKS.store(0, Ordering::Relaxed);

    QUERIES_TOTAL.store(0, Ordering::Relaxed);
    QUERIES_EMPTY_TERM.store(0, Ordering::Relaxed);
}
