//! scripture-freq - word frequency tables over the five standard works.
//!
//! Two phases, no shared runtime state:
//! - aggregate: verses -> tokenize -> per-book / per-standard-work / overall
//!   counters -> snapshot file (one batch run);
//! - query: snapshot loaded once into a read-only handle, then raw and
//!   per-10,000-words frequencies per scope (combined / standard work / book).

// Базовые модули
pub mod consts;
pub mod config;
pub mod metrics;
pub mod util;

// Текст: токенизация и вторичная нормализация (леммы)
pub mod tokenizer;
pub mod lemma; // src/lemma/{mod,dictionary}.rs

// Вход / снимок
pub mod verse;
pub mod snapshot; // src/snapshot/{mod,ordered,io,handle}.rs

// Две фазы
pub mod aggregate;
pub mod query;

// Удобные реэкспорты
pub use aggregate::{aggregate, aggregate_with_report, run_batch, AggregateReport};
pub use config::FreqConfig;
pub use lemma::{DictionaryLemmatizer, Lemmatizer, Normalizer};
pub use query::{query, Granularity, ResultRow};
pub use snapshot::{
    read_snapshot, write_snapshot, BookAggregate, Snapshot, SnapshotHandle, StandardWorkAggregate,
    WordCount,
};
pub use tokenizer::tokenize;
pub use verse::{load_verses, VerseRecord};
