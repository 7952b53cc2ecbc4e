//! Secondary token normalization (lemmatization) for `lemmatized_word_counts`.
//!
//! - Lemmatizer: подключаемый бэкенд (словарный, внешний сервис и т.п.).
//! - Normalizer: обёртка для агрегатора. Best-effort: если бэкенда нет или он
//!   упал на батче, батч возвращается как есть (identity). Основная таблица
//!   `word_counts` от нормализации не зависит.

pub mod dictionary;

use anyhow::Result;
use log::{debug, info, warn};

use crate::config::FreqConfig;
use crate::metrics;

pub use dictionary::DictionaryLemmatizer;

/// Backend contract: same length and order as the input.
pub trait Lemmatizer: Send + Sync {
    fn name(&self) -> &str;
    fn lemmatize(&self, tokens: &[String]) -> Result<Vec<String>>;
}

/// Normalizer with identity fallback.
pub struct Normalizer {
    backend: Option<Box<dyn Lemmatizer>>,
}

impl Normalizer {
    pub fn identity() -> Self {
        Self { backend: None }
    }

    pub fn with_backend(backend: Box<dyn Lemmatizer>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Построить по конфигу. Выключено / словарь не задан / не загрузился - identity.
    pub fn from_config(cfg: &FreqConfig) -> Self {
        if !cfg.lemmatize {
            info!("lemmatizer disabled; lemmatized counts mirror raw tokens");
            return Self::identity();
        }
        let Some(path) = cfg.lemma_dict.as_ref() else {
            info!("no lemma dictionary configured; lemmatized counts mirror raw tokens");
            return Self::identity();
        };
        match DictionaryLemmatizer::load(path) {
            Ok(d) => {
                info!(
                    "lemma dictionary {} loaded: {} base forms, {} exceptions",
                    path.display(),
                    d.lexicon_len(),
                    d.exceptions_len()
                );
                Self::with_backend(Box::new(d))
            }
            Err(e) => {
                warn!("lemmatizer unavailable ({:#}); falling back to identity", e);
                Self::identity()
            }
        }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.as_ref().map(|b| b.name()).unwrap_or("identity")
    }

    pub fn is_identity(&self) -> bool {
        self.backend.is_none()
    }

    /// Нормализовать батч токенов. Никогда не возвращает ошибку.
    pub fn normalize(&self, tokens: &[String]) -> Vec<String> {
        let Some(backend) = self.backend.as_ref() else {
            return tokens.to_vec();
        };
        metrics::record_lemma_batch();
        match backend.lemmatize(tokens) {
            Ok(out) if out.len() == tokens.len() => out,
            Ok(out) => {
                debug!(
                    "lemmatizer '{}' returned {} tokens for a batch of {}; using raw tokens",
                    backend.name(),
                    out.len(),
                    tokens.len()
                );
                metrics::record_lemma_fallback();
                tokens.to_vec()
            }
            Err(e) => {
                debug!(
                    "lemmatizer '{}' failed on a batch of {}: {:#}; using raw tokens",
                    backend.name(),
                    tokens.len(),
                    e
                );
                metrics::record_lemma_fallback();
                tokens.to_vec()
            }
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::identity()
    }
}
