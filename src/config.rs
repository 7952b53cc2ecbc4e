//! Centralized configuration for the aggregation batch and the query engine.
//!
//! Goals:
//! - Single place to collect tunables instead of scattering env lookups.
//! - FreqConfig::from_env() reads the SF_* variables; CLI flags override on top.
//!
//! Env:
//! - SF_INPUT           - verse source file (JSON array or JSON Lines)
//! - SF_SNAPSHOT        - snapshot file written by `aggregate`, read by `query`/`status`
//! - SF_LEMMA_DICT      - optional lemma dictionary for the secondary counter
//! - SF_LEMMATIZE       - 0|1|true|false (default true)
//! - SF_SNAPSHOT_PRETTY - 0|1|true|false (default true)

use std::fmt;
use std::path::PathBuf;

use crate::consts::{DEFAULT_INPUT_PATH, DEFAULT_SNAPSHOT_PATH};

/// Top-level configuration shared by the batch job and the query side.
#[derive(Clone, Debug)]
pub struct FreqConfig {
    /// Verse source consumed by the aggregator.
    /// Env: SF_INPUT
    pub input_path: PathBuf,

    /// Snapshot file (produced by the aggregator, consumed by queries).
    /// Env: SF_SNAPSHOT
    pub snapshot_path: PathBuf,

    /// Lemma dictionary for `lemmatized_word_counts`. None => identity normalization.
    /// Env: SF_LEMMA_DICT
    pub lemma_dict: Option<PathBuf>,

    /// Master switch for the secondary (lemmatized) counter.
    /// Env: SF_LEMMATIZE (default true; "0|false|off|no" => false)
    pub lemmatize: bool,

    /// Pretty-printed snapshot JSON.
    /// Env: SF_SNAPSHOT_PRETTY (default true)
    pub pretty_json: bool,
}

impl Default for FreqConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            lemma_dict: None,
            lemmatize: true,
            pretty_json: true,
        }
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn non_empty_path(v: &str) -> Option<PathBuf> {
    let s = v.trim();
    if s.is_empty() {
        None
    } else {
        Some(PathBuf::from(s))
    }
}

impl FreqConfig {
    /// Load configuration from environment variables on top of the defaults.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("SF_INPUT") {
            if let Some(p) = non_empty_path(&v) {
                cfg.input_path = p;
            }
        }

        if let Ok(v) = std::env::var("SF_SNAPSHOT") {
            if let Some(p) = non_empty_path(&v) {
                cfg.snapshot_path = p;
            }
        }

        if let Ok(v) = std::env::var("SF_LEMMA_DICT") {
            cfg.lemma_dict = non_empty_path(&v);
        }

        if let Ok(v) = std::env::var("SF_LEMMATIZE") {
            if let Some(on) = parse_flag(&v) {
                cfg.lemmatize = on;
            }
        }

        if let Ok(v) = std::env::var("SF_SNAPSHOT_PRETTY") {
            if let Some(on) = parse_flag(&v) {
                cfg.pretty_json = on;
            }
        }

        cfg
    }

    pub fn with_input_path<P: Into<PathBuf>>(mut self, p: P) -> Self {
        self.input_path = p.into();
        self
    }

    pub fn with_snapshot_path<P: Into<PathBuf>>(mut self, p: P) -> Self {
        self.snapshot_path = p.into();
        self
    }

    pub fn with_lemma_dict<P: Into<PathBuf>>(mut self, p: Option<P>) -> Self {
        self.lemma_dict = p.map(Into::into);
        self
    }

    pub fn with_lemmatize(mut self, on: bool) -> Self {
        self.lemmatize = on;
        self
    }

    pub fn with_pretty_json(mut self, on: bool) -> Self {
        self.pretty_json = on;
        self
    }
}

impl fmt::Display for FreqConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FreqConfig {{ \
             input_path: {}, \
             snapshot_path: {}, \
             lemma_dict: {}, \
             lemmatize: {}, \
             pretty_json: {} \
             }}",
            self.input_path.display(),
            self.snapshot_path.display(),
            self.lemma_dict
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "none(identity)".to_string()),
            self.lemmatize,
            self.pretty_json,
        )
    }
}
