//! Dictionary-based noun lemmatizer (morphy-style).
//!
//! Формат словаря (UTF-8, по одной записи на строку):
//!   # комментарий
//!   faith                 <- базовая форма (лексикон)
//!   men<TAB>man           <- исключение: форма -> лемма (лемма попадает в лексикон)
//!
//! Лемма токена: кандидаты = цели исключений + сам токен (если он в лексиконе)
//! + переписывания по суффиксным правилам, попавшие в лексикон; берём самый
//! короткий кандидат, иначе токен без изменений.

use anyhow::{anyhow, Context, Result};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use super::Lemmatizer;

/// Noun detachment rules: (suffix, replacement).
const NOUN_RULES: [(&str, &str); 8] = [
    ("s", ""),
    ("ses", "s"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

#[derive(Debug, Clone, Default)]
pub struct DictionaryLemmatizer {
    lexicon: HashSet<String>,
    exceptions: HashMap<String, Vec<String>>,
}

impl DictionaryLemmatizer {
    /// Загрузить словарь из файла. Ошибка чтения/формата - Err (вызывающий деградирует в identity).
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read lemma dictionary {}", path.display()))?;
        let mut d = Self::default();
        for (no, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split(|c: char| c == '\t' || c == ' ').filter(|s| !s.is_empty());
            let form = parts.next().unwrap_or_default();
            match (parts.next(), parts.next()) {
                (None, _) => d.add_base(form),
                (Some(lemma), None) => d.add_exception(form, lemma),
                (Some(_), Some(_)) => {
                    return Err(anyhow!(
                        "{}:{}: expected `word` or `form<TAB>lemma`, got {:?}",
                        path.display(),
                        no + 1,
                        raw
                    ));
                }
            }
        }
        if d.lexicon.is_empty() {
            return Err(anyhow!("lemma dictionary {} has no entries", path.display()));
        }
        Ok(d)
    }

    /// Построить словарь в памяти: базовые формы + пары (форма, лемма).
    pub fn from_entries<'a, B, E>(bases: B, exceptions: E) -> Self
    where
        B: IntoIterator<Item = &'a str>,
        E: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut d = Self::default();
        for b in bases {
            d.add_base(b);
        }
        for (form, lemma) in exceptions {
            d.add_exception(form, lemma);
        }
        d
    }

    fn add_base(&mut self, word: &str) {
        self.lexicon.insert(word.to_lowercase());
    }

    fn add_exception(&mut self, form: &str, lemma: &str) {
        let lemma = lemma.to_lowercase();
        self.lexicon.insert(lemma.clone());
        let targets = self.exceptions.entry(form.to_lowercase()).or_default();
        if !targets.contains(&lemma) {
            targets.push(lemma);
        }
    }

    pub fn lexicon_len(&self) -> usize {
        self.lexicon.len()
    }

    pub fn exceptions_len(&self) -> usize {
        self.exceptions.len()
    }

    /// Лемма одного токена (noun-biased).
    pub fn lemma_of(&self, token: &str) -> String {
        let mut rewrites: Vec<String> = Vec::new();
        for (suffix, repl) in NOUN_RULES {
            if let Some(stem) = token.strip_suffix(suffix) {
                if stem.is_empty() {
                    continue;
                }
                let cand = format!("{stem}{repl}");
                if self.lexicon.contains(&cand) {
                    rewrites.push(cand);
                }
            }
        }

        let mut candidates: Vec<&str> = Vec::new();
        if let Some(targets) = self.exceptions.get(token) {
            candidates.extend(targets.iter().map(String::as_str));
        }
        if self.lexicon.contains(token) {
            candidates.push(token);
        }
        candidates.extend(rewrites.iter().map(String::as_str));

        // min_by_key берёт первый из равных - порядок: исключения, сам токен, правила
        candidates
            .into_iter()
            .min_by_key(|c| c.len())
            .unwrap_or(token)
            .to_string()
    }
}

impl Lemmatizer for DictionaryLemmatizer {
    fn name(&self) -> &str {
        "dictionary"
    }

    fn lemmatize(&self, tokens: &[String]) -> Result<Vec<String>> {
        Ok(tokens.iter().map(|t| self.lemma_of(t)).collect())
    }
}
