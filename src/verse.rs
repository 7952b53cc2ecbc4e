//! Verse input records and the verse source loader.
//!
//! Источник - JSON-массив объектов или поток JSON-объектов (JSON Lines).
//! Из каждой записи нужны только volume_title / book_title / scripture_text,
//! остальные ключи игнорируются. Отсутствующее или null поле -> None
//! (запись будет пропущена агрегатором, это не ошибка).

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::consts::is_recognized_standard_work;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRecord {
    #[serde(rename = "volume_title", default)]
    pub standard_work: Option<String>,
    #[serde(rename = "book_title", default)]
    pub book: Option<String>,
    #[serde(rename = "scripture_text", default)]
    pub text: Option<String>,
}

/// Почему запись не участвует в подсчёте.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingField,
    UnknownStandardWork,
}

/// Validated view of a record: all three fields present and non-empty,
/// standard work on the allow-list.
#[derive(Debug, Clone, Copy)]
pub struct AcceptedVerse<'a> {
    pub standard_work: &'a str,
    pub book: &'a str,
    pub text: &'a str,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

impl VerseRecord {
    pub fn new(standard_work: &str, book: &str, text: &str) -> Self {
        Self {
            standard_work: Some(standard_work.to_string()),
            book: Some(book.to_string()),
            text: Some(text.to_string()),
        }
    }

    pub fn accept(&self) -> std::result::Result<AcceptedVerse<'_>, SkipReason> {
        let (Some(standard_work), Some(book), Some(text)) =
            (present(&self.standard_work), present(&self.book), present(&self.text))
        else {
            return Err(SkipReason::MissingField);
        };
        if !is_recognized_standard_work(standard_work) {
            return Err(SkipReason::UnknownStandardWork);
        }
        Ok(AcceptedVerse {
            standard_work,
            book,
            text,
        })
    }
}

/// Прочитать все стихи из файла. Нечитаемый/битый источник - фатальная ошибка прогона.
pub fn load_verses(path: &Path) -> Result<Vec<VerseRecord>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read verse source {}", path.display()))?;
    parse_verses(&text).with_context(|| format!("parse verse source {}", path.display()))
}

/// Разобрать JSON-массив или JSON Lines.
pub fn parse_verses(text: &str) -> Result<Vec<VerseRecord>> {
    let body = text.trim_start_matches('\u{feff}').trim_start();
    if body.is_empty() {
        return Err(anyhow!("verse source is empty"));
    }
    if body.starts_with('[') {
        let verses: Vec<VerseRecord> =
            serde_json::from_str(body).context("decode JSON array of verses")?;
        return Ok(verses);
    }
    let mut out = Vec::new();
    for (i, item) in serde_json::Deserializer::from_str(body)
        .into_iter::<VerseRecord>()
        .enumerate()
    {
        let v = item.with_context(|| format!("decode verse object #{}", i + 1))?;
        out.push(v);
    }
    Ok(out)
}
