//! Verse text tokenizer.
//!
//! lowercase -> выкинуть всё, кроме [a-z], пробелов и апострофа -> split по пробелам.
//! Апостроф сохраняется, чтобы "God's" и "don't" оставались одним токеном.
//! Без стемминга и стоп-слов.
//! Разделители U+001C..U+001F считаются пробельными наравне с Unicode whitespace.

use regex::Regex;
use std::sync::OnceLock;

fn strip_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z\s'\x1C-\x1F]").expect("static tokenizer regex"))
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Разбить текст стиха на токены. Чистая и тотальная функция.
pub fn tokenize(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let lowered = text.to_lowercase();
    let cleaned = strip_re().replace_all(&lowered, "");
    cleaned
        .split(is_separator)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
