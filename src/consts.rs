//! Общие константы (корпус, нормализация, пути по умолчанию).

// -------- Corpus --------
/// Распознаваемые standard works в порядке объявления.
/// Стихи с любым другим volume_title отбрасываются агрегатором.
pub const STANDARD_WORKS: [&str; 5] = [
    "Old Testament",
    "New Testament",
    "Book of Mormon",
    "Doctrine and Covenants",
    "Pearl of Great Price",
];

// -------- Query --------
/// Базис нормализации: вхождений на 10 000 слов.
pub const PER_WORDS: f64 = 10_000.0;

/// Метка единственной строки результата при Granularity::Combined.
pub const COMBINED_SCOPE_LABEL: &str = "All Standard Works";

// -------- Files --------
pub const DEFAULT_INPUT_PATH: &str = "data/lds-scriptures-2020.12.08/json/lds-scriptures-json.txt";
pub const DEFAULT_SNAPSHOT_PATH: &str = "data/processed_word_counts.json";
pub const SNAPSHOT_TMP_EXT: &str = "tmp";

#[inline]
pub fn is_recognized_standard_work(name: &str) -> bool {
    STANDARD_WORKS.contains(&name)
}
