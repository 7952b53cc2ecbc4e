use anyhow::{anyhow, Result};

use scripture_freq::metrics;
use scripture_freq::{aggregate, query, Granularity, Lemmatizer, Normalizer, VerseRecord};

struct Unavailable;

impl Lemmatizer for Unavailable {
    fn name(&self) -> &str {
        "unavailable"
    }
    fn lemmatize(&self, _tokens: &[String]) -> Result<Vec<String>> {
        Err(anyhow!("service down"))
    }
}

// Единственный тест в бинаре: глобальные счётчики не делятся с другими тестами.
#[test]
fn counters_track_skips_fallbacks_and_queries() -> Result<()> {
    metrics::reset();

    let verses = vec![
        VerseRecord::new("New Testament", "John", "Jesus wept."),
        VerseRecord::new("Apocrypha", "Tobit", "faith"),
        VerseRecord::new("New Testament", "", "faith"),
    ];
    let snap = aggregate(&verses, &Normalizer::with_backend(Box::new(Unavailable)));

    query("wept", &snap, Granularity::Combined);
    query("   ", &snap, Granularity::PerBook);

    let ms = metrics::snapshot();
    assert_eq!(ms.verses_seen, 3);
    assert_eq!(ms.verses_accepted, 1);
    assert_eq!(ms.verses_skipped_unknown_work, 1);
    assert_eq!(ms.verses_skipped_missing_field, 1);
    assert_eq!(ms.verses_skipped(), 2);
    assert_eq!(ms.tokens_counted, 2);
    assert_eq!(ms.lemma_batches, 1);
    assert_eq!(ms.lemma_fallbacks, 1);
    assert_eq!(ms.queries_total, 2);
    assert_eq!(ms.queries_empty_term, 1);
    Ok(())
}
