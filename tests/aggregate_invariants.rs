use anyhow::{anyhow, Result};

use scripture_freq::{
    aggregate, aggregate_with_report, DictionaryLemmatizer, Lemmatizer, Normalizer, Snapshot,
    VerseRecord,
};

fn corpus() -> Vec<VerseRecord> {
    vec![
        VerseRecord::new("Old Testament", "Genesis", "In the beginning God created the heaven and the earth."),
        VerseRecord::new("Old Testament", "Genesis", "And God said, Let there be light: and there was light."),
        VerseRecord::new("Old Testament", "Exodus", "Now these are the names of the children of Israel."),
        VerseRecord::new("New Testament", "John", "Jesus wept."),
        VerseRecord::new("New Testament", "Hebrews", "Now faith is the substance of things hoped for."),
        VerseRecord::new("Book of Mormon", "Alma", "And now as I said concerning faith, faith is not to have a perfect knowledge of things."),
        VerseRecord::new("Book of Mormon", "Ether", "Faith, HOPE; and Charity's love."),
        VerseRecord::new("Doctrine and Covenants", "Doctrine and Covenants", "Seek learning, even by study and also by faith."),
        VerseRecord::new("Pearl of Great Price", "Moses", "For behold, this is my work and my glory."),
    ]
}

/// Все три инварианта тоталов пересчитываем руками (не через validate()).
fn assert_totals_consistent(snap: &Snapshot) {
    let mut overall = 0u64;
    for (_, sw) in snap.standard_works.iter() {
        let mut sw_sum = 0u64;
        for (_, book) in sw.books.iter() {
            let counted: u64 = book.word_counts.values().sum();
            assert_eq!(counted, book.total_words);
            let lem: u64 = book.lemmatized_word_counts.values().sum();
            assert_eq!(lem, book.total_words);
            sw_sum += book.total_words;
        }
        assert_eq!(sw_sum, sw.total_words_in_standard_work);
        overall += sw.total_words_in_standard_work;
    }
    assert_eq!(overall, snap.total_words_overall);
}

#[test]
fn totals_hold_at_every_level() -> Result<()> {
    let verses = corpus();
    let snap = aggregate(&verses, &Normalizer::identity());

    assert_totals_consistent(&snap);
    snap.validate()?;

    // "Jesus wept." -> 2 токена
    let john = snap.book("New Testament", "John").ok_or_else(|| anyhow!("John missing"))?;
    assert_eq!(john.total_words, 2);
    assert_eq!(john.count_of("wept"), 1);

    let ether = snap.book("Book of Mormon", "Ether").ok_or_else(|| anyhow!("Ether missing"))?;
    assert_eq!(ether.count_of("charity's"), 1);
    assert_eq!(ether.total_words, 5);

    let alma = snap.book("Book of Mormon", "Alma").ok_or_else(|| anyhow!("Alma missing"))?;
    assert_eq!(alma.count_of("faith"), 2);

    assert_eq!(snap.standard_works.len(), 5);
    Ok(())
}

#[test]
fn permuted_input_yields_identical_snapshot() -> Result<()> {
    let verses = corpus();
    let base = aggregate(&verses, &Normalizer::identity());

    let mut rng = oorandom::Rand32::new(0x5eed);
    for _ in 0..16 {
        let mut shuffled = verses.clone();
        // Fisher–Yates
        for i in (1..shuffled.len()).rev() {
            let j = rng.rand_range(0..(i as u32 + 1)) as usize;
            shuffled.swap(i, j);
        }
        let snap = aggregate(&shuffled, &Normalizer::identity());
        assert_eq!(snap, base, "aggregation must not depend on verse order");
        assert_eq!(snap.total_words_overall, base.total_words_overall);
    }
    Ok(())
}

#[test]
fn unrecognized_standard_work_contributes_nothing() -> Result<()> {
    let mut verses = corpus();
    let base = aggregate(&verses, &Normalizer::identity());

    verses.push(VerseRecord::new("Apocrypha", "Tobit", "faith faith faith and more faith"));
    let (snap, report) = aggregate_with_report(&verses, &Normalizer::identity());

    assert_eq!(snap, base);
    assert!(!snap.standard_works.contains_key("Apocrypha"));
    assert_eq!(snap.count_of("faith"), base.count_of("faith"));
    assert_eq!(report.skipped_unknown_work, 1);
    assert_eq!(report.verses_accepted, verses.len() as u64 - 1);
    Ok(())
}

#[test]
fn records_with_missing_fields_are_skipped() -> Result<()> {
    let verses = vec![
        VerseRecord::new("New Testament", "John", "Jesus wept."),
        VerseRecord::new("New Testament", "", "orphan words here"),
        VerseRecord::new("New Testament", "John", ""),
        VerseRecord {
            standard_work: None,
            book: Some("John".into()),
            text: Some("no volume".into()),
        },
        VerseRecord::default(),
    ];
    let (snap, report) = aggregate_with_report(&verses, &Normalizer::identity());

    assert_eq!(report.verses_seen, 5);
    assert_eq!(report.verses_accepted, 1);
    assert_eq!(report.skipped_missing_field, 4);
    assert_eq!(report.skipped_unknown_work, 0);
    assert_eq!(snap.total_words_overall, 2);
    assert_eq!(snap.book_count(), 1);
    Ok(())
}

#[test]
fn verse_without_letters_creates_empty_bucket() -> Result<()> {
    // Текст есть, но токенов ноль: бакет создаётся, тоталы нулевые
    let verses = vec![VerseRecord::new("Doctrine and Covenants", "Official Declaration 1", "1890 -- 1978")];
    let snap = aggregate(&verses, &Normalizer::identity());
    snap.validate()?;
    let b = snap
        .book("Doctrine and Covenants", "Official Declaration 1")
        .ok_or_else(|| anyhow!("bucket missing"))?;
    assert_eq!(b.total_words, 0);
    assert!(b.word_counts.is_empty());
    assert_eq!(snap.total_words_overall, 0);
    Ok(())
}

#[test]
fn books_keep_first_seen_order() -> Result<()> {
    let verses = corpus();
    let snap = aggregate(&verses, &Normalizer::identity());
    let ot = snap.standard_works.get("Old Testament").ok_or_else(|| anyhow!("OT missing"))?;
    assert_eq!(ot.books.keys().collect::<Vec<_>>(), vec!["Genesis", "Exodus"]);
    let names: Vec<&str> = snap.standard_works.keys().collect();
    assert_eq!(
        names,
        vec![
            "Old Testament",
            "New Testament",
            "Book of Mormon",
            "Doctrine and Covenants",
            "Pearl of Great Price"
        ]
    );
    Ok(())
}

#[test]
fn lemmatized_counts_use_dictionary_but_raw_counts_do_not() -> Result<()> {
    let dict = DictionaryLemmatizer::from_entries(["child", "name", "thing", "knowledge"], [("children", "child")]);
    let normalizer = Normalizer::with_backend(Box::new(dict));
    let verses = corpus();

    let snap = aggregate(&verses, &normalizer);
    let plain = aggregate(&verses, &Normalizer::identity());

    let exodus = snap.book("Old Testament", "Exodus").ok_or_else(|| anyhow!("Exodus missing"))?;
    assert_eq!(exodus.lemmatized_word_counts.get("child"), Some(&1));
    assert_eq!(exodus.lemmatized_word_counts.get("name"), Some(&1));
    assert_eq!(exodus.lemmatized_word_counts.get("children"), None);
    assert_eq!(exodus.count_of("children"), 1);

    // word_counts и тоталы от лемматизатора не зависят
    for (sw_name, sw) in snap.standard_works.iter() {
        for (book_name, book) in sw.books.iter() {
            let other = plain.book(sw_name, book_name).ok_or_else(|| anyhow!("bucket missing"))?;
            assert_eq!(book.word_counts, other.word_counts);
            assert_eq!(book.total_words, other.total_words);
        }
    }
    assert_totals_consistent(&snap);
    Ok(())
}

struct FailingLemmatizer;

impl Lemmatizer for FailingLemmatizer {
    fn name(&self) -> &str {
        "failing"
    }
    fn lemmatize(&self, _tokens: &[String]) -> Result<Vec<String>> {
        Err(anyhow!("lemma service unavailable"))
    }
}

struct TruncatingLemmatizer;

impl Lemmatizer for TruncatingLemmatizer {
    fn name(&self) -> &str {
        "truncating"
    }
    fn lemmatize(&self, tokens: &[String]) -> Result<Vec<String>> {
        Ok(tokens.iter().skip(1).cloned().collect())
    }
}

#[test]
fn failing_lemmatizer_degrades_to_identity() -> Result<()> {
    let verses = corpus();
    let identity = aggregate(&verses, &Normalizer::identity());

    for backend in [
        Box::new(FailingLemmatizer) as Box<dyn Lemmatizer>,
        Box::new(TruncatingLemmatizer) as Box<dyn Lemmatizer>,
    ] {
        let n = Normalizer::with_backend(backend);
        let snap = aggregate(&verses, &n);
        assert_eq!(snap, identity, "fallback must equal the identity run");
        for (_, sw) in snap.standard_works.iter() {
            for (_, book) in sw.books.iter() {
                assert_eq!(book.lemmatized_word_counts, book.word_counts);
            }
        }
    }
    Ok(())
}
