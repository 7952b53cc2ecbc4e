use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use scripture_freq::snapshot::StandardWorkSummary;
use scripture_freq::util::group_thousands;
use scripture_freq::SnapshotHandle;

use super::util::config_with_snapshot;

#[derive(Serialize)]
struct StatusOut<'a> {
    path: String,
    valid: bool,
    total_words_overall: u64,
    books: usize,
    standard_works: &'a [StandardWorkSummary],
}

pub fn exec(snapshot: Option<PathBuf>, json: bool) -> Result<()> {
    let cfg = config_with_snapshot(snapshot);
    // open() уже проверил инварианты тоталов
    let handle = SnapshotHandle::open(&cfg.snapshot_path)?;
    let snap = handle.snapshot();
    let summary = snap.summary();

    if json {
        let out = StatusOut {
            path: cfg.snapshot_path.display().to_string(),
            valid: true,
            total_words_overall: snap.total_words_overall,
            books: snap.book_count(),
            standard_works: &summary,
        };
        println!("{}", serde_json::to_string(&out).context("serialize status")?);
        return Ok(());
    }

    println!("Snapshot {}", cfg.snapshot_path.display());
    println!("  invariants          = ok");
    println!("  total_words_overall = {}", group_thousands(snap.total_words_overall));
    println!("  standard_works      = {}", summary.len());
    println!("  books               = {}", snap.book_count());
    for s in &summary {
        println!(
            "  - {} (Total Words: {}, Books: {})",
            s.name,
            group_thousands(s.total_words),
            s.books
        );
    }
    Ok(())
}
