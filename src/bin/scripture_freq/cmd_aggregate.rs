use anyhow::Result;
use std::path::PathBuf;

use scripture_freq::{metrics, run_batch, FreqConfig};

pub fn exec(
    input: Option<PathBuf>,
    out: Option<PathBuf>,
    lemma_dict: Option<PathBuf>,
    no_lemmatize: bool,
    compact: bool,
) -> Result<()> {
    // ENV -> поверх флаги CLI
    let mut cfg = FreqConfig::from_env();
    if let Some(p) = input {
        cfg = cfg.with_input_path(p);
    }
    if let Some(p) = out {
        cfg = cfg.with_snapshot_path(p);
    }
    if lemma_dict.is_some() {
        cfg = cfg.with_lemma_dict(lemma_dict);
    }
    if no_lemmatize {
        cfg = cfg.with_lemmatize(false);
    }
    if compact {
        cfg = cfg.with_pretty_json(false);
    }

    let report = run_batch(&cfg)?;

    println!("Snapshot written to {}", cfg.snapshot_path.display());
    println!("  verses_seen           = {}", report.verses_seen);
    println!("  verses_accepted       = {}", report.verses_accepted);
    println!("  skipped_missing_field = {}", report.skipped_missing_field);
    println!("  skipped_unknown_work  = {}", report.skipped_unknown_work);
    println!("  tokens                = {}", report.tokens);

    let ms = metrics::snapshot();
    println!("Metrics snapshot:");
    println!("  lemma_batches         = {}", ms.lemma_batches);
    println!("  lemma_fallbacks       = {}", ms.lemma_fallbacks);
    println!("  lemma_fallback_ratio  = {:.2}%", ms.lemma_fallback_ratio() * 100.0);
    Ok(())
}
