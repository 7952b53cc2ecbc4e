use anyhow::{Context, Result};
use std::path::PathBuf;

use scripture_freq::query::normalize_term;
use scripture_freq::util::pad_right;
use scripture_freq::{Granularity, ResultRow, SnapshotHandle};

use super::util::config_with_snapshot;

pub fn exec(term: String, granularity: Granularity, snapshot: Option<PathBuf>, json: bool) -> Result<()> {
    let cfg = config_with_snapshot(snapshot);
    let handle = SnapshotHandle::open(&cfg.snapshot_path)?;
    let rows = handle.query(&term, granularity);

    if json {
        let s = serde_json::to_string(&rows).context("serialize query rows")?;
        println!("{}", s);
        return Ok(());
    }

    let cleaned = normalize_term(&term);
    if cleaned.is_empty() {
        println!("(empty search term)");
        return Ok(());
    }
    println!("Searching for: '{}' (granularity: {})", cleaned, granularity);
    if rows.iter().all(|r| r.raw_count == 0) {
        println!("The term '{}' was not found.", cleaned);
    }
    print_table(&headers(granularity), &rows_to_cells(granularity, &rows));
    Ok(())
}

fn headers(g: Granularity) -> Vec<&'static str> {
    let tail = ["Search Term", "Raw Count", "Per 10,000 Words"];
    let mut h: Vec<&'static str> = match g {
        Granularity::Combined => vec!["Scope"],
        Granularity::PerStandardWork => vec!["Standard Work"],
        Granularity::PerBook => vec!["Standard Work", "Book"],
    };
    h.extend(tail);
    h.push(match g {
        Granularity::Combined => "Total Words in Scope",
        Granularity::PerStandardWork => "Total Words in Standard Work",
        Granularity::PerBook => "Total Words in Book",
    });
    h
}

fn rows_to_cells(g: Granularity, rows: &[ResultRow]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|r| {
            let mut cells = match g {
                Granularity::Combined => vec![r.scope_label()],
                Granularity::PerStandardWork => vec![r.standard_work.clone().unwrap_or_default()],
                Granularity::PerBook => vec![
                    r.standard_work.clone().unwrap_or_default(),
                    r.book.clone().unwrap_or_default(),
                ],
            };
            cells.push(r.term.clone());
            cells.push(r.raw_count.to_string());
            cells.push(r.per_10k.clone());
            cells.push(r.total_words_display.clone());
            cells
        })
        .collect()
}

fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, c) in row.iter().enumerate() {
            widths[i] = widths[i].max(c.chars().count());
        }
    }
    let line = |cells: Vec<String>| {
        cells
            .iter()
            .enumerate()
            .map(|(i, c)| pad_right(c, widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };
    println!("{}", line(headers.iter().map(|h| h.to_string()).collect()));
    println!("{}", widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
    for row in rows {
        println!("{}", line(row.clone()));
    }
}
