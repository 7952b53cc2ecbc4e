//! SnapshotHandle - загруженный один раз снимок, дальше только чтение.
//!
//! Handle дёшево клонируется (Arc) и передаётся query-стороне явно, вместо
//! глобального кэша. Запросы не мутируют снимок, поэтому их можно выполнять
//! из любого числа потоков без синхронизации.

use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{read_snapshot, Snapshot};
use crate::query::{query, Granularity, ResultRow};

#[derive(Debug, Clone)]
pub struct SnapshotHandle {
    path: Option<PathBuf>,
    inner: Arc<Snapshot>,
}

impl SnapshotHandle {
    /// Загрузить и проверить снимок. Ошибка = query engine недоступен.
    pub fn open(path: &Path) -> Result<Self> {
        let snap = read_snapshot(path)
            .with_context(|| format!("query engine unavailable: cannot load {}", path.display()))?;
        info!(
            "snapshot {} loaded: {} standard works, {} books, {} words",
            path.display(),
            snap.standard_works.len(),
            snap.book_count(),
            snap.total_words_overall
        );
        Ok(Self {
            path: Some(path.to_path_buf()),
            inner: Arc::new(snap),
        })
    }

    /// Обернуть уже собранный снимок (без файла).
    pub fn from_snapshot(snap: Snapshot) -> Self {
        Self {
            path: None,
            inner: Arc::new(snap),
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.inner
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn query(&self, term: &str, granularity: Granularity) -> Vec<ResultRow> {
        query(term, &self.inner, granularity)
    }
}
