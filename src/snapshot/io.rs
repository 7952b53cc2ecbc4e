//! snapshot/io - запись и чтение файла снимка.
//!
//! - Запись атомарная: <path>.tmp -> rename, частичный снимок не появляется;
//!   при ошибке tmp-файл удаляется.
//! - Чтение всегда проверяет инварианты тоталов (validate()).

use anyhow::{Context, Result};
use log::debug;
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::Snapshot;
use crate::consts::SNAPSHOT_TMP_EXT;

/// Записать снимок (pretty или компактный JSON).
pub fn write_snapshot(path: &Path, snap: &Snapshot, pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create snapshot dir {}", parent.display()))?;
        }
    }
    let tmp = tmp_path(path);

    let data = if pretty {
        serde_json::to_vec_pretty(snap)
    } else {
        serde_json::to_vec(snap)
    }
    .context("serialize snapshot")?;

    if let Err(e) = write_tmp(&tmp, &data).and_then(|_| {
        fs::rename(&tmp, path)
            .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))
    }) {
        // не оставляем мусор рядом со снимком
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    debug!("snapshot written: {} ({} B)", path.display(), data.len());
    Ok(())
}

/// <file>.json -> <file>.json.tmp: суффикс дописывается к имени, а не заменяет расширение.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".");
    name.push(SNAPSHOT_TMP_EXT);
    path.with_file_name(name)
}

fn write_tmp(tmp: &Path, data: &[u8]) -> Result<()> {
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(tmp)
        .with_context(|| format!("open tmp snapshot {}", tmp.display()))?;
    f.write_all(data)
        .with_context(|| format!("write tmp snapshot {}", tmp.display()))?;
    f.sync_all()
        .with_context(|| format!("sync tmp snapshot {}", tmp.display()))?;
    Ok(())
}

/// Прочитать снимок и проверить инварианты.
pub fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let bytes = fs::read(path).with_context(|| format!("read snapshot {}", path.display()))?;
    let snap: Snapshot = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse snapshot {}", path.display()))?;
    snap.validate()
        .with_context(|| format!("snapshot {} violates total invariants", path.display()))?;
    Ok(snap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_suffix_is_appended_to_file_name() {
        assert_eq!(tmp_path(Path::new("data/a.json")), PathBuf::from("data/a.json.tmp"));
        assert_eq!(tmp_path(Path::new("a.txt")), PathBuf::from("a.txt.tmp"));
        // снимок с расширением .tmp не пишет сам в себя
        assert_eq!(tmp_path(Path::new("out/a.tmp")), PathBuf::from("out/a.tmp.tmp"));
    }
}
