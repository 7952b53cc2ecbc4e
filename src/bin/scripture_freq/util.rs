use std::path::PathBuf;

use scripture_freq::FreqConfig;

/// Конфиг из окружения + явный путь снимка из CLI (если задан).
pub fn config_with_snapshot(snapshot: Option<PathBuf>) -> FreqConfig {
    let cfg = FreqConfig::from_env();
    match snapshot {
        Some(p) => cfg.with_snapshot_path(p),
        None => cfg,
    }
}
