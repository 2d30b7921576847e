//! SQLite path preparation utilities.

use std::io;
use std::path::PathBuf;

/// Create the parent directory of a file-backed SQLite DSN.
///
/// Accepts `sqlite://path`, `sqlite:///abs/path` and `sqlite:path`; query
/// parameters are ignored. In-memory DSNs are a no-op.
pub(crate) fn prepare_sqlite_path(dsn: &str) -> io::Result<()> {
    if super::is_memory_dsn(dsn) {
        return Ok(());
    }

    if let Some(path) = file_path_from_dsn(dsn) {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }
    Ok(())
}

/// Extract the filesystem path from a SQLite DSN.
pub(crate) fn file_path_from_dsn(dsn: &str) -> Option<PathBuf> {
    let rest = dsn
        .strip_prefix("sqlite://")
        .or_else(|| dsn.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();

    if path.is_empty() || path.starts_with("file:") || path.starts_with(':') {
        return None;
    }
    Some(PathBuf::from(path))
}
