//! SQLite DSN parsing and cleaning utilities.

use std::collections::HashMap;

/// Query parameters that are interpreted by us rather than handed to sqlx.
const PRAGMA_PARAMS: &[&str] = &["wal", "synchronous", "busy_timeout", "journal_mode"];

/// Split PRAGMA query parameters off a SQLite DSN.
///
/// Returns the DSN with the recognized parameters removed and a map of the
/// extracted ones (keys lowercased). Other query parameters such as `mode`
/// stay on the DSN in their original order.
pub(crate) fn extract_sqlite_pragmas(dsn: &str) -> (String, HashMap<String, String>) {
    let Some((base, query)) = dsn.split_once('?') else {
        return (dsn.to_string(), HashMap::new());
    };

    let mut pragmas = HashMap::new();
    let mut kept = Vec::new();

    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        let key_lower = key.to_lowercase();
        if PRAGMA_PARAMS.contains(&key_lower.as_str()) {
            pragmas.insert(key_lower, value.into_owned());
        } else {
            kept.push(format!("{key}={value}"));
        }
    }

    let clean = if kept.is_empty() {
        base.to_string()
    } else {
        format!("{base}?{}", kept.join("&"))
    };
    (clean, pragmas)
}

/// True for DSNs that open a private in-memory database.
pub(crate) fn is_memory_dsn(dsn: &str) -> bool {
    let lower = dsn.to_ascii_lowercase();
    if lower == "sqlite::memory:" || lower == "sqlite://:memory:" || lower == "sqlite://memory:" {
        return true;
    }

    match lower.split_once('?') {
        Some((_, query)) => url::form_urlencoded::parse(query.as_bytes())
            .any(|(k, v)| k == "mode" && v == "memory"),
        None => false,
    }
}
