//! SQLite PRAGMA parameter handling with typed enums.

use std::collections::HashMap;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};

/// Busy timeout applied when neither the DSN nor the caller sets one.
pub(crate) const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// SQLite journal mode options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum JournalMode {
    Delete,
    Wal,
    Memory,
    Truncate,
    Persist,
    Off,
}

impl JournalMode {
    fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "DELETE" => Some(Self::Delete),
            "WAL" => Some(Self::Wal),
            "MEMORY" => Some(Self::Memory),
            "TRUNCATE" => Some(Self::Truncate),
            "PERSIST" => Some(Self::Persist),
            "OFF" => Some(Self::Off),
            _ => None,
        }
    }

    fn to_sqlx(self) -> SqliteJournalMode {
        match self {
            Self::Delete => SqliteJournalMode::Delete,
            Self::Wal => SqliteJournalMode::Wal,
            Self::Memory => SqliteJournalMode::Memory,
            Self::Truncate => SqliteJournalMode::Truncate,
            Self::Persist => SqliteJournalMode::Persist,
            Self::Off => SqliteJournalMode::Off,
        }
    }
}

/// SQLite synchronous mode options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SyncMode {
    Off,
    Normal,
    Full,
    Extra,
}

impl SyncMode {
    fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "OFF" => Some(Self::Off),
            "NORMAL" => Some(Self::Normal),
            "FULL" => Some(Self::Full),
            "EXTRA" => Some(Self::Extra),
            _ => None,
        }
    }

    fn to_sqlx(self) -> SqliteSynchronous {
        match self {
            Self::Off => SqliteSynchronous::Off,
            Self::Normal => SqliteSynchronous::Normal,
            Self::Full => SqliteSynchronous::Full,
            Self::Extra => SqliteSynchronous::Extra,
        }
    }
}

/// PRAGMA settings parsed from DSN query parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Pragmas {
    pub journal_mode: Option<JournalMode>,
    pub synchronous: Option<SyncMode>,
    pub busy_timeout_ms: Option<u64>,
    /// Legacy `wal=true|false|1|0` toggle; `journal_mode` wins when both are set.
    pub wal_toggle: Option<bool>,
}

impl Pragmas {
    /// Parse PRAGMA parameters from a key-value map. Invalid values are
    /// logged and ignored.
    pub(crate) fn from_pairs(pairs: &HashMap<String, String>) -> Self {
        let mut pragmas = Pragmas::default();

        for (key, value) in pairs {
            match key.to_lowercase().as_str() {
                "journal_mode" => match JournalMode::parse(value) {
                    Some(mode) => pragmas.journal_mode = Some(mode),
                    None => tracing::warn!("Invalid 'journal_mode' PRAGMA value '{}', ignoring", value),
                },
                "synchronous" => match SyncMode::parse(value) {
                    Some(mode) => pragmas.synchronous = Some(mode),
                    None => tracing::warn!("Invalid 'synchronous' PRAGMA value '{}', ignoring", value),
                },
                "busy_timeout" => match value.parse::<u64>() {
                    Ok(ms) => pragmas.busy_timeout_ms = Some(ms),
                    Err(_) => tracing::warn!("Invalid 'busy_timeout' PRAGMA value '{}', ignoring", value),
                },
                "wal" => match value.to_lowercase().as_str() {
                    "true" | "1" => pragmas.wal_toggle = Some(true),
                    "false" | "0" => pragmas.wal_toggle = Some(false),
                    _ => tracing::warn!("Invalid 'wal' PRAGMA value '{}', ignoring", value),
                },
                other => tracing::debug!("Unknown SQLite PRAGMA parameter: {}", other),
            }
        }

        pragmas
    }

    /// Journal mode to use; in-memory databases default to `DELETE` since
    /// they cannot run in WAL mode.
    pub(crate) fn effective_journal_mode(&self, in_memory: bool) -> JournalMode {
        if let Some(mode) = self.journal_mode {
            return mode;
        }
        match self.wal_toggle {
            Some(true) => JournalMode::Wal,
            Some(false) => JournalMode::Delete,
            None if in_memory => JournalMode::Delete,
            None => JournalMode::Wal,
        }
    }

    /// Apply the settings to sqlx connect options. `fallback_busy` is the
    /// caller-configured busy timeout, used when the DSN does not set one.
    pub(crate) fn apply(
        &self,
        opts: SqliteConnectOptions,
        in_memory: bool,
        fallback_busy: Option<Duration>,
    ) -> SqliteConnectOptions {
        let mut opts = opts
            .journal_mode(self.effective_journal_mode(in_memory).to_sqlx())
            .synchronous(self.synchronous.unwrap_or(SyncMode::Normal).to_sqlx());

        if !in_memory {
            let busy = self
                .busy_timeout_ms
                .map(Duration::from_millis)
                .or(fallback_busy)
                .unwrap_or(DEFAULT_BUSY_TIMEOUT);
            opts = opts.busy_timeout(busy);
        }
        opts
    }
}
