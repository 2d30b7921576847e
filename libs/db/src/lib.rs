//! Database handle for the election tracker services.
//!
//! Wraps a sqlx SQLite pool together with the DSN it was opened from and the
//! detected engine. The handle is created once at startup and shared by the
//! repositories; callers never build pools themselves.
//!
//! DSN query parameters `journal_mode`, `synchronous`, `busy_timeout` and the
//! legacy `wal` toggle are translated into connection PRAGMAs and removed from
//! the DSN before it reaches sqlx. In-memory databases are pinned to a single
//! pooled connection that never expires, since every SQLite memory connection
//! is a separate database.
//!
//! # Example
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() -> db::Result<()> {
//!     use db::{ConnectOpts, DbHandle};
//!
//!     let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default()).await?;
//!     sqlx::query("select 1").execute(db.pool()).await?;
//!     db.close().await;
//!     Ok(())
//! }
//! ```

mod pool_opts;
mod sqlite;

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

use crate::pool_opts::ApplyPoolOpts;

/// Library-local result type.
pub type Result<T> = std::result::Result<T, DbError>;

/// Typed error for the DB handle and helpers.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Unknown DSN: {0}")]
    UnknownDsn(String),

    #[error("Database engine {0:?} is not supported by this build (only SQLite is)")]
    Unsupported(DbEngine),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Engines recognized from a DSN scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DbEngine {
    Postgres,
    MySql,
    Sqlite,
}

/// Connection options.
#[derive(Clone, Debug)]
pub struct ConnectOpts {
    /// Maximum number of connections in the pool.
    pub max_conns: Option<u32>,
    /// Minimum number of connections in the pool.
    pub min_conns: Option<u32>,
    /// Timeout to acquire a connection from the pool.
    pub acquire_timeout: Option<Duration>,
    /// Idle timeout before a connection is closed.
    pub idle_timeout: Option<Duration>,
    /// Maximum lifetime for a connection.
    pub max_lifetime: Option<Duration>,
    /// Test connection health before acquire.
    pub test_before_acquire: bool,
    /// Busy timeout used when the DSN does not carry `busy_timeout`.
    pub sqlite_busy_timeout: Option<Duration>,
    /// For SQLite file DSNs, create parent directories if missing.
    pub create_sqlite_dirs: bool,
}

impl Default for ConnectOpts {
    fn default() -> Self {
        Self {
            max_conns: Some(10),
            min_conns: None,
            acquire_timeout: Some(Duration::from_secs(30)),
            idle_timeout: None,
            max_lifetime: None,
            test_before_acquire: false,
            sqlite_busy_timeout: None,
            create_sqlite_dirs: true,
        }
    }
}

/// Owned connection pool plus the metadata it was opened with.
#[derive(Debug, Clone)]
pub struct DbHandle {
    engine: DbEngine,
    pool: SqlitePool,
    dsn: String,
}

impl DbHandle {
    /// Detect engine by DSN scheme.
    pub fn detect(dsn: &str) -> Result<DbEngine> {
        let s = dsn.trim_start();

        if s.starts_with("postgres://") || s.starts_with("postgresql://") {
            Ok(DbEngine::Postgres)
        } else if s.starts_with("mysql://") || s.starts_with("mariadb://") {
            Ok(DbEngine::MySql)
        } else if s.starts_with("sqlite:") {
            Ok(DbEngine::Sqlite)
        } else {
            Err(DbError::UnknownDsn(redact_credentials_in_dsn(dsn)))
        }
    }

    /// Open the pool. Fails fast if the first connection cannot be made.
    pub async fn connect(dsn: &str, opts: ConnectOpts) -> Result<Self> {
        let engine = Self::detect(dsn)?;
        if engine != DbEngine::Sqlite {
            return Err(DbError::Unsupported(engine));
        }

        let (clean_dsn, pairs) = sqlite::extract_sqlite_pragmas(dsn.trim());
        let pragmas = sqlite::Pragmas::from_pairs(&pairs);
        let in_memory = sqlite::is_memory_dsn(&clean_dsn);

        if opts.create_sqlite_dirs {
            sqlite::prepare_sqlite_path(&clean_dsn)?;
        }

        let connect_opts = SqliteConnectOptions::from_str(&clean_dsn)?
            .create_if_missing(true)
            .foreign_keys(true);
        let connect_opts = pragmas.apply(connect_opts, in_memory, opts.sqlite_busy_timeout);

        let mut pool_opts = SqlitePoolOptions::new().apply(&opts);
        if in_memory {
            pool_opts = pool_opts
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_opts.connect_with(connect_opts).await?;
        tracing::debug!(dsn = %clean_dsn, in_memory, "SQLite pool opened");

        Ok(Self {
            engine,
            pool,
            dsn: clean_dsn,
        })
    }

    /// Apply embedded migrations.
    pub async fn migrate(&self, migrator: &Migrator) -> Result<()> {
        migrator.run(&self.pool).await?;
        Ok(())
    }

    /// Graceful pool close.
    pub async fn close(self) {
        self.pool.close().await;
    }

    /// Get the backend.
    pub fn engine(&self) -> DbEngine {
        self.engine
    }

    /// Get the DSN used for this connection (PRAGMA parameters stripped).
    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    /// Shared sqlx pool; cloning it is cheap.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Replace the password of a URL-style DSN with `***` for logging.
pub fn redact_credentials_in_dsn(dsn: &str) -> String {
    if !dsn.contains('@') {
        return dsn.to_string();
    }
    match url::Url::parse(dsn) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("***"));
            }
            parsed.to_string()
        }
        Err(_) => "***".to_string(),
    }
}
