//! Tests for the SQLite connect path.

use db::{ConnectOpts, DbEngine, DbHandle};
use tempfile::TempDir;

async fn pragma(db: &DbHandle, name: &str) -> String {
    let stmt = format!("PRAGMA {name}");
    let row: (String,) = sqlx::query_as(&stmt).fetch_one(db.pool()).await.unwrap();
    row.0
}

async fn pragma_int(db: &DbHandle, name: &str) -> i64 {
    let stmt = format!("PRAGMA {name}");
    let row: (i64,) = sqlx::query_as(&stmt).fetch_one(db.pool()).await.unwrap();
    row.0
}

#[tokio::test]
async fn memory_database_keeps_state_across_queries() {
    let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default())
        .await
        .unwrap();
    assert_eq!(db.engine(), DbEngine::Sqlite);

    sqlx::query("CREATE TABLE t (id INTEGER PRIMARY KEY, v TEXT)")
        .execute(db.pool())
        .await
        .unwrap();
    sqlx::query("INSERT INTO t (v) VALUES ('a'), ('b')")
        .execute(db.pool())
        .await
        .unwrap();

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM t")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn foreign_keys_are_enforced() {
    let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default())
        .await
        .unwrap();
    assert_eq!(pragma_int(&db, "foreign_keys").await, 1);

    sqlx::query("CREATE TABLE parent (id INTEGER PRIMARY KEY)")
        .execute(db.pool())
        .await
        .unwrap();
    sqlx::query("CREATE TABLE child (id INTEGER PRIMARY KEY, parent_id INTEGER REFERENCES parent(id))")
        .execute(db.pool())
        .await
        .unwrap();

    let res = sqlx::query("INSERT INTO child (parent_id) VALUES (42)")
        .execute(db.pool())
        .await;
    assert!(res.is_err(), "dangling reference must be rejected");
}

#[tokio::test]
async fn file_database_creates_parent_dirs_and_applies_pragmas() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("data/nested/election.db");
    let dsn = format!(
        "sqlite://{}?journal_mode=DELETE&synchronous=FULL&busy_timeout=1234",
        path.to_string_lossy()
    );

    let db = DbHandle::connect(&dsn, ConnectOpts::default()).await.unwrap();

    assert!(path.exists(), "database file should be created at {path:?}");
    assert!(!db.dsn().contains("journal_mode"));
    assert_eq!(pragma(&db, "journal_mode").await.to_lowercase(), "delete");
    // FULL == 2
    assert_eq!(pragma_int(&db, "synchronous").await, 2);
    assert_eq!(pragma_int(&db, "busy_timeout").await, 1234);

    db.close().await;
}

#[tokio::test]
async fn file_database_defaults_to_wal() {
    let tmp = TempDir::new().unwrap();
    let dsn = format!("sqlite://{}", tmp.path().join("wal.db").to_string_lossy());

    let db = DbHandle::connect(&dsn, ConnectOpts::default()).await.unwrap();
    assert_eq!(pragma(&db, "journal_mode").await.to_lowercase(), "wal");
    assert_eq!(pragma_int(&db, "busy_timeout").await, 5000);
}

#[tokio::test]
async fn unreachable_database_fails_at_connect() {
    let tmp = TempDir::new().unwrap();
    let dsn = format!(
        "sqlite://{}?mode=ro",
        tmp.path().join("missing/none.db").to_string_lossy()
    );
    let opts = ConnectOpts {
        create_sqlite_dirs: false,
        ..Default::default()
    };

    assert!(DbHandle::connect(&dsn, opts).await.is_err());
}
