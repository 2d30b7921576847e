//! Demo data for a fresh database (`--seed`).

use anyhow::Context;
use sqlx::SqlitePool;
use tracing::info;

const PARTIES: &[(&str, &str)] = &[
    (
        "JS Juggernauts",
        "The JS Juggernauts eat, breathe, and sleep JavaScript. They can build everything you could ever want in JS, including a new kitchen sink.",
    ),
    (
        "Heroes of HTML",
        "Want to see a mock-up turn into an actual webpage in a matter of minutes? Well, the Heroes of HTML can get it done in a matter of seconds.",
    ),
    (
        "Git Gurus",
        "Need to resolve a merge conflict? The Git Gurus have your back. Nobody knows Git like these folks do.",
    ),
];

/// (first_name, last_name, party index into PARTIES, industry_connected)
const CANDIDATES: &[(&str, &str, Option<usize>, bool)] = &[
    ("Ronald", "Firbank", Some(0), true),
    ("Virginia", "Woolf", Some(0), true),
    ("Piers", "Gaveston", Some(0), false),
    ("Charles", "LeRoi", Some(1), true),
    ("Katherine", "Mansfield", Some(1), true),
    ("Dora", "Carrington", Some(2), false),
    ("Edward", "Bellamy", Some(2), false),
    ("Montague", "Summers", None, true),
    ("Octavia", "Butler", Some(2), true),
    ("Unica", "Zurn", None, true),
];

/// Insert the demo parties and candidates when both tables are empty.
/// Returns true when data was inserted.
pub async fn seed_demo_data(pool: &SqlitePool) -> anyhow::Result<bool> {
    let (parties,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM parties")
        .fetch_one(pool)
        .await
        .context("count parties failed")?;
    let (candidates,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM candidates")
        .fetch_one(pool)
        .await
        .context("count candidates failed")?;
    if parties > 0 || candidates > 0 {
        info!(parties, candidates, "Database not empty, skipping demo seed");
        return Ok(false);
    }

    let mut tx = pool.begin().await.context("begin seed transaction")?;

    let mut party_ids = Vec::with_capacity(PARTIES.len());
    for (name, description) in PARTIES {
        let res = sqlx::query("INSERT INTO parties (name, description) VALUES (?, ?)")
            .bind(*name)
            .bind(*description)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("seed party '{name}'"))?;
        party_ids.push(res.last_insert_rowid());
    }

    for (first_name, last_name, party, industry_connected) in CANDIDATES {
        let party_id = (*party).and_then(|idx| party_ids.get(idx).copied());
        sqlx::query(
            "INSERT INTO candidates (first_name, last_name, industry_connected, party_id) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(*first_name)
        .bind(*last_name)
        .bind(*industry_connected)
        .bind(party_id)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("seed candidate '{first_name} {last_name}'"))?;
    }

    tx.commit().await.context("commit seed transaction")?;
    info!(
        parties = PARTIES.len(),
        candidates = CANDIDATES.len(),
        "Seeded demo data"
    );
    Ok(true)
}
