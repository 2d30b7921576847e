//! sqlx-backed repository implementations for the domain ports.
//!
//! Every operation is a single parameterized statement against the pool.

use anyhow::Context;
use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::contract::model::{Candidate, NewCandidate, Party};
use crate::domain::repo::{CandidatesRepository, PartiesRepository};

const SELECT_CANDIDATES: &str = "\
    SELECT candidates.id, candidates.first_name, candidates.last_name, \
           candidates.industry_connected, candidates.party_id, \
           parties.name AS party_name \
    FROM candidates \
    LEFT JOIN parties ON candidates.party_id = parties.id";

#[derive(Debug, sqlx::FromRow)]
struct CandidateRow {
    id: i64,
    first_name: String,
    last_name: String,
    industry_connected: bool,
    party_id: Option<i64>,
    party_name: Option<String>,
}

impl From<CandidateRow> for Candidate {
    fn from(row: CandidateRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            industry_connected: row.industry_connected,
            party_id: row.party_id,
            party_name: row.party_name,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PartyRow {
    id: i64,
    name: String,
    description: Option<String>,
}

impl From<PartyRow> for Party {
    fn from(row: PartyRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}

pub struct SqlxCandidatesRepository {
    pool: SqlitePool,
}

impl SqlxCandidatesRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidatesRepository for SqlxCandidatesRepository {
    async fn list_with_party(&self) -> anyhow::Result<Vec<Candidate>> {
        let sql = format!("{SELECT_CANDIDATES} ORDER BY candidates.id");
        let rows: Vec<CandidateRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .context("list candidates failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Candidate>> {
        let sql = format!("{SELECT_CANDIDATES} WHERE candidates.id = ?");
        let row: Option<CandidateRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("find candidate failed")?;
        Ok(row.map(Into::into))
    }

    async fn insert(&self, c: &NewCandidate) -> anyhow::Result<u64> {
        let res = sqlx::query(
            "INSERT INTO candidates (first_name, last_name, industry_connected, party_id) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(&c.first_name)
        .bind(&c.last_name)
        .bind(c.industry_connected)
        .bind(c.party_id)
        .execute(&self.pool)
        .await
        .context("insert candidate failed")?;
        Ok(res.rows_affected())
    }

    async fn set_party(&self, id: i64, party_id: Option<i64>) -> anyhow::Result<u64> {
        let res = sqlx::query("UPDATE candidates SET party_id = ? WHERE id = ?")
            .bind(party_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("update candidate party failed")?;
        Ok(res.rows_affected())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM candidates WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("delete candidate failed")?;
        Ok(res.rows_affected())
    }
}

pub struct SqlxPartiesRepository {
    pool: SqlitePool,
}

impl SqlxPartiesRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PartiesRepository for SqlxPartiesRepository {
    async fn list(&self) -> anyhow::Result<Vec<Party>> {
        let rows: Vec<PartyRow> =
            sqlx::query_as("SELECT id, name, description FROM parties ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .context("list parties failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Party>> {
        let row: Option<PartyRow> =
            sqlx::query_as("SELECT id, name, description FROM parties WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .context("find party failed")?;
        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: i64) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM parties WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("delete party failed")?;
        Ok(res.rows_affected())
    }
}
