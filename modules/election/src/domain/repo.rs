use async_trait::async_trait;

use crate::contract::model::{Candidate, NewCandidate, Party};

/// Persistence port for candidates.
/// Writes return the number of affected rows; zero means no such id.
#[async_trait]
pub trait CandidatesRepository: Send + Sync {
    /// Every candidate with its party name, ordered by id.
    async fn list_with_party(&self) -> anyhow::Result<Vec<Candidate>>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Candidate>>;
    async fn insert(&self, new_candidate: &NewCandidate) -> anyhow::Result<u64>;
    /// Update only the party column.
    async fn set_party(&self, id: i64, party_id: Option<i64>) -> anyhow::Result<u64>;
    async fn delete(&self, id: i64) -> anyhow::Result<u64>;
}

#[async_trait]
pub trait PartiesRepository: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<Party>>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Party>>;
    /// Candidates of the deleted party are detached by the schema.
    async fn delete(&self, id: i64) -> anyhow::Result<u64>;
}
