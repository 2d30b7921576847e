use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::contract::model::{Candidate, NewCandidate, Party};
use crate::domain::error::DomainError;
use crate::domain::repo::{CandidatesRepository, PartiesRepository};

/// Domain service for candidates and parties.
/// Depends only on the repository ports, not on infra types.
#[derive(Clone)]
pub struct Service {
    candidates: Arc<dyn CandidatesRepository>,
    parties: Arc<dyn PartiesRepository>,
}

impl Service {
    pub fn new(
        candidates: Arc<dyn CandidatesRepository>,
        parties: Arc<dyn PartiesRepository>,
    ) -> Self {
        Self {
            candidates,
            parties,
        }
    }

    #[instrument(name = "election.service.list_candidates", skip(self))]
    pub async fn list_candidates(&self) -> Result<Vec<Candidate>, DomainError> {
        let rows = self
            .candidates
            .list_with_party()
            .await
            .map_err(DomainError::from_repo)?;
        debug!("Listed {} candidates", rows.len());
        Ok(rows)
    }

    #[instrument(name = "election.service.get_candidate", skip(self), fields(candidate_id = id))]
    pub async fn get_candidate(&self, id: i64) -> Result<Option<Candidate>, DomainError> {
        self.candidates
            .find_by_id(id)
            .await
            .map_err(DomainError::from_repo)
    }

    /// Returns the number of inserted rows.
    #[instrument(
        name = "election.service.create_candidate",
        skip(self, new_candidate),
        fields(first_name = %new_candidate.first_name, last_name = %new_candidate.last_name)
    )]
    pub async fn create_candidate(&self, new_candidate: NewCandidate) -> Result<u64, DomainError> {
        info!("Creating candidate");

        let changes = self
            .candidates
            .insert(&new_candidate)
            .await
            .map_err(DomainError::from_repo)?;
        info!(changes, "Candidate created");
        Ok(changes)
    }

    /// Zero changes means the candidate does not exist.
    #[instrument(
        name = "election.service.update_candidate_party",
        skip(self),
        fields(candidate_id = id)
    )]
    pub async fn update_candidate_party(
        &self,
        id: i64,
        party_id: Option<i64>,
    ) -> Result<u64, DomainError> {
        info!("Updating candidate party");
        let changes = self
            .candidates
            .set_party(id, party_id)
            .await
            .map_err(DomainError::from_repo)?;
        debug!(changes, "Candidate party updated");
        Ok(changes)
    }

    #[instrument(name = "election.service.delete_candidate", skip(self), fields(candidate_id = id))]
    pub async fn delete_candidate(&self, id: i64) -> Result<u64, DomainError> {
        info!("Deleting candidate");
        let changes = self
            .candidates
            .delete(id)
            .await
            .map_err(DomainError::from_repo)?;
        debug!(changes, "Candidate delete finished");
        Ok(changes)
    }

    #[instrument(name = "election.service.list_parties", skip(self))]
    pub async fn list_parties(&self) -> Result<Vec<Party>, DomainError> {
        let rows = self.parties.list().await.map_err(DomainError::from_repo)?;
        debug!("Listed {} parties", rows.len());
        Ok(rows)
    }

    #[instrument(name = "election.service.get_party", skip(self), fields(party_id = id))]
    pub async fn get_party(&self, id: i64) -> Result<Option<Party>, DomainError> {
        self.parties
            .find_by_id(id)
            .await
            .map_err(DomainError::from_repo)
    }

    #[instrument(name = "election.service.delete_party", skip(self), fields(party_id = id))]
    pub async fn delete_party(&self, id: i64) -> Result<u64, DomainError> {
        info!("Deleting party");
        let changes = self
            .parties
            .delete(id)
            .await
            .map_err(DomainError::from_repo)?;
        debug!(changes, "Party delete finished");
        Ok(changes)
    }
}
