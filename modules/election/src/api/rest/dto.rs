use serde::Serialize;

use crate::contract::model::{Candidate, NewCandidate, Party};
use crate::domain::error::DomainError;
use crate::domain::validation::{self, Payload};

pub const CANDIDATE_REQUIRED: &[&str] = &["firstName", "lastName", "industryConnected"];
pub const PARTY_ASSIGNMENT_REQUIRED: &[&str] = &["partyId"];

/// REST DTO for a candidate row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDto {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub industry_connected: bool,
    pub party_id: Option<i64>,
    pub party_name: Option<String>,
}

/// REST DTO for a party row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartyDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<Candidate> for CandidateDto {
    fn from(c: Candidate) -> Self {
        Self {
            id: c.id,
            first_name: c.first_name,
            last_name: c.last_name,
            industry_connected: c.industry_connected,
            party_id: c.party_id,
            party_name: c.party_name,
        }
    }
}

impl From<Party> for PartyDto {
    fn from(p: Party) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
        }
    }
}

/// Success reply: `{message, data?, changes?, id?}`.
///
/// Absent parts are omitted; `data: Some(None)` still serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl<T> Envelope<T> {
    pub fn message(message: &'static str) -> Self {
        Self {
            message,
            data: None,
            changes: None,
            id: None,
        }
    }

    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::message("success")
        }
    }

    pub fn deleted(changes: u64, id: i64) -> Self {
        Self {
            changes: Some(changes),
            id: Some(id),
            ..Self::message("deleted")
        }
    }

    pub fn with_changes(mut self, changes: u64) -> Self {
        self.changes = Some(changes);
        self
    }
}

/// Create-candidate body: presence check first, then typed conversion.
pub fn new_candidate_from_payload(payload: &Payload) -> Result<NewCandidate, DomainError> {
    validation::ensure(validation::validate(payload, CANDIDATE_REQUIRED))?;

    Ok(NewCandidate {
        first_name: validation::text(payload, "firstName")?,
        last_name: validation::text(payload, "lastName")?,
        industry_connected: validation::boolean(payload, "industryConnected")?,
        party_id: validation::optional_id(payload, "partyId")?,
    })
}

/// Update-party body: the `partyId` key must be present, `null` detaches.
pub fn party_assignment_from_payload(payload: &Payload) -> Result<Option<i64>, DomainError> {
    validation::ensure(validation::require_keys(payload, PARTY_ASSIGNMENT_REQUIRED))?;
    validation::optional_id(payload, "partyId")
}
