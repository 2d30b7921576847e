/// A candidate row joined with its party's name (no serde, see `api::rest::dto`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub industry_connected: bool,
    pub party_id: Option<i64>,
    /// `None` when the candidate is unaffiliated.
    pub party_name: Option<String>,
}

/// Data for creating a new candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCandidate {
    pub first_name: String,
    pub last_name: String,
    pub industry_connected: bool,
    pub party_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Party {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}
