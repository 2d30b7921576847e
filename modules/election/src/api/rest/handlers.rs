use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, response::Json, Extension};
use serde_json::Value;
use tracing::{error, info, instrument};

use crate::api::rest::dto::{self, CandidateDto, Envelope, PartyDto};
use crate::api::rest::error::{ApiError, ApiResult};
use crate::api::rest::payload::Payload;
use crate::domain::service::Service;

/// Path ids are taken as strings so a bad id gets the JSON error shape.
fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::bad_request(format!("id must be an integer, got '{raw}'")))
}

/// List all candidates with their party names
#[instrument(name = "election.api.list_candidates", skip_all)]
pub async fn list_candidates(
    Extension(svc): Extension<Arc<Service>>,
) -> ApiResult<Json<Envelope<Vec<CandidateDto>>>> {
    info!("Listing candidates");

    match svc.list_candidates().await {
        Ok(rows) => Ok(Json(Envelope::success(
            rows.into_iter().map(CandidateDto::from).collect(),
        ))),
        Err(e) => {
            error!("Failed to list candidates: {}", e);
            Err(ApiError::list(e))
        }
    }
}

/// Get a single candidate; `data` is null when there is no such id
#[instrument(name = "election.api.get_candidate", skip_all, fields(id = %raw_id))]
pub async fn get_candidate(
    Extension(svc): Extension<Arc<Service>>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Envelope<Option<CandidateDto>>>> {
    let id = parse_id(&raw_id)?;
    info!("Getting candidate with id: {}", id);

    match svc.get_candidate(id).await {
        Ok(row) => Ok(Json(Envelope::success(row.map(CandidateDto::from)))),
        Err(e) => {
            error!("Failed to get candidate {}: {}", id, e);
            Err(ApiError::query(e))
        }
    }
}

/// Create a candidate; the submitted body is echoed back as `data`
#[instrument(name = "election.api.create_candidate", skip_all)]
pub async fn create_candidate(
    Extension(svc): Extension<Arc<Service>>,
    Payload(body): Payload,
) -> ApiResult<Json<Envelope<Value>>> {
    let new_candidate = dto::new_candidate_from_payload(&body).map_err(|e| {
        info!("Rejected candidate payload: {}", e);
        ApiError::query(e)
    })?;

    match svc.create_candidate(new_candidate).await {
        Ok(changes) => Ok(Json(
            Envelope::success(Value::Object(body)).with_changes(changes),
        )),
        Err(e) => {
            error!("Failed to create candidate: {}", e);
            Err(ApiError::query(e))
        }
    }
}

/// Change (or clear) a candidate's party
#[instrument(name = "election.api.update_candidate_party", skip_all, fields(id = %raw_id))]
pub async fn update_candidate_party(
    Extension(svc): Extension<Arc<Service>>,
    Path(raw_id): Path<String>,
    Payload(body): Payload,
) -> ApiResult<Json<Envelope<Value>>> {
    let id = parse_id(&raw_id)?;
    let party_id = dto::party_assignment_from_payload(&body).map_err(|e| {
        info!("Rejected party assignment for candidate {}: {}", id, e);
        ApiError::query(e)
    })?;

    match svc.update_candidate_party(id, party_id).await {
        Ok(0) => Ok(Json(Envelope::message("Candidate not found"))),
        Ok(changes) => Ok(Json(
            Envelope::success(Value::Object(body)).with_changes(changes),
        )),
        Err(e) => {
            error!("Failed to update candidate {}: {}", id, e);
            Err(ApiError::query(e))
        }
    }
}

#[instrument(name = "election.api.delete_candidate", skip_all, fields(id = %raw_id))]
pub async fn delete_candidate(
    Extension(svc): Extension<Arc<Service>>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Envelope<()>>> {
    let id = parse_id(&raw_id)?;
    info!("Deleting candidate: {}", id);

    match svc.delete_candidate(id).await {
        Ok(0) => Ok(Json(Envelope::message("Candidate not found"))),
        Ok(changes) => Ok(Json(Envelope::deleted(changes, id))),
        Err(e) => {
            error!("Failed to delete candidate {}: {}", id, e);
            Err(ApiError::query(e))
        }
    }
}

#[instrument(name = "election.api.list_parties", skip_all)]
pub async fn list_parties(
    Extension(svc): Extension<Arc<Service>>,
) -> ApiResult<Json<Envelope<Vec<PartyDto>>>> {
    info!("Listing parties");

    match svc.list_parties().await {
        Ok(rows) => Ok(Json(Envelope::success(
            rows.into_iter().map(PartyDto::from).collect(),
        ))),
        Err(e) => {
            error!("Failed to list parties: {}", e);
            Err(ApiError::list(e))
        }
    }
}

#[instrument(name = "election.api.get_party", skip_all, fields(id = %raw_id))]
pub async fn get_party(
    Extension(svc): Extension<Arc<Service>>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Envelope<Option<PartyDto>>>> {
    let id = parse_id(&raw_id)?;
    info!("Getting party with id: {}", id);

    match svc.get_party(id).await {
        Ok(row) => Ok(Json(Envelope::success(row.map(PartyDto::from)))),
        Err(e) => {
            error!("Failed to get party {}: {}", id, e);
            Err(ApiError::query(e))
        }
    }
}

#[instrument(name = "election.api.delete_party", skip_all, fields(id = %raw_id))]
pub async fn delete_party(
    Extension(svc): Extension<Arc<Service>>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Envelope<()>>> {
    let id = parse_id(&raw_id)?;
    info!("Deleting party: {}", id);

    match svc.delete_party(id).await {
        Ok(0) => Ok(Json(Envelope::message("Party not found"))),
        Ok(changes) => Ok(Json(Envelope::deleted(changes, id))),
        Err(e) => {
            error!("Failed to delete party {}: {}", id, e);
            Err(ApiError::query(e))
        }
    }
}

/// Unsupported verb on a known path: same empty 404 as unknown paths.
pub async fn method_not_routed() -> StatusCode {
    StatusCode::NOT_FOUND
}
