use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::domain::error::DomainError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Error reply of every route: `{"error": ...}` where the payload is either
/// a message or, for missing fields, a list of messages.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: Value,
}

impl ApiError {
    pub fn new(status: StatusCode, error: Value) -> Self {
        Self { status, error }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, Value::String(message.into()))
    }

    /// Map a domain error. Validation problems are always 400; database
    /// failures use `db_status`, which differs between list and other routes.
    pub fn from_domain(err: DomainError, db_status: StatusCode) -> Self {
        match err {
            DomainError::Validation { messages } => {
                Self::new(StatusCode::BAD_REQUEST, json!(messages))
            }
            DomainError::InvalidField { .. } => Self::bad_request(err.to_string()),
            DomainError::Database { message } => {
                tracing::error!(error = %message, "Database error occurred");
                Self::new(db_status, Value::String(message))
            }
        }
    }

    /// 400 for failures of single-row reads and writes.
    pub fn query(err: DomainError) -> Self {
        Self::from_domain(err, StatusCode::BAD_REQUEST)
    }

    /// 500 for failures of list reads.
    pub fn list(err: DomainError) -> Self {
        Self::from_domain(err, StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        Self::new(rejection.status(), Value::String(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_becomes_list_of_messages() {
        let err = ApiError::query(DomainError::validation(vec![
            "firstName is required".into(),
        ]));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error, json!(["firstName is required"]));
    }

    #[test]
    fn database_status_depends_on_route_kind() {
        let list = ApiError::list(DomainError::database("no such table: candidates"));
        assert_eq!(list.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(list.error, json!("no such table: candidates"));

        let query = ApiError::query(DomainError::database("FOREIGN KEY constraint failed"));
        assert_eq!(query.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_field_is_bad_request_even_for_lists() {
        let err = ApiError::list(DomainError::invalid_field("firstName", "a string"));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error, json!("firstName must be a string"));
    }
}
