use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One message per missing field, e.g. `"firstName is required"`.
    #[error("Validation failed: {}", .messages.join(", "))]
    Validation { messages: Vec<String> },

    #[error("{field} must be {expected}")]
    InvalidField {
        field: String,
        expected: &'static str,
    },

    /// Driver error text, passed through to the client unchanged.
    #[error("{message}")]
    Database { message: String },
}

impl DomainError {
    pub fn validation(messages: Vec<String>) -> Self {
        Self::Validation { messages }
    }

    pub fn invalid_field(field: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidField {
            field: field.into(),
            expected,
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Keep the innermost cause: repositories add context, clients want the driver text.
    pub fn from_repo(err: anyhow::Error) -> Self {
        Self::database(err.root_cause().to_string())
    }
}
