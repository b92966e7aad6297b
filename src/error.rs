use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Reasons a caller is refused by the cohort or selection policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolicyViolation {
    #[error("you do not own this participant")]
    NotOwner,

    #[error("only mentees can view or choose their top three matches")]
    MentorsCannotSelect,

    #[error("matching has not yet begun for this cohort")]
    MatchingNotStarted,

    #[error("matching is finished for this cohort")]
    MatchingFinished,

    #[error("you have already selected your top three")]
    AlreadySelected,

    #[error("you must choose exactly your top three matches, each once, ordered by preference")]
    InvalidChoices,

    #[error("this action requires a staff account")]
    StaffOnly,
}

/// State clashes detected while writing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConflictKind {
    #[error("you have already applied for this cohort")]
    AlreadyRegistered,

    #[error("this cohort is full")]
    CohortFull,

    #[error("registration for this cohort is not open")]
    RegistrationClosed,

    #[error("this cohort has already been matched")]
    AlreadyMatched,

    #[error("a user with this email already exists")]
    EmailTaken,
}

/// Every rejection the service can hand back to a caller
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Policy(#[from] PolicyViolation),

    #[error("Conflict: {0}")]
    Conflict(#[from] ConflictKind),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl MatchError {
    pub fn not_found(what: &str, id: impl std::fmt::Display) -> Self {
        MatchError::NotFound(format!("{} {} not found", what, id))
    }

    fn code(&self) -> &'static str {
        match self {
            MatchError::NotFound(_) => "not_found",
            MatchError::Policy(_) => "forbidden",
            MatchError::Conflict(_) => "conflict",
            MatchError::Validation(_) => "validation_failed",
            MatchError::Unauthorized(_) => "unauthorized",
            MatchError::Storage(_) => "storage_error",
        }
    }
}

impl From<validator::ValidationErrors> for MatchError {
    fn from(errors: validator::ValidationErrors) -> Self {
        MatchError::Validation(errors.to_string())
    }
}

impl ResponseError for MatchError {
    fn status_code(&self) -> StatusCode {
        match self {
            MatchError::NotFound(_) => StatusCode::NOT_FOUND,
            MatchError::Policy(_) => StatusCode::FORBIDDEN,
            MatchError::Conflict(_) => StatusCode::CONFLICT,
            MatchError::Validation(_) => StatusCode::BAD_REQUEST,
            MatchError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            MatchError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        // Storage details stay in the logs
        let message = match self {
            MatchError::Storage(_) => "internal storage error".to_string(),
            other => other.to_string(),
        };
        HttpResponse::build(status).json(ErrorResponse {
            error: self.code().to_string(),
            message,
            status_code: status.as_u16(),
        })
    }
}
