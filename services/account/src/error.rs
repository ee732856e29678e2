//! Custom error types for the account service

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// The four failure classes every error collapses into at the boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Structurally invalid input
    BadRequest,
    /// Name already taken, deleted accounts included
    Conflict,
    /// Wrong credential, or unknown account/session/token
    Unauthorized,
    /// Contract violations and infrastructure failures
    Internal,
}

impl ErrorKind {
    /// HTTP status the kind is reported with
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed client-facing message of the kind
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "bad request",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Internal => "internal server error",
        }
    }
}

/// Custom error type for the account service
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid name or password format
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Account name already in use
    #[error("Conflict")]
    Conflict,

    /// Authentication failure
    #[error("Unauthorized")]
    Unauthorized,

    /// Broken internal invariant
    #[error("Internal error: {0}")]
    Internal(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::BadRequest(_) => ErrorKind::BadRequest,
            AppError::Conflict => ErrorKind::Conflict,
            AppError::Unauthorized => ErrorKind::Unauthorized,
            AppError::Internal(_) | AppError::Database(_) => ErrorKind::Internal,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(DatabaseError::Query(err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        if kind == ErrorKind::Internal {
            error!("Request failed: {}", self);
        }

        let body = Json(json!({
            "message": kind.message(),
        }));

        (kind.status_code(), body).into_response()
    }
}

/// Type alias for account service results
pub type AppResult<T> = Result<T, AppError>;
