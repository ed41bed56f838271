//! Typed errors per layer and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid DATABASE_URL: {0}")]
    DatabaseUrl(String),
}

/// Storage and repository failures. `NotFound` is the "no rows" condition.
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("no rows")]
    NotFound,
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepoError {
    /// Maps sqlx's own "no rows" error onto `NotFound` so callers match one variant.
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound,
            other => RepoError::Database(other),
        }
    }
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("user {0} not found")]
    UserNotFound(i64),
    #[error(transparent)]
    Repository(#[from] RepoError),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::UserNotFound(id) => AppError::NotFound(format!("user {}", id)),
            ServiceError::Repository(e) => AppError::Internal(e.to_string()),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "bad request");
                (StatusCode::BAD_REQUEST, "bad_request", msg)
            }
            AppError::NotFound(what) => (StatusCode::NOT_FOUND, "not_found", format!("{} not found", what)),
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal server error".to_string(),
                )
            }
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}
