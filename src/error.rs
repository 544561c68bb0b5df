use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{contact::ValidationError, models::ErrorBody, session::AuthError};

/// ApiError
///
/// Everything a handler can fail with, mapped onto a status code and a JSON
/// `ErrorBody`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid credentials")]
    Unauthorized,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => ApiError::Unauthorized,
            AuthError::Unavailable(reason) => ApiError::Unavailable(reason),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
            ApiError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_failed"),
            ApiError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };

        // Internal details are logged, never sent.
        let message = match &self {
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "request failed");
                "internal server error".to_string()
            }
            ApiError::Unavailable(detail) => {
                tracing::warn!(%detail, "upstream unavailable");
                "service temporarily unavailable".to_string()
            }
            other => other.to_string(),
        };

        let fields = match self {
            ApiError::Validation(e) => e.fields,
            _ => Vec::new(),
        };

        let body = ErrorBody {
            error: code.to_string(),
            message,
            fields,
        };
        (status, Json(body)).into_response()
    }
}
