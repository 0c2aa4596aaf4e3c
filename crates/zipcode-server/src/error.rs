//! Error types for the zip code service.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use zipcode_core::LoadError;

use crate::oidc::ExchangeError;

/// Start-up errors. Any of these stops the service before it listens.
#[derive(Error, Debug)]
pub enum Error {
    #[error("dataset error: {0}")]
    Dataset(#[from] LoadError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("token exchange error: {0}")]
    Exchange(#[from] ExchangeError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Request-level failures, rendered as JSON error bodies.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Zip code not found.")]
    NotFound,

    #[error("Authentication credentials were not provided.")]
    Unauthorized,

    #[error("Authorization code is missing")]
    MissingCode,

    #[error("token exchange is not configured")]
    ExchangeUnavailable,

    /// Token provider failure, carrying its error text
    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::MissingCode => StatusCode::BAD_REQUEST,
            ApiError::ExchangeUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ExchangeError> for ApiError {
    fn from(err: ExchangeError) -> Self {
        match err {
            ExchangeError::Upstream(message) => ApiError::Upstream(message),
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        match self {
            ApiError::NotFound => (status, Json(json!({ "message": message }))).into_response(),
            ApiError::Unauthorized => (
                status,
                [(header::WWW_AUTHENTICATE, "Bearer")],
                Json(json!({ "detail": message })),
            )
                .into_response(),
            ApiError::MissingCode | ApiError::ExchangeUnavailable | ApiError::Upstream(_) => {
                (status, Json(json!({ "error": message }))).into_response()
            }
        }
    }
}
