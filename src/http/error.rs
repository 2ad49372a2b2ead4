use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::catalog::CatalogError;
use crate::session::SessionError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors returned by HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Session {0} not found")]
    SessionNotFound(String),

    #[error("Interview {0} has not been completed")]
    NotCompleted(String),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Catalog(CatalogError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::SessionNotFound(_) | ApiError::NotCompleted(_) => StatusCode::NOT_FOUND,
            ApiError::Session(SessionError::Rejected(_)) => StatusCode::CONFLICT,
            ApiError::Session(SessionError::PermissionDenied(_)) => StatusCode::FORBIDDEN,
            ApiError::Session(SessionError::Closed) => StatusCode::GONE,
        };

        if status == StatusCode::GONE {
            error!("{}", self);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
