use crate::dto::ApiResponse;
use axum::{Json, http::StatusCode, response::IntoResponse};
use plume_cache::CacheError;
use plume_kpi::KpiError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Serialize, Deserialize)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("Bad gateway: {0}")]
    BadGateway(String),
    #[error("Internal server error")]
    InternalServerError,
}

impl From<CacheError> for ApiError {
    fn from(err: CacheError) -> Self {
        if err.is_missing() {
            return Self::ServiceUnavailable(
                "No data available yet, trigger a refresh first".to_string(),
            );
        }
        // Corrupt or unreadable cache: keep the details in the logs.
        tracing::error!("Failed to load cached snapshots: {}", err);
        Self::InternalServerError
    }
}

impl From<KpiError> for ApiError {
    fn from(err: KpiError) -> Self {
        tracing::error!("Cached rows violate the data contract: {}", err);
        Self::InternalServerError
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, msg) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            Self::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            Self::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };
        let response: ApiResponse<()> = ApiResponse::error(msg);
        (status, Json(response)).into_response()
    }
}
