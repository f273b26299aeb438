use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::tmdb::TmdbError;

/// Error at the proxy boundary. Every upstream rejection is caught here and
/// turned into a structured JSON response instead of an unhandled 500.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    MissingParameter(String),
    #[error("upstream returned status {status}")]
    Upstream { status: u16 },
    #[error("upstream unreachable: {0}")]
    Network(String),
    #[error("upstream payload unreadable: {0}")]
    BadPayload(String),
}

impl From<TmdbError> for ApiError {
    fn from(err: TmdbError) -> Self {
        match err {
            TmdbError::Network(e) => ApiError::Network(e.to_string()),
            TmdbError::Status { status } => ApiError::Upstream { status },
            TmdbError::Decode(e) => ApiError::BadPayload(e.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::MissingParameter(_) => "missing_parameter",
            ApiError::Upstream { .. } => "upstream",
            ApiError::Network(_) => "network",
            ApiError::BadPayload(_) => "bad_payload",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            // Relay upstream client errors (404 and friends); upstream
            // server errors become a 502 from us.
            ApiError::Upstream { status } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            ApiError::Network(_) | ApiError::BadPayload(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
