use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

/// Maps a core error onto an `{error}` JSON body.
#[derive(Debug)]
pub struct ApiError(pub sp_core::Error);

impl From<sp_core::Error> for ApiError {
    fn from(err: sp_core::Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use sp_core::Error;

        let (status, message) = match &self.0 {
            Error::UpstreamUnavailable(detail) => {
                (StatusCode::BAD_GATEWAY, format!("Failed to fetch: {}", detail))
            }
            Error::Http(e) => (StatusCode::BAD_GATEWAY, format!("Failed to fetch: {}", e)),
            Error::MalformedPayload(_) => {
                (StatusCode::BAD_GATEWAY, "No news data available".to_string())
            }
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };

        if status.is_server_error() && status != StatusCode::BAD_GATEWAY {
            error!(%status, "Request failed: {}", self.0);
        } else {
            warn!(%status, "Upstream failure: {}", self.0);
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
