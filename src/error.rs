use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::upstream::UpstreamError;

pub const TEXT_REQUIRED: &str = "Text is required.";
pub const TEXT_TOO_LONG: &str = "Text too long (max 2000 characters).";
pub const INVALID_BODY: &str = "Request body must be a JSON object with an originalText string.";
pub const INVALID_LENS_BODY: &str = "Request body must be a JSON object with an original string.";

// Everything /filter can fail with
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("Too many requests. Please slow down.")]
    RateLimited,

    #[error("OPENAI_API_KEY not configured")]
    MissingApiKey,

    // Display stays generic, the source is only logged
    #[error("Upstream model failed. Please try again in a moment.")]
    Upstream(#[source] UpstreamError),
}

impl FilterError {
    pub fn status(&self) -> StatusCode {
        match self {
            FilterError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            FilterError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            FilterError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            FilterError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for FilterError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
