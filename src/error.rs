use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures surfaced to HTTP callers.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The caller sent something we (or the vendor) refused to act on.
    #[error("invalid input: {0}")]
    Validation(String),

    /// A vendor could not be reached or rejected the request.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("not found: {0}")]
    NotFound(String),
}

impl ServiceError {
    /// Classify a non-success vendor response.
    pub fn from_vendor_status(vendor: &str, status: reqwest::StatusCode, body: &str) -> Self {
        let detail = format!("{vendor} returned {status}: {body}");
        match status.as_u16() {
            404 => ServiceError::NotFound(detail),
            400 | 422 => ServiceError::Validation(detail),
            _ => ServiceError::UpstreamUnavailable(detail),
        }
    }

    /// Message without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            ServiceError::Validation(msg)
            | ServiceError::UpstreamUnavailable(msg)
            | ServiceError::NotFound(msg) => msg,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        ServiceError::UpstreamUnavailable(e.to_string())
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.message() }));
        (status, body).into_response()
    }
}
