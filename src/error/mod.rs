// Error types for the trilingo gateway

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Gemini API error: {0}")]
    GeminiApi(String),

    #[error("Gemini returned no usable reply: {0}")]
    EmptyReply(String),

    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

// Convert GatewayError to HTTP responses for Axum. The body shape
// {"success": false, "error": ...} is what the site widgets consume.
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // Validation messages go out verbatim; the widgets match on them.
            GatewayError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            GatewayError::NotFound(_) => (StatusCode::NOT_FOUND, "Not found".to_string()),
            // Upstream detail is already logged; the wire gets the canned text.
            GatewayError::Translation(_) => (
                StatusCode::BAD_GATEWAY,
                "Translation failed. Please try again.".to_string(),
            ),
            err @ (GatewayError::GeminiApi(_)
            | GatewayError::EmptyReply(_)
            | GatewayError::Http(_)) => (StatusCode::BAD_GATEWAY, err.to_string()),
            err @ (GatewayError::Config(_) | GatewayError::ConfigParsing(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            err => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };

        let body = json!({
            "success": false,
            "error": message,
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
