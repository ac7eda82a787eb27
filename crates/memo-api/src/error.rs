//! HTTP error responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Errors returned from request handlers as `{"error": ...}` JSON bodies.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed input.
    BadRequest(String),
    /// A required server-side setting (such as the model key) is absent.
    NotConfigured(String),
    /// An upstream call failed; `message` carries the underlying cause.
    Upstream {
        error: String,
        message: Option<String>,
    },
}

impl ApiError {
    pub fn upstream(error: impl Into<String>) -> Self {
        ApiError::Upstream {
            error: error.into(),
            message: None,
        }
    }

    pub fn upstream_with_message(error: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Upstream {
            error: error.into(),
            message: Some(message.into()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, serde_json::json!({ "error": msg }))
            }
            ApiError::NotConfigured(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": msg }),
            ),
            ApiError::Upstream { error, message } => {
                let body = match message {
                    Some(message) => serde_json::json!({ "error": error, "message": message }),
                    None => serde_json::json!({ "error": error }),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };

        (status, Json(body)).into_response()
    }
}
