//! API error type with IntoResponse.
//!
//! Every failure branch of the proxy resolves to an explicit HTTP
//! response; upstream exceptions never escape a handler.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use github_client::GithubError;

#[derive(Debug)]
pub enum ApiError {
    /// Missing, invalid, or unsupported request input (400).
    BadRequest {
        message: String,
        code: Option<&'static str>,
    },

    /// Upstream GitHub failure, mirrored status and message.
    Upstream {
        status: u16,
        message: String,
        code: Option<&'static str>,
    },

    /// Anything else (500, logged).
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            code: None,
        }
    }

    /// Wrap a client error for the generator surface, which carries the
    /// coarse classification code alongside the message.
    pub fn from_github(err: &GithubError) -> Self {
        match err.status() {
            Some(status) => Self::Upstream {
                status,
                message: err.to_string(),
                code: Some(err.code()),
            },
            None => Self::BadRequest {
                message: err.to_string(),
                code: Some(err.code()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, code) = match self {
            Self::BadRequest { message, code } => (StatusCode::BAD_REQUEST, message, code),
            Self::Upstream {
                status,
                message,
                code,
            } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message,
                code,
            ),
            Self::Internal { message } => {
                tracing::error!("internal error: {message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message, None)
            }
        };

        let body = match code {
            Some(code) => json!({ "error": message, "code": code }),
            None => json!({ "error": message }),
        };
        (status, Json(body)).into_response()
    }
}
