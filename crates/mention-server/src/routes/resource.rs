//! `GET /api/github/resource` — proxy a GitHub web URL to the matching
//! REST endpoint with token fallback, relaying conditional-request
//! semantics both ways.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use github_client::{fetch_with_fallback, rest_endpoint, FetchOutcome};
use mention_core::{normalize, parse_github_url};

use crate::error::ApiError;
use crate::server::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/github/resource", get(get_resource))
}

#[derive(Debug, Deserialize)]
struct ResourceQuery {
    url: Option<String>,
}

async fn get_resource(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResourceQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let Some(url) = query.url.filter(|u| !u.trim().is_empty()) else {
        return Err(ApiError::bad_request("Missing url parameter"));
    };

    // Only pull/issue/user/repo URLs map to a serviceable endpoint.
    let parsed = parse_github_url(&url);
    let Some(endpoint) = rest_endpoint(state.client.api_base(), &parsed) else {
        return Err(ApiError::bad_request(format!(
            "Unsupported GitHub url: {url}"
        )));
    };

    let if_none_match = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let tokens = state.candidate_tokens();
    let agent = state.client.agent().clone();
    let outcome = tokio::task::spawn_blocking(move || {
        fetch_with_fallback(&agent, &endpoint, &tokens, if_none_match.as_deref())
    })
    .await
    .map_err(|e| ApiError::Internal {
        message: e.to_string(),
    })?
    .map_err(|e| ApiError::Internal {
        message: e.to_string(),
    })?;

    match outcome {
        FetchOutcome::NotModified => Ok(StatusCode::NOT_MODIFIED.into_response()),
        FetchOutcome::Success { body, etag } => {
            let resource = normalize(&body).map_err(|e| ApiError::Internal {
                message: e.to_string(),
            })?;
            let mut response = Json(resource).into_response();
            if let Some(etag) = etag {
                if let Ok(value) = HeaderValue::from_str(&etag) {
                    response.headers_mut().insert(header::ETAG, value);
                }
            }
            Ok(response)
        }
        FetchOutcome::Failure { status, message } => Err(ApiError::Upstream {
            status,
            message,
            code: None,
        }),
    }
}
