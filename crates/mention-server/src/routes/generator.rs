//! `GET /api/mentions/generator` — produce an embeddable snapshot
//! component (or its registry manifest) for a GitHub URL.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::server::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/mentions/generator", get(generate))
}

#[derive(Debug, Deserialize)]
struct GeneratorQuery {
    url: Option<String>,
    /// Flag: when present, respond with the registry manifest only.
    registry: Option<String>,
}

async fn generate(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GeneratorQuery>,
) -> Result<Response, ApiError> {
    let Some(url) = query.url.filter(|u| !u.trim().is_empty()) else {
        return Err(ApiError::BadRequest {
            message: "Missing url parameter".to_string(),
            code: Some("HTTP_ERROR"),
        });
    };

    let worker_state = state.clone();
    let worker_url = url.clone();
    let snapshot = tokio::task::spawn_blocking(move || worker_state.generator.generate(&worker_url))
        .await
        .map_err(|e| ApiError::Internal {
            message: e.to_string(),
        })?
        .map_err(|e| ApiError::from_github(&e))?;

    if query.registry.is_some() {
        return Ok(Json(snapshot.registry).into_response());
    }

    Ok(Json(json!({
        "resource": snapshot.resource,
        "registry": snapshot.registry,
        "code": snapshot.code,
        "componentName": snapshot.component_name,
        "slug": snapshot.slug,
    }))
    .into_response())
}
