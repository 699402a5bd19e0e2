//! Axum server setup: router assembly, CORS, request tracing, and
//! graceful shutdown on Ctrl+C / SIGTERM.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use github_client::{tokens_from_env, GithubClient};
use mention_snapshot::SnapshotGenerator;

use crate::routes;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:8787).
    pub bind_addr: SocketAddr,

    /// Allow any origin instead of localhost-only CORS.
    pub cors_permissive: bool,

    /// GitHub REST API base (overridable for testing).
    pub github_api_base: String,

    /// Directory holding the snapshot view templates.
    pub views_dir: PathBuf,

    /// Origin the snapshot generator uses to reach this server's own
    /// resource route; defaults to the bind address.
    pub self_base_url: Option<String>,

    /// Fixed credential list; `None` reads the process environment at
    /// request time.
    pub tokens: Option<Vec<String>>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8787)),
            cors_permissive: false,
            github_api_base: "https://api.github.com".to_string(),
            views_dir: SnapshotGenerator::default_views_dir(),
            self_base_url: None,
            tokens: None,
        }
    }
}

/// Shared application state.
pub struct AppState {
    pub client: GithubClient,
    pub generator: SnapshotGenerator,
    tokens: Option<Vec<String>>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        let self_base = config
            .self_base_url
            .clone()
            .unwrap_or_else(|| format!("http://{}", config.bind_addr));
        Self {
            client: GithubClient::with_api_base(&config.github_api_base),
            generator: SnapshotGenerator::new(
                GithubClient::with_api_base(&config.github_api_base),
                Some(self_base),
                config.views_dir.clone(),
            ),
            tokens: config.tokens.clone(),
        }
    }

    /// Credentials for the upstream fallback loop. Unless pinned by the
    /// config, the environment is re-read on every request.
    pub fn candidate_tokens(&self) -> Vec<String> {
        self.tokens.clone().unwrap_or_else(tokens_from_env)
    }
}

/// Assemble the application router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::resource::router())
        .merge(routes::generator::router())
        .with_state(state)
}

/// Run the HTTP server until shutdown.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let state = Arc::new(AppState::new(&config));

    let cors = if config.cors_permissive {
        tracing::warn!("CORS: permissive mode enabled, all origins allowed");
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list([
                "http://localhost:3000".parse().map_err(|_| ServerError::Config)?,
                "http://127.0.0.1:3000".parse().map_err(|_| ServerError::Config)?,
            ]))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let app = router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("mention server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            tracing::error!("failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => {
                tracing::error!("failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, starting shutdown"),
        _ = terminate => tracing::info!("received SIGTERM, starting shutdown"),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid server configuration")]
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 8787);
        assert!(!config.cors_permissive);
        assert_eq!(config.github_api_base, "https://api.github.com");
    }

    #[test]
    fn self_base_defaults_to_bind_addr() {
        let config = ServerConfig::default();
        let state = AppState::new(&config);
        // Pinned tokens absent: the env is consulted per request instead.
        assert!(state.tokens.is_none());
        let _ = state;
    }
}
