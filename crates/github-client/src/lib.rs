pub mod cache;
pub mod client;
pub mod error;
pub mod fallback;
pub mod tokens;

#[cfg(test)]
mod fallback_tests;

pub use cache::{ResourceCache, ResourceState};
pub use client::{rest_endpoint, FetchOptions, GithubClient};
pub use error::{GithubError, Result};
pub use fallback::{fetch_with_fallback, FetchOutcome};
pub use tokens::{candidate_tokens, env_snapshot, resolve_base_url, tokens_from_env};
