pub mod fetch;
pub mod parse;
pub mod snapshot;

use github_client::GithubClient;

/// Build a client, honoring a `GITHUB_API_URL` override the way `gh` does.
pub fn client() -> GithubClient {
    match std::env::var("GITHUB_API_URL") {
        Ok(base) if !base.trim().is_empty() => GithubClient::with_api_base(base.trim()),
        _ => GithubClient::new(),
    }
}
