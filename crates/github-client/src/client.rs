use std::time::Duration;
use ureq::Agent;

use mention_core::{normalize, parse_github_url, GithubResource, ParsedGithubUrl};

use crate::error::{GithubError, Result};
use crate::tokens::{env_snapshot, resolve_base_url};

/// Unified fetch entry point used by the CLI, the snapshot generator, and
/// the server. Direct mode hits the GitHub REST API anonymously and
/// normalizes the payload; server mode goes through the proxy route and
/// trusts its pre-normalized body.
pub struct GithubClient {
    agent: Agent,
    api_base: String,
}

/// Per-call options for [`GithubClient::get_resource`].
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Route the request through the server proxy instead of GitHub.
    pub use_server: bool,
    /// Explicit origin for server mode; falls back to the environment chain.
    pub base_url: Option<String>,
}

/// Map a parsed GitHub URL onto its REST endpoint. `None` for `Unknown`.
pub fn rest_endpoint(api_base: &str, parsed: &ParsedGithubUrl) -> Option<String> {
    let path = match parsed {
        ParsedGithubUrl::Pull {
            owner,
            repo,
            number,
        } => format!(
            "/repos/{}/{}/pulls/{number}",
            urlencoding::encode(owner),
            urlencoding::encode(repo)
        ),
        ParsedGithubUrl::Issue {
            owner,
            repo,
            number,
        } => format!(
            "/repos/{}/{}/issues/{number}",
            urlencoding::encode(owner),
            urlencoding::encode(repo)
        ),
        ParsedGithubUrl::Repo { owner, repo } => format!(
            "/repos/{}/{}",
            urlencoding::encode(owner),
            urlencoding::encode(repo)
        ),
        ParsedGithubUrl::User { username } => {
            format!("/users/{}", urlencoding::encode(username))
        }
        ParsedGithubUrl::Unknown => return None,
    };
    Some(format!("{api_base}{path}"))
}

impl GithubClient {
    /// Create a client targeting api.github.com.
    pub fn new() -> Self {
        Self::with_api_base("https://api.github.com")
    }

    /// Create a client with a custom API base URL (for testing).
    pub fn with_api_base(api_base: &str) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// The underlying agent, shared with the server's fallback loop.
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Resolve a GitHub web URL to a normalized resource.
    pub fn get_resource(&self, url: &str, options: &FetchOptions) -> Result<GithubResource> {
        if options.use_server {
            self.get_via_server(url, options)
        } else {
            self.get_direct(url)
        }
    }

    fn get_direct(&self, url: &str) -> Result<GithubResource> {
        let parsed = parse_github_url(url);
        let endpoint = rest_endpoint(&self.api_base, &parsed)
            .ok_or_else(|| GithubError::InvalidUrl(url.to_string()))?;

        let response = self
            .agent
            .get(&endpoint)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .call()
            .map_err(GithubError::Http)?;

        let mut response = self.check_response(response)?;
        let body: serde_json::Value = response.body_mut().read_json()?;
        Ok(normalize(&body)?)
    }

    fn get_via_server(&self, url: &str, options: &FetchOptions) -> Result<GithubResource> {
        let base = resolve_base_url(options.base_url.as_deref(), &env_snapshot())
            .ok_or(GithubError::NoBaseUrl)?;
        let endpoint = format!(
            "{base}/api/github/resource?url={}",
            urlencoding::encode(url)
        );

        let response = self.agent.get(&endpoint).call().map_err(GithubError::Http)?;
        let mut response = self.check_response(response)?;

        // Proxy responses are normalized before they leave the server.
        let resource: GithubResource = response.body_mut().read_json()?;
        Ok(resource)
    }

    /// Check response status and return an error if not successful.
    fn check_response(
        &self,
        mut response: ureq::http::Response<ureq::Body>,
    ) -> Result<ureq::http::Response<ureq::Body>> {
        let status = response.status().as_u16();

        if (200..300).contains(&status) {
            return Ok(response);
        }

        // Exhausted rate limit: 403 with x-ratelimit-remaining: 0
        if status == 403 {
            if let Some(remaining) = response.headers().get("x-ratelimit-remaining") {
                if remaining.to_str().unwrap_or("") == "0" {
                    return Err(GithubError::RateLimited { status });
                }
            }
        }

        let body = response
            .body_mut()
            .read_to_string()
            .unwrap_or_else(|_| String::new());

        let message = if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(&body) {
            parsed
                .get("message")
                .or_else(|| parsed.get("error"))
                .and_then(|m| m.as_str())
                .unwrap_or(&body)
                .to_string()
        } else if body.is_empty() {
            format!("GitHub error {status}")
        } else {
            body
        };

        Err(GithubError::Api { status, message })
    }
}

impl Default for GithubClient {
    fn default() -> Self {
        Self::new()
    }
}
