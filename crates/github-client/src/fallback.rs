//! Sequential token-fallback fetch against a GitHub REST endpoint.
//!
//! Candidate tokens are tried in order. A 2xx or 304 ends the sequence
//! immediately. Failures in the retryable set {401, 403, 429} move on to
//! the next token; any other failure (404, 422, ...) is definitive and is
//! surfaced without trying further tokens or the anonymous fallback. The
//! anonymous request fires only when every token failed retryably, or no
//! tokens existed at all, and its result is authoritative either way.

use serde_json::Value;
use ureq::Agent;

use crate::error::{GithubError, Result};

/// Statuses worth retrying with different (or no) credentials.
const RETRYABLE_STATUSES: [u16; 3] = [401, 403, 429];

/// Terminal result of the fallback sequence.
#[derive(Debug)]
pub enum FetchOutcome {
    Success { body: Value, etag: Option<String> },
    NotModified,
    Failure { status: u16, message: String },
}

/// Run the fallback sequence against `endpoint`, relaying `if_none_match`
/// to every upstream attempt.
pub fn fetch_with_fallback(
    agent: &Agent,
    endpoint: &str,
    tokens: &[String],
    if_none_match: Option<&str>,
) -> Result<FetchOutcome> {
    for token in tokens {
        match attempt(agent, endpoint, Some(token), if_none_match)? {
            FetchOutcome::Failure { status, .. } if RETRYABLE_STATUSES.contains(&status) => {
                continue;
            }
            // Success, 304, or a definitive failure all end the sequence.
            outcome => return Ok(outcome),
        }
    }

    // Reached only when the token list is exhausted by retryable failures
    // (or was empty): one anonymous attempt, result authoritative.
    attempt(agent, endpoint, None, if_none_match)
}

fn attempt(
    agent: &Agent,
    endpoint: &str,
    token: Option<&str>,
    if_none_match: Option<&str>,
) -> Result<FetchOutcome> {
    let mut request = agent
        .get(endpoint)
        .header("Accept", "application/vnd.github+json")
        .header("X-GitHub-Api-Version", "2022-11-28");
    if let Some(token) = token {
        request = request.header("Authorization", &format!("Bearer {token}"));
    }
    if let Some(etag) = if_none_match {
        request = request.header("If-None-Match", etag);
    }

    let mut response = request.call().map_err(GithubError::Http)?;
    let status = response.status().as_u16();

    if status == 304 {
        return Ok(FetchOutcome::NotModified);
    }

    if (200..300).contains(&status) {
        let etag = response
            .headers()
            .get("etag")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body: Value = response.body_mut().read_json()?;
        return Ok(FetchOutcome::Success { body, etag });
    }

    Ok(FetchOutcome::Failure {
        status,
        message: failure_message(status, &mut response),
    })
}

/// Extract the upstream error message, preferring the GitHub `message`
/// field over the raw body, with a generic fallback.
fn failure_message(status: u16, response: &mut ureq::http::Response<ureq::Body>) -> String {
    let body = response
        .body_mut()
        .read_to_string()
        .unwrap_or_else(|_| String::new());

    if let Ok(parsed) = serde_json::from_str::<Value>(&body) {
        if let Some(message) = parsed.get("message").and_then(Value::as_str) {
            return message.to_string();
        }
    }
    if body.trim().is_empty() {
        format!("GitHub error {status}")
    } else {
        body
    }
}
