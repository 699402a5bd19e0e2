//! Credential and base-origin resolution over environment snapshots.
//!
//! Both routines are pure functions of a snapshot map so they can be
//! exercised without mutating process state; `env_snapshot` captures the
//! real environment at call time.

use std::collections::HashMap;

/// Credential sources, tried in this order.
pub const TOKEN_ENV_VARS: [&str; 4] = [
    "GITHUB_TOKEN",
    "GITHUB_TOKEN_ORG",
    "GH_TOKEN",
    "NEXT_PUBLIC_GITHUB_TOKEN",
];

/// Base-origin sources for server-mode requests issued from non-browser
/// contexts, tried in this order after any explicit argument.
pub const BASE_URL_ENV_VARS: [&str; 5] = [
    "NEXT_PUBLIC_APP_URL",
    "NEXT_PUBLIC_SITE_URL",
    "APP_URL",
    "NEXT_PUBLIC_VERCEL_URL",
    "VERCEL_URL",
];

/// Snapshot the process environment.
pub fn env_snapshot() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// Ordered, de-duplicated credential list from an environment snapshot.
///
/// Empty values and anything literally prefixed `public_` are excluded
/// regardless of source; an empty result is valid and means anonymous mode.
pub fn candidate_tokens(env: &HashMap<String, String>) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for var in TOKEN_ENV_VARS {
        let Some(value) = env.get(var) else { continue };
        let value = value.trim();
        if value.is_empty() || value.starts_with("public_") {
            continue;
        }
        if !tokens.iter().any(|t| t == value) {
            tokens.push(value.to_string());
        }
    }
    tokens
}

/// Convenience wrapper reading the process environment at call time.
pub fn tokens_from_env() -> Vec<String> {
    candidate_tokens(&env_snapshot())
}

/// Resolve the origin for relative `/api/...` endpoints.
///
/// Preference order: explicit argument, then [`BASE_URL_ENV_VARS`]. Bare
/// hosts (Vercel deployment URLs) are prefixed with `https://`. `None`
/// means no origin is resolvable, which is a caller error.
pub fn resolve_base_url(explicit: Option<&str>, env: &HashMap<String, String>) -> Option<String> {
    if let Some(url) = explicit {
        let url = url.trim();
        if !url.is_empty() {
            return Some(normalize_origin(url));
        }
    }
    for var in BASE_URL_ENV_VARS {
        if let Some(value) = env.get(var) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(normalize_origin(value));
            }
        }
    }
    None
}

fn normalize_origin(value: &str) -> String {
    let value = value.trim_end_matches('/');
    if value.starts_with("http://") || value.starts_with("https://") {
        value.to_string()
    } else {
        format!("https://{value}")
    }
}
