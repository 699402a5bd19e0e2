//! TTL cache over [`GithubClient`], the stand-in for the reactive
//! revalidation layer the UI consumes: repeated lookups within the
//! revalidation window are served without a network call, and invalid
//! input is a first-class state rather than an error.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use mention_core::{parse_github_url, GithubResource, ParsedGithubUrl};

use crate::client::{FetchOptions, GithubClient};

/// Default revalidation window, matching the proxy's cache horizon.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Observable state for a resource URL.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceState {
    /// Empty or unparseable input; no request was attempted.
    Invalid,
    Ready(GithubResource),
    Failed(String),
}

struct Entry {
    state: ResourceState,
    fetched_at: Instant,
}

pub struct ResourceCache {
    client: GithubClient,
    options: FetchOptions,
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry>>,
}

impl ResourceCache {
    pub fn new(client: GithubClient, options: FetchOptions) -> Self {
        Self::with_ttl(client, options, DEFAULT_TTL)
    }

    pub fn with_ttl(client: GithubClient, options: FetchOptions, ttl: Duration) -> Self {
        Self {
            client,
            options,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Current state for `url`, fetching if there is no fresh entry.
    ///
    /// Errors never escape: network or normalization failures become
    /// `Failed` states, and both successes and failures stay cached for
    /// the revalidation window.
    pub fn get(&self, url: &str) -> ResourceState {
        if parse_github_url(url) == ParsedGithubUrl::Unknown {
            return ResourceState::Invalid;
        }

        if let Ok(entries) = self.entries.lock() {
            if let Some(entry) = entries.get(url) {
                if entry.fetched_at.elapsed() < self.ttl {
                    return entry.state.clone();
                }
            }
        }

        let state = match self.client.get_resource(url, &self.options) {
            Ok(resource) => ResourceState::Ready(resource),
            Err(err) => ResourceState::Failed(err.to_string()),
        };

        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                url.to_string(),
                Entry {
                    state: state.clone(),
                    fetched_at: Instant::now(),
                },
            );
        }

        state
    }

    /// Drop the cached entry for `url`, forcing the next `get` to refetch.
    pub fn invalidate(&self, url: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(url);
        }
    }
}
