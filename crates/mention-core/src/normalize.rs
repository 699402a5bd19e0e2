//! Converts raw, shape-ambiguous GitHub REST payloads into [`GithubResource`].
//!
//! Dispatch order is load-bearing: pull and issue payloads both carry
//! `title` + `user`, so pull-specific markers (`merged_at`, `draft`) must be
//! probed first. An already-normalized payload (one carrying both `kind` and
//! `html_url`) short-circuits, which makes normalization idempotent.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::colors::language_color;
use crate::error::NormalizeError;
use crate::models::*;

/// Normalize a raw JSON payload into a typed resource.
pub fn normalize(raw: &Value) -> Result<GithubResource, NormalizeError> {
    let obj = raw.as_object().ok_or(NormalizeError::NotAnObject)?;

    if obj.contains_key("kind") && obj.contains_key("html_url") {
        return Ok(serde_json::from_value(raw.clone())?);
    }

    if obj.contains_key("merged_at") || obj.contains_key("draft") {
        return Ok(GithubResource::Pull(normalize_pull(obj)));
    }
    if obj.contains_key("title") && obj.contains_key("comments") && obj.contains_key("user") {
        return Ok(GithubResource::Issue(normalize_issue(obj)));
    }
    if obj.contains_key("login") && !obj.contains_key("full_name") {
        return Ok(GithubResource::User(normalize_user(obj)));
    }
    if obj.contains_key("full_name") {
        return Ok(GithubResource::Repo(normalize_repo(obj)));
    }

    Err(NormalizeError::UnrecognizedShape)
}

fn normalize_pull(obj: &Map<String, Value>) -> PullResource {
    PullResource {
        id: u64_of(obj, "id").unwrap_or_default(),
        number: u64_of(obj, "number").unwrap_or_default(),
        state: state_of(obj),
        merged: bool_of(obj, "merged")
            || matches!(obj.get("merged_at"), Some(v) if !v.is_null()),
        draft: bool_of(obj, "draft"),
        title: str_of(obj, "title").unwrap_or_default(),
        body: str_of(obj, "body"),
        user: user_of(obj.get("user")),
        created_at: date_of(obj, "created_at"),
        updated_at: date_of(obj, "updated_at"),
        html_url: str_of(obj, "html_url").unwrap_or_default(),
        labels: labels_of(obj),
        base: branch_of(obj.get("base")),
        head: branch_of(obj.get("head")),
    }
}

fn normalize_issue(obj: &Map<String, Value>) -> IssueResource {
    IssueResource {
        id: u64_of(obj, "id").unwrap_or_default(),
        number: u64_of(obj, "number").unwrap_or_default(),
        state: state_of(obj),
        title: str_of(obj, "title").unwrap_or_default(),
        user: user_of(obj.get("user")),
        created_at: date_of(obj, "created_at"),
        html_url: str_of(obj, "html_url").unwrap_or_default(),
        comments: u64_of(obj, "comments").unwrap_or_default(),
        labels: labels_of(obj),
    }
}

fn normalize_user(obj: &Map<String, Value>) -> UserResource {
    let login = str_of(obj, "login").unwrap_or_default();
    UserResource {
        id: u64_of(obj, "id").unwrap_or_default(),
        html_url: str_of(obj, "html_url")
            .unwrap_or_else(|| format!("https://github.com/{login}")),
        login,
        name: str_of(obj, "name"),
        avatar_url: str_of(obj, "avatar_url"),
        bio: str_of(obj, "bio"),
        followers: u64_of(obj, "followers").unwrap_or_default(),
        following: u64_of(obj, "following").unwrap_or_default(),
        location: str_of(obj, "location"),
    }
}

fn normalize_repo(obj: &Map<String, Value>) -> RepoResource {
    let full_name = str_of(obj, "full_name").unwrap_or_default();

    let language = tri_str_of(obj, "language");
    let language_color = match &language {
        None => None,
        Some(None) => Some(None),
        Some(Some(lang)) => Some(language_color(lang).map(str::to_string)),
    };

    // Prefer the explicit visibility string, then derive from the boolean
    // `private` flag, then null.
    let visibility = match str_of(obj, "visibility").as_deref() {
        Some("private") => Some(Visibility::Private),
        Some("public") => Some(Visibility::Public),
        _ => match obj.get("private") {
            Some(Value::Bool(true)) => Some(Visibility::Private),
            Some(Value::Bool(false)) => Some(Visibility::Public),
            _ => None,
        },
    };

    let owner = match obj.get("owner").and_then(Value::as_object) {
        Some(o) => {
            let login = str_of(o, "login").unwrap_or_default();
            RepoOwner {
                html_url: str_of(o, "html_url")
                    .unwrap_or_else(|| format!("https://github.com/{login}")),
                avatar_url: str_of(o, "avatar_url"),
                login,
            }
        }
        // No owner object: synthesize one from the full_name prefix
        None => {
            let login = full_name
                .split('/')
                .next()
                .unwrap_or_default()
                .to_string();
            RepoOwner {
                html_url: format!("https://github.com/{login}"),
                avatar_url: None,
                login,
            }
        }
    };

    RepoResource {
        id: u64_of(obj, "id").unwrap_or_default(),
        name: str_of(obj, "name").unwrap_or_default(),
        html_url: str_of(obj, "html_url")
            .unwrap_or_else(|| format!("https://github.com/{full_name}")),
        full_name,
        description: str_of(obj, "description"),
        stargazers_count: u64_of(obj, "stargazers_count").unwrap_or_default(),
        forks_count: u64_of(obj, "forks_count").unwrap_or_default(),
        open_issues_count: u64_of(obj, "open_issues_count").unwrap_or_default(),
        visibility,
        language,
        language_color,
        pushed_at: date_of(obj, "pushed_at"),
        updated_at: date_of(obj, "updated_at"),
        owner,
    }
}

// ==================== Field coercion ====================
//
// Missing or type-mismatched fields coerce to None rather than erroring.

fn str_of(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Tri-state string: absent => None, null => Some(None), string => Some(Some).
fn tri_str_of(obj: &Map<String, Value>, key: &str) -> Option<Option<String>> {
    match obj.get(key) {
        None => None,
        Some(Value::Null) => Some(None),
        Some(Value::String(s)) => Some(Some(s.clone())),
        Some(_) => None,
    }
}

fn u64_of(obj: &Map<String, Value>, key: &str) -> Option<u64> {
    obj.get(key).and_then(Value::as_u64)
}

fn bool_of(obj: &Map<String, Value>, key: &str) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn date_of(obj: &Map<String, Value>, key: &str) -> Option<DateTime<Utc>> {
    obj.get(key)
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.with_timezone(&Utc))
}

fn state_of(obj: &Map<String, Value>) -> IssueState {
    match str_of(obj, "state").as_deref() {
        Some("closed") => IssueState::Closed,
        _ => IssueState::Open,
    }
}

fn user_of(value: Option<&Value>) -> ResourceUser {
    let obj = value.and_then(Value::as_object);
    let login = obj
        .and_then(|o| str_of(o, "login"))
        .unwrap_or_default();
    ResourceUser {
        id: obj.and_then(|o| u64_of(o, "id")),
        avatar_url: obj
            .and_then(|o| str_of(o, "avatar_url"))
            .unwrap_or_default(),
        html_url: obj
            .and_then(|o| str_of(o, "html_url"))
            .unwrap_or_else(|| format!("https://github.com/{login}")),
        login,
    }
}

fn labels_of(obj: &Map<String, Value>) -> Option<Vec<Label>> {
    let labels = obj.get("labels")?.as_array()?;
    Some(
        labels
            .iter()
            .filter_map(Value::as_object)
            .map(|l| Label {
                id: u64_of(l, "id").unwrap_or_default(),
                name: str_of(l, "name").unwrap_or_default(),
                color: str_of(l, "color"),
            })
            .collect(),
    )
}

fn branch_of(value: Option<&Value>) -> Option<BranchRef> {
    let obj = value?.as_object()?;
    Some(BranchRef {
        ref_name: str_of(obj, "ref"),
        repo: obj
            .get("repo")
            .and_then(Value::as_object)
            .and_then(|r| str_of(r, "full_name"))
            .map(|full_name| RepoRef { full_name }),
    })
}
