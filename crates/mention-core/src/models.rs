use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Deserializes a field that distinguishes "absent" from "explicitly null":
/// a present field (null or not) lands in `Some(..)`, absence is handled by
/// `#[serde(default)]` and stays `None`.
fn tri_state<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Classification of a raw string against GitHub URL shapes.
///
/// `Unknown` is a valid terminal state for unparseable input, not an
/// error; callers branch on it before attempting any network call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParsedGithubUrl {
    Pull {
        owner: String,
        repo: String,
        number: u64,
    },
    Issue {
        owner: String,
        repo: String,
        number: u64,
    },
    Repo {
        owner: String,
        repo: String,
    },
    User {
        username: String,
    },
    Unknown,
}

impl ParsedGithubUrl {
    /// Returns true when the variant maps to a fetchable GitHub REST endpoint.
    pub fn is_fetchable(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Normalized GitHub resource, the single contract consumed by every
/// display surface. The `kind` tag discriminates the variant on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GithubResource {
    Pull(PullResource),
    Issue(IssueResource),
    User(UserResource),
    Repo(RepoResource),
}

impl GithubResource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Pull(_) => ResourceKind::Pull,
            Self::Issue(_) => ResourceKind::Issue,
            Self::User(_) => ResourceKind::User,
            Self::Repo(_) => ResourceKind::Repo,
        }
    }

    pub fn html_url(&self) -> &str {
        match self {
            Self::Pull(p) => &p.html_url,
            Self::Issue(i) => &i.html_url,
            Self::User(u) => &u.html_url,
            Self::Repo(r) => &r.html_url,
        }
    }
}

/// The four resource kinds, used where only the tag matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Pull,
    Issue,
    User,
    Repo,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pull => "pull",
            Self::Issue => "issue",
            Self::User => "user",
            Self::Repo => "repo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

/// Author/actor attached to issues and pull requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Base/head branch reference on a pull request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchRef {
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<RepoRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoRef {
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullResource {
    pub id: u64,
    pub number: u64,
    pub state: IssueState,
    pub merged: bool,
    pub draft: bool,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub user: ResourceUser,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub html_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Label>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<BranchRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<BranchRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueResource {
    pub id: u64,
    pub number: u64,
    pub state: IssueState,
    pub title: String,
    pub user: ResourceUser,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub html_url: String,
    pub comments: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Label>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResource {
    pub id: u64,
    pub login: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub html_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub followers: u64,
    pub following: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoOwner {
    pub login: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub html_url: String,
}

/// Repository resource.
///
/// `language` and `language_color` are tri-state: an absent field stays
/// absent on the wire (outer `None`), an explicit JSON null is preserved
/// (`Some(None)`). `visibility` is always present and may be null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoResource {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub html_url: String,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(
        default,
        deserialize_with = "tri_state",
        skip_serializing_if = "Option::is_none"
    )]
    pub language: Option<Option<String>>,
    #[serde(
        rename = "languageColor",
        default,
        deserialize_with = "tri_state",
        skip_serializing_if = "Option::is_none"
    )]
    pub language_color: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub owner: RepoOwner,
}
