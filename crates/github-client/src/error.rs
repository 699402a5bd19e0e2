use mention_core::NormalizeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GithubError {
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Shape(#[from] NormalizeError),

    #[error("not a fetchable GitHub URL: {0}")]
    InvalidUrl(String),

    #[error("no base origin configured for server-mode requests")]
    NoBaseUrl,

    #[error("GitHub API rate limit exceeded")]
    RateLimited { status: u16 },

    #[error("GitHub error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl GithubError {
    /// HTTP status associated with the failure, when one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited { status } | Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Coarse classification surfaced to API consumers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::RateLimited { .. } => "RATE_LIMITED",
            _ => "HTTP_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, GithubError>;
