use thiserror::Error;

/// Failure to normalize a raw payload into a [`crate::GithubResource`].
///
/// Normalization is all-or-nothing: a payload matching none of the known
/// GitHub shapes never yields a partially-typed value.
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("expected a JSON object")]
    NotAnObject,

    #[error("unrecognized GitHub payload shape")]
    UnrecognizedShape,

    #[error("invalid normalized payload: {0}")]
    Invalid(#[from] serde_json::Error),
}
