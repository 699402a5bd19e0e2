use crate::models::ParsedGithubUrl;

/// Classify a raw string against GitHub URL shapes.
///
/// Pure and infallible: anything that is not a recognizable GitHub web
/// URL comes back as `ParsedGithubUrl::Unknown`. The scheme and a
/// leading `www.` are optional; query strings and fragments are ignored.
/// Pull and issue URLs tolerate trailing path segments (`/files`,
/// `/commits`, ...) after the number.
pub fn parse_github_url(input: &str) -> ParsedGithubUrl {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return ParsedGithubUrl::Unknown;
    }

    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    let without_www = without_scheme
        .strip_prefix("www.")
        .unwrap_or(without_scheme);

    let Some(path) = without_www.strip_prefix("github.com") else {
        return ParsedGithubUrl::Unknown;
    };
    // Reject lookalike hosts such as "github.community" or "github.com.evil.com"
    if !path.is_empty() && !path.starts_with('/') {
        return ParsedGithubUrl::Unknown;
    }

    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [owner, repo, "pull", number, ..] => match parse_number(number) {
            Some(number) => ParsedGithubUrl::Pull {
                owner: (*owner).to_string(),
                repo: (*repo).to_string(),
                number,
            },
            None => ParsedGithubUrl::Unknown,
        },
        [owner, repo, "issues", number, ..] => match parse_number(number) {
            Some(number) => ParsedGithubUrl::Issue {
                owner: (*owner).to_string(),
                repo: (*repo).to_string(),
                number,
            },
            None => ParsedGithubUrl::Unknown,
        },
        [owner, repo] => ParsedGithubUrl::Repo {
            owner: (*owner).to_string(),
            repo: (*repo).to_string(),
        },
        [username] => ParsedGithubUrl::User {
            username: (*username).to_string(),
        },
        _ => ParsedGithubUrl::Unknown,
    }
}

/// Issue/pull numbers are bare digits; `u64::from_str` alone would also
/// accept a leading `+`.
fn parse_number(segment: &str) -> Option<u64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}
