use mention_core::ParsedGithubUrl;

/// Fallback slug when nothing slugifiable survives.
pub const FALLBACK_SLUG: &str = "snapshot";

/// Fallback component name when the derived name would be invalid.
pub const FALLBACK_COMPONENT_NAME: &str = "GithubMentionSnapshot";

/// Upper bound on generated component name length.
const MAX_COMPONENT_NAME_LEN: usize = 60;

/// Collapse a string to a lowercase dash-separated slug. Runs of anything
/// non-alphanumeric become a single dash; empty results stay empty.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Human-readable, collision-resistant slug for a mention snapshot.
///
/// Built from the parsed identity (`owner-repo`, `login`,
/// `owner-repo-issue-42`); unrecognized URLs fall back to a slugified form
/// of the raw input, then to the literal [`FALLBACK_SLUG`].
pub fn slug_for(parsed: &ParsedGithubUrl, raw_url: &str) -> String {
    let slug = match parsed {
        ParsedGithubUrl::Pull {
            owner,
            repo,
            number,
        } => slugify(&format!("{owner} {repo} pull {number}")),
        ParsedGithubUrl::Issue {
            owner,
            repo,
            number,
        } => slugify(&format!("{owner} {repo} issue {number}")),
        ParsedGithubUrl::Repo { owner, repo } => slugify(&format!("{owner} {repo}")),
        ParsedGithubUrl::User { username } => slugify(username),
        ParsedGithubUrl::Unknown => slugify(raw_url),
    };

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Derive the PascalCase component name `GithubMention<Slug>`.
///
/// Falls back to [`FALLBACK_COMPONENT_NAME`] when the slug does not start
/// with a letter; the result is capped at a fixed length.
pub fn component_name_for(slug: &str) -> String {
    let pascal: String = slug
        .split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();

    if !pascal.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return FALLBACK_COMPONENT_NAME.to_string();
    }

    let mut name = format!("GithubMention{pascal}");
    name.truncate(MAX_COMPONENT_NAME_LEN);
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use mention_core::parse_github_url;

    #[test]
    fn repo_slug_and_component_name() {
        let parsed = parse_github_url("https://github.com/facebook/react");
        let slug = slug_for(&parsed, "https://github.com/facebook/react");
        assert_eq!(slug, "facebook-react");
        assert_eq!(component_name_for(&slug), "GithubMentionFacebookReact");
    }

    #[test]
    fn issue_slug_includes_kind_and_number() {
        let parsed = parse_github_url("https://github.com/owner/repo/issues/42");
        assert_eq!(
            slug_for(&parsed, "https://github.com/owner/repo/issues/42"),
            "owner-repo-issue-42"
        );
    }

    #[test]
    fn pull_slug_includes_kind_and_number() {
        let parsed = parse_github_url("https://github.com/vercel/next.js/pull/7");
        assert_eq!(
            slug_for(&parsed, "https://github.com/vercel/next.js/pull/7"),
            "vercel-next-js-pull-7"
        );
    }

    #[test]
    fn user_slug_is_the_login() {
        let parsed = parse_github_url("https://github.com/octocat");
        assert_eq!(slug_for(&parsed, "https://github.com/octocat"), "octocat");
    }

    #[test]
    fn unknown_urls_slugify_the_raw_input() {
        let parsed = parse_github_url("https://example.com/some/page");
        assert_eq!(
            slug_for(&parsed, "https://example.com/some/page"),
            "https-example-com-some-page"
        );
    }

    #[test]
    fn empty_input_falls_back_to_snapshot_literal() {
        let parsed = parse_github_url("///");
        assert_eq!(slug_for(&parsed, "///"), FALLBACK_SLUG);
        assert_eq!(slug_for(&parsed, "!!!"), FALLBACK_SLUG);
    }

    #[test]
    fn component_name_requires_leading_letter() {
        assert_eq!(component_name_for("42-wat"), FALLBACK_COMPONENT_NAME);
        assert_eq!(component_name_for(""), FALLBACK_COMPONENT_NAME);
    }

    #[test]
    fn component_name_is_length_capped() {
        let long = "a".repeat(200);
        assert!(component_name_for(&long).len() <= 60);
    }
}
