//! Unit tests for the token-fallback sequence using wiremock

#[cfg(test)]
mod tests {
    use crate::fallback::{fetch_with_fallback, FetchOutcome};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    /// Matches requests carrying no Authorization header (anonymous attempts).
    fn anonymous(request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }

    fn agent() -> ureq::Agent {
        ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into()
    }

    fn tokens(names: &[&str]) -> Vec<String> {
        names.iter().map(|t| (*t).to_string()).collect()
    }

    fn repo_body() -> serde_json::Value {
        serde_json::json!({
            "id": 1296269,
            "full_name": "octocat/Hello-World",
            "name": "Hello-World"
        })
    }

    #[tokio::test]
    async fn tokens_are_tried_in_order_until_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World"))
            .and(header("Authorization", "Bearer t1"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "message": "Forbidden"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World"))
            .and(header("Authorization", "Bearer t2"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "message": "Too many requests"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World"))
            .and(header("Authorization", "Bearer t3"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("etag", "W/\"abc123\"")
                    .set_body_json(repo_body()),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
        // The success on t3 must stop the sequence before anonymous.
        Mock::given(method("GET"))
            .and(anonymous)
            .respond_with(ResponseTemplate::new(200).set_body_json(repo_body()))
            .expect(0)
            .mount(&mock_server)
            .await;

        let endpoint = format!("{}/repos/octocat/Hello-World", mock_server.uri());
        let outcome =
            fetch_with_fallback(&agent(), &endpoint, &tokens(&["t1", "t2", "t3"]), None).unwrap();

        let FetchOutcome::Success { body, etag } = outcome else {
            panic!("expected success, got {outcome:?}");
        };
        assert_eq!(body["full_name"], "octocat/Hello-World");
        assert_eq!(etag.as_deref(), Some("W/\"abc123\""));
    }

    #[tokio::test]
    async fn non_retryable_failure_stops_the_sequence() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/gone"))
            .and(header("Authorization", "Bearer t1"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "message": "Not Found"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        // Neither the second token nor the anonymous fallback may fire after
        // a definitive failure.
        Mock::given(method("GET"))
            .and(header("Authorization", "Bearer t2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(repo_body()))
            .expect(0)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(anonymous)
            .respond_with(ResponseTemplate::new(200).set_body_json(repo_body()))
            .expect(0)
            .mount(&mock_server)
            .await;

        let endpoint = format!("{}/repos/octocat/gone", mock_server.uri());
        let outcome =
            fetch_with_fallback(&agent(), &endpoint, &tokens(&["t1", "t2"]), None).unwrap();

        let FetchOutcome::Failure { status, message } = outcome else {
            panic!("expected failure, got {outcome:?}");
        };
        assert_eq!(status, 404);
        assert_eq!(message, "Not Found");
    }

    #[tokio::test]
    async fn not_modified_short_circuits_on_first_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World"))
            .and(header("If-None-Match", "W/\"abc123\""))
            .and(header("Authorization", "Bearer t1"))
            .respond_with(ResponseTemplate::new(304))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(anonymous)
            .respond_with(ResponseTemplate::new(200).set_body_json(repo_body()))
            .expect(0)
            .mount(&mock_server)
            .await;

        let endpoint = format!("{}/repos/octocat/Hello-World", mock_server.uri());
        let outcome = fetch_with_fallback(
            &agent(),
            &endpoint,
            &tokens(&["t1", "t2"]),
            Some("W/\"abc123\""),
        )
        .unwrap();

        assert!(matches!(outcome, FetchOutcome::NotModified));
    }

    #[tokio::test]
    async fn zero_tokens_makes_exactly_one_anonymous_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World"))
            .and(anonymous)
            .respond_with(ResponseTemplate::new(200).set_body_json(repo_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let endpoint = format!("{}/repos/octocat/Hello-World", mock_server.uri());
        let outcome = fetch_with_fallback(&agent(), &endpoint, &[], None).unwrap();

        assert!(matches!(outcome, FetchOutcome::Success { .. }));
    }

    #[tokio::test]
    async fn retryable_exhaustion_falls_back_to_anonymous() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World"))
            .and(header("Authorization", "Bearer bad"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "message": "Bad credentials"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World"))
            .and(anonymous)
            .respond_with(ResponseTemplate::new(200).set_body_json(repo_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let endpoint = format!("{}/repos/octocat/Hello-World", mock_server.uri());
        let outcome = fetch_with_fallback(&agent(), &endpoint, &tokens(&["bad"]), None).unwrap();

        assert!(matches!(outcome, FetchOutcome::Success { .. }));
    }

    #[tokio::test]
    async fn anonymous_failure_is_authoritative() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World"))
            .and(header("Authorization", "Bearer bad"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "message": "Bad credentials"
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World"))
            .and(anonymous)
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("x-ratelimit-remaining", "0")
                    .set_body_json(serde_json::json!({
                        "message": "API rate limit exceeded"
                    })),
            )
            .mount(&mock_server)
            .await;

        let endpoint = format!("{}/repos/octocat/Hello-World", mock_server.uri());
        let outcome = fetch_with_fallback(&agent(), &endpoint, &tokens(&["bad"]), None).unwrap();

        let FetchOutcome::Failure { status, message } = outcome else {
            panic!("expected failure, got {outcome:?}");
        };
        assert_eq!(status, 403);
        assert_eq!(message, "API rate limit exceeded");
    }

    #[tokio::test]
    async fn failure_message_falls_back_when_body_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/Hello-World"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let endpoint = format!("{}/repos/octocat/Hello-World", mock_server.uri());
        let outcome = fetch_with_fallback(&agent(), &endpoint, &[], None).unwrap();

        let FetchOutcome::Failure { status, message } = outcome else {
            panic!("expected failure, got {outcome:?}");
        };
        assert_eq!(status, 500);
        assert_eq!(message, "GitHub error 500");
    }
}
