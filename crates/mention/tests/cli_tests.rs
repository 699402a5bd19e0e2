use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use std::sync::atomic::{AtomicU16, Ordering};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

// Helper function to get an available port with atomic counter to avoid conflicts
static PORT_COUNTER: AtomicU16 = AtomicU16::new(52000);

fn get_available_port() -> u16 {
    PORT_COUNTER.fetch_add(1, Ordering::SeqCst)
}

// Helper to create a simple mock server answering one request
fn start_mock_server(port: u16, response_body: String) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        use std::io::{Read, Write};
        use std::net::TcpListener;

        let bind_addr = format!("127.0.0.1:{}", port);
        let listener = match TcpListener::bind(&bind_addr) {
            Ok(l) => l,
            Err(_) => return, // Port already in use, exit gracefully
        };

        for stream in listener.incoming() {
            if let Ok(mut stream) = stream {
                let mut buffer = [0; 4096];
                if stream.read(&mut buffer).is_ok() {
                    let response = format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
                        response_body.len(),
                        response_body
                    );
                    let _ = stream.write_all(response.as_bytes());
                }
                // Exit after first request
                break;
            }
        }
    })
}

fn create_temp_dir() -> std::path::PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    dir.push(format!("mention-test-{}-{}", std::process::id(), nanos));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn raw_repo() -> serde_json::Value {
    json!({
        "id": 10270250,
        "name": "react",
        "full_name": "facebook/react",
        "owner": {
            "login": "facebook",
            "html_url": "https://github.com/facebook"
        },
        "html_url": "https://github.com/facebook/react",
        "stargazers_count": 220000,
        "forks_count": 45000,
        "open_issues_count": 1100,
        "language": "JavaScript",
        "private": false
    })
}

fn normalized_repo() -> serde_json::Value {
    json!({
        "kind": "repo",
        "id": 10270250,
        "name": "react",
        "full_name": "facebook/react",
        "html_url": "https://github.com/facebook/react",
        "stargazers_count": 220000,
        "forks_count": 45000,
        "open_issues_count": 1100,
        "visibility": "public",
        "owner": {
            "login": "facebook",
            "html_url": "https://github.com/facebook"
        }
    })
}

#[test]
fn test_help_command() {
    cargo_bin_cmd!("mention")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Fetch, normalize, and snapshot GitHub resources",
        ));
}

#[test]
fn test_version() {
    cargo_bin_cmd!("mention")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_parse_repo_url_text() {
    cargo_bin_cmd!("mention")
        .args(["parse", "https://github.com/facebook/react"])
        .assert()
        .success()
        .stdout(predicate::str::contains("repo"))
        .stdout(predicate::str::contains("facebook"));
}

#[test]
fn test_parse_pull_url_json() {
    let output = cargo_bin_cmd!("mention")
        .args([
            "--format",
            "json",
            "parse",
            "https://github.com/rust-lang/rust/pull/12345",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed["kind"], "pull");
    assert_eq!(parsed["owner"], "rust-lang");
    assert_eq!(parsed["repo"], "rust");
    assert_eq!(parsed["number"], 12345);
}

#[test]
fn test_parse_unknown_url_still_succeeds() {
    let output = cargo_bin_cmd!("mention")
        .args(["--format", "json", "parse", "not a url at all"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed["kind"], "unknown");
}

#[test]
fn test_fetch_repo_from_api_override() {
    let port = get_available_port();
    let _server = start_mock_server(port, raw_repo().to_string());
    thread::sleep(Duration::from_millis(200));

    let output = cargo_bin_cmd!("mention")
        .args([
            "--format",
            "json",
            "fetch",
            "https://github.com/facebook/react",
        ])
        .env("GITHUB_API_URL", format!("http://127.0.0.1:{}", port))
        .timeout(Duration::from_secs(5))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let resource: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(resource["kind"], "repo");
    assert_eq!(resource["full_name"], "facebook/react");
    assert_eq!(resource["language"], "JavaScript");
}

#[test]
fn test_fetch_server_mode_without_base_url_fails() {
    cargo_bin_cmd!("mention")
        .args(["fetch", "https://github.com/facebook/react", "--server"])
        .env_remove("MENTION_BASE_URL")
        .env_remove("NEXT_PUBLIC_APP_URL")
        .env_remove("NEXT_PUBLIC_SITE_URL")
        .env_remove("APP_URL")
        .env_remove("NEXT_PUBLIC_VERCEL_URL")
        .env_remove("VERCEL_URL")
        .timeout(Duration::from_secs(5))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no base origin configured"));
}

#[test]
fn test_fetch_invalid_url_fails_without_network() {
    cargo_bin_cmd!("mention")
        .args(["fetch", "https://example.com/not/github"])
        .timeout(Duration::from_secs(5))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a fetchable GitHub URL"));
}

#[test]
fn test_snapshot_json_output() {
    let port = get_available_port();
    let _server = start_mock_server(port, normalized_repo().to_string());
    thread::sleep(Duration::from_millis(200));

    let output = cargo_bin_cmd!("mention")
        .args([
            "--format",
            "json",
            "snapshot",
            "https://github.com/facebook/react",
            "--base-url",
            &format!("http://127.0.0.1:{}", port),
        ])
        .timeout(Duration::from_secs(5))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let snapshot: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(snapshot["slug"], "facebook-react");
    assert_eq!(snapshot["componentName"], "GithubMentionFacebookReact");
    assert!(snapshot["code"]
        .as_str()
        .unwrap()
        .starts_with("\"use client\";"));
    assert_eq!(snapshot["registry"]["name"], "github-mention-facebook-react");
}

#[test]
fn test_snapshot_writes_output_directory() {
    let port = get_available_port();
    let _server = start_mock_server(port, normalized_repo().to_string());
    thread::sleep(Duration::from_millis(200));

    let temp_dir = create_temp_dir();
    cargo_bin_cmd!("mention")
        .args([
            "snapshot",
            "https://github.com/facebook/react",
            "--base-url",
            &format!("http://127.0.0.1:{}", port),
            "--out",
            temp_dir.to_str().unwrap(),
        ])
        .timeout(Duration::from_secs(5))
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let component = temp_dir.join("github-mention-facebook-react.tsx");
    let manifest = temp_dir.join("github-mention-facebook-react.json");
    assert!(component.exists());
    assert!(manifest.exists());

    let code = std::fs::read_to_string(&component).unwrap();
    assert!(code.contains("export function GithubMentionFacebookReact()"));

    let _ = std::fs::remove_dir_all(&temp_dir);
}

#[test]
fn test_completions_generate() {
    cargo_bin_cmd!("mention")
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mention"));
}
