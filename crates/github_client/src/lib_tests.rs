//! Unit tests for the github_client crate.

use super::*; // Import items from lib.rs
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate}; // For constructing mock bodies

const TEST_REPOSITORY: &str = "octocat/Hello-World";

fn create_test_client(mock_server: &MockServer) -> GitHubClient {
    let base_url = Url::parse(&mock_server.uri()).unwrap();
    let octocrab = create_anonymous_client(Some(&base_url)).unwrap();
    GitHubClient::new(octocrab)
}

fn contributor_json(login: &str, id: u64, contributions: u64) -> serde_json::Value {
    json!({
        "login": login,
        "id": id,
        "node_id": "MDQ6VXNlcjU4MzIzMQ==",
        "avatar_url": format!("https://avatars.githubusercontent.com/u/{id}?v=4"),
        "gravatar_id": "",
        "url": format!("https://api.github.com/users/{login}"),
        "html_url": format!("https://github.com/{login}"),
        "type": "User",
        "site_admin": false,
        "contributions": contributions
    })
}

#[tokio::test]
async fn test_list_contributors_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{TEST_REPOSITORY}/contributors")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            contributor_json("octocat", 583231, 32),
            contributor_json("hubot", 1, 7),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.list_contributors(TEST_REPOSITORY).await;

    if let Err(e) = &result {
        eprintln!("list_contributors error: {e:?}");
    }
    let contributors = result.unwrap();
    assert_eq!(contributors.len(), 2);

    assert_eq!(contributors[0].login, "octocat");
    assert_eq!(
        contributors[0].avatar_url,
        "https://avatars.githubusercontent.com/u/583231?v=4"
    );
    assert_eq!(contributors[0].html_url, "https://github.com/octocat");
    assert_eq!(contributors[0].contributions, Some(32));

    assert_eq!(contributors[1].login, "hubot");
    assert_eq!(contributors[1].html_url, "https://github.com/hubot");
}

#[tokio::test]
async fn test_list_contributors_empty_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{TEST_REPOSITORY}/contributors")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let contributors = client.list_contributors(TEST_REPOSITORY).await.unwrap();

    assert!(contributors.is_empty());
}

#[tokio::test]
async fn test_list_contributors_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/missing/contributors"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest/repos/repos#list-repository-contributors"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.list_contributors("octocat/missing").await;

    assert!(matches!(result, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_list_contributors_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{TEST_REPOSITORY}/contributors")))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "API rate limit exceeded for 203.0.113.7. (But here's the good news: Authenticated requests get a higher rate limit.)",
            "documentation_url": "https://docs.github.com/rest/overview/resources-in-the-rest-api#rate-limiting"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.list_contributors(TEST_REPOSITORY).await;

    assert!(matches!(result, Err(Error::RateLimitExceeded)));
}

#[tokio::test]
async fn test_list_contributors_forbidden_without_rate_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{TEST_REPOSITORY}/contributors")))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "Repository access blocked"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.list_contributors(TEST_REPOSITORY).await;

    match result {
        Err(Error::ApiError { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "Repository access blocked");
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_contributors_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{TEST_REPOSITORY}/contributors")))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.list_contributors(TEST_REPOSITORY).await;

    match result {
        Err(Error::ApiError { status, message }) => {
            assert_eq!(status, 502);
            assert_eq!(message, "<html>Bad Gateway</html>");
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_contributors_invalid_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{TEST_REPOSITORY}/contributors")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<!DOCTYPE html><p>oops</p>"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.list_contributors(TEST_REPOSITORY).await;

    assert!(matches!(result, Err(Error::Deserialization(_))));
}

#[tokio::test]
async fn test_list_contributors_object_instead_of_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{TEST_REPOSITORY}/contributors")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "unexpected"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.list_contributors(TEST_REPOSITORY).await;

    assert!(matches!(result, Err(Error::Deserialization(_))));
}

#[tokio::test]
async fn test_list_contributors_entry_missing_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{TEST_REPOSITORY}/contributors")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            contributor_json("octocat", 583231, 32),
            { "login": "no-avatar", "html_url": "https://github.com/no-avatar" }
        ])))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.list_contributors(TEST_REPOSITORY).await;

    match result {
        Err(Error::Deserialization(e)) => assert!(e.to_string().contains("avatar_url")),
        other => panic!("Expected Deserialization error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_contributors_duplicates_pass_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{TEST_REPOSITORY}/contributors")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            contributor_json("octocat", 583231, 32),
            contributor_json("octocat", 583231, 32),
        ])))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let contributors = client.list_contributors(TEST_REPOSITORY).await.unwrap();

    assert_eq!(contributors.len(), 2);
    assert_eq!(contributors[0], contributors[1]);
}

#[tokio::test]
async fn test_list_contributors_connection_refused() {
    // Reserve a port and release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let base_url = Url::parse(&format!("http://127.0.0.1:{port}")).unwrap();
    let client = GitHubClient::new(create_anonymous_client(Some(&base_url)).unwrap());

    let result = client.list_contributors(TEST_REPOSITORY).await;

    assert!(matches!(result, Err(Error::Transport(_))));
}

#[test]
fn test_contributors_path() {
    assert_eq!(
        contributors_path("octocat/Hello-World"),
        "/repos/octocat/Hello-World/contributors"
    );
}

#[test]
fn test_contributors_path_with_empty_repository() {
    assert_eq!(contributors_path(""), "/repos//contributors");
}

#[test]
fn test_status_error_uses_raw_body_when_not_json() {
    let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, "  upstream broke \n");

    match err {
        Error::ApiError { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "upstream broke");
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }
}

#[test]
fn test_status_error_too_many_requests() {
    let err = status_error(StatusCode::TOO_MANY_REQUESTS, "");

    assert!(matches!(err, Error::RateLimitExceeded));
}

#[tokio::test]
async fn test_create_anonymous_client_default_host() {
    let result = create_anonymous_client(None);

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_create_token_client_with_base_url() {
    let base_url = Url::parse("https://github.example.com/api/v3").unwrap();

    let result = create_token_client("ghp_test_token", Some(&base_url));

    assert!(result.is_ok());
}

#[test]
fn test_create_anonymous_client_rejects_non_http_url() {
    let base_url = Url::parse("mailto:octocat@github.com").unwrap();

    let result = create_anonymous_client(Some(&base_url));

    assert!(matches!(result, Err(Error::InvalidBaseUrl(_))));
}

#[test]
fn test_validate_base_url_strips_trailing_slash() {
    let base_url = Url::parse("http://127.0.0.1:8080/").unwrap();

    assert_eq!(validate_base_url(&base_url).unwrap(), "http://127.0.0.1:8080");
}
