//! Integration tests for the content backend client.

use article_blog::cms::{CmsClient, CmsError};
use article_blog::config::Config;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Create a test configuration pointing at the mock backend.
fn create_test_config(cms_url: &str) -> Config {
    Config {
        cms_url: cms_url.to_string(),
        ..Config::for_testing()
    }
}

fn client_for(server: &MockServer) -> CmsClient {
    CmsClient::new(&create_test_config(&server.uri())).expect("Failed to build client")
}

fn user_json() -> serde_json::Value {
    json!({
        "id": 7,
        "username": "ada",
        "email": "ada@example.com",
        "provider": "local",
        "confirmed": true,
        "blocked": false,
        "createdAt": "2023-01-15T10:00:00.000Z",
        "updatedAt": "2023-01-15T10:00:00.000Z"
    })
}

#[tokio::test]
async fn test_get_articles_flat_payload() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(query_param("populate", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {
                    "id": 1,
                    "documentId": "abc",
                    "title": "Hello",
                    "description": "First post",
                    "slug": "hello",
                    "publishedAt": "2024-03-01T12:00:00.000Z",
                    "cover": { "id": 9, "url": "/uploads/hello.jpg", "alternativeText": "Hi" },
                    "author": { "name": "Grace" },
                    "category": { "name": "News", "slug": "news" },
                    "blocks": [{ "__component": "shared.quote", "quote": "Q" }]
                },
                { "id": 2, "title": "Second" }
            ],
            "meta": { "pagination": { "page": 1, "pageSize": 25, "pageCount": 1, "total": 2 } }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let collection = client.get_articles().await.expect("get_articles failed");

    assert_eq!(collection.articles.len(), 2);
    assert_eq!(collection.pagination.total, 2);
    assert_eq!(collection.pagination.page_size, 25);

    let first = &collection.articles[0];
    assert_eq!(first.title, "Hello");
    assert_eq!(first.slug.as_deref(), Some("hello"));
    assert_eq!(
        first.cover.as_ref().map(|c| c.url.as_str()),
        Some(format!("{}/uploads/hello.jpg", mock_server.uri()).as_str())
    );
    assert_eq!(first.author.as_ref().and_then(|a| a.name.as_deref()), Some("Grace"));
    assert_eq!(first.blocks.len(), 1);
    assert_eq!(first.blocks[0].component.as_deref(), Some("shared.quote"));
}

#[tokio::test]
async fn test_get_articles_legacy_payload() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": 1,
                "attributes": {
                    "title": "Hello",
                    "cover": { "data": { "id": 9, "attributes": { "url": "https://cdn.test/a.jpg" } } },
                    "author": { "data": null }
                }
            }],
            "meta": {}
        })))
        .mount(&mock_server)
        .await;

    let collection = client_for(&mock_server)
        .get_articles()
        .await
        .expect("get_articles failed");

    assert_eq!(collection.articles.len(), 1);
    let article = &collection.articles[0];
    assert_eq!(article.title, "Hello");
    assert_eq!(
        article.cover.as_ref().map(|c| c.url.as_str()),
        Some("https://cdn.test/a.jpg")
    );
    assert!(article.author.is_none());
    assert_eq!(collection.pagination.total, 1);
}

#[tokio::test]
async fn test_get_articles_backend_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "data": null,
            "error": { "status": 500, "name": "InternalServerError", "message": "Internal Server Error" }
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .get_articles()
        .await
        .expect_err("expected failure");
    assert!(matches!(err, CmsError::BackendUnavailable { status: Some(500), .. }));
    assert!(err.to_string().contains("Internal Server Error"));
}

#[tokio::test]
async fn test_get_articles_unreachable_backend() {
    // Nothing listens on port 9 of localhost.
    let client = CmsClient::new(&create_test_config("http://127.0.0.1:9")).unwrap();
    let err = client.get_articles().await.expect_err("expected failure");
    assert!(matches!(err, CmsError::BackendUnavailable { status: None, .. }));
}

#[tokio::test]
async fn test_bearer_token_sent_on_content_reads() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [], "meta": {} })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = Config {
        cms_api_token: Some("secret".to_string()),
        ..create_test_config(&mock_server.uri())
    };
    let client = CmsClient::new(&config).unwrap();
    let collection = client.get_articles().await.expect("get_articles failed");
    assert!(collection.articles.is_empty());
    assert_eq!(collection.pagination.page_count, 0);
}

#[tokio::test]
async fn test_find_article_by_slug() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(query_param("filters[slug][$eq]", "hello"))
        .and(query_param("populate", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": 1, "title": "Hello", "slug": "hello" }],
            "meta": {}
        })))
        .mount(&mock_server)
        .await;

    let article = client_for(&mock_server)
        .find_article("hello")
        .await
        .expect("find_article failed");
    assert_eq!(article.id, 1);
    assert_eq!(article.lookup_key(), "hello");
}

#[tokio::test]
async fn test_find_article_falls_back_to_id() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(query_param("filters[slug][$eq]", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [], "meta": {} })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(query_param("filters[id][$eq]", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": 42, "title": "By id" }],
            "meta": {}
        })))
        .mount(&mock_server)
        .await;

    let article = client_for(&mock_server)
        .find_article("42")
        .await
        .expect("find_article failed");
    assert_eq!(article.id, 42);
    assert_eq!(article.title, "By id");
}

#[tokio::test]
async fn test_find_article_not_found() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [], "meta": {} })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .find_article("missing-slug")
        .await
        .expect_err("expected not found");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_login_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/local"))
        .and(body_json(json!({ "identifier": "ada@example.com", "password": "pw123456" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "jwt": "tok.en", "user": user_json() })),
        )
        .mount(&mock_server)
        .await;

    let session = client_for(&mock_server)
        .login("ada@example.com", "pw123456")
        .await
        .expect("login failed");
    assert_eq!(session.jwt, "tok.en");
    assert_eq!(session.user.username, "ada");
    assert!(session.user.confirmed);
}

#[tokio::test]
async fn test_login_rejected_keeps_backend_message() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/local"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "data": null,
            "error": {
                "status": 400,
                "name": "ValidationError",
                "message": "Invalid identifier or password",
                "details": {}
            }
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .login("ada@example.com", "wrong")
        .await
        .expect_err("expected rejection");
    match err {
        CmsError::Auth(failure) => {
            assert_eq!(failure.status, 400);
            assert_eq!(failure.name, "ValidationError");
            assert_eq!(failure.message, "Invalid identifier or password");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_login_server_error_is_unavailable() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/local"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .login("a", "b")
        .await
        .expect_err("expected failure");
    assert!(matches!(err, CmsError::BackendUnavailable { status: Some(503), .. }));
}

#[tokio::test]
async fn test_register() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/local/register"))
        .and(body_json(json!({
            "username": "ada",
            "email": "ada@example.com",
            "password": "pw123456"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "jwt": "new.tok", "user": user_json() })),
        )
        .mount(&mock_server)
        .await;

    let session = client_for(&mock_server)
        .register("ada", "ada@example.com", "pw123456")
        .await
        .expect("register failed");
    assert_eq!(session.jwt, "new.tok");
    assert_eq!(session.user.email, "ada@example.com");
}

#[tokio::test]
async fn test_get_current_user() {
    let mock_server = MockServer::start().await;
    let mut user = user_json();
    user["role"] = json!({ "id": 1, "name": "Authenticated", "type": "authenticated" });
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .and(query_param("populate", "*"))
        .and(header("authorization", "Bearer tok.en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user))
        .mount(&mock_server)
        .await;

    let user = client_for(&mock_server)
        .get_current_user("tok.en")
        .await
        .expect("get_current_user failed");
    assert_eq!(user.id, 7);
    assert_eq!(user.provider.as_deref(), Some("local"));
    assert_eq!(user.role.map(|r| r.name).as_deref(), Some("Authenticated"));
}

#[tokio::test]
async fn test_get_current_user_invalid_token() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "data": null,
            "error": { "status": 401, "name": "UnauthorizedError", "message": "Missing or invalid credentials" }
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .get_current_user("bad")
        .await
        .expect_err("expected rejection");
    assert_eq!(err.status(), Some(401));
    assert!(matches!(err, CmsError::Auth(_)));
}

#[tokio::test]
async fn test_submit_contact() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contacts"))
        .and(body_json(json!({ "data": { "message": "Hello" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "id": 1 } })))
        .expect(1)
        .mount(&mock_server)
        .await;

    client_for(&mock_server)
        .submit_contact("Hello")
        .await
        .expect("submit_contact failed");
}

#[tokio::test]
async fn test_submit_contact_rejected() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contacts"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "data": null,
            "error": { "status": 403, "name": "ForbiddenError", "message": "Forbidden" }
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .submit_contact("Hello")
        .await
        .expect_err("expected failure");
    assert_eq!(err.status(), Some(403));
    assert!(
        matches!(err, CmsError::BackendUnavailable { ref message, .. } if message == "Forbidden"),
        "backend message should come from the response body: {err:?}"
    );
}

#[tokio::test]
async fn test_fetch_raw_keeps_unparsable_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles/1"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html>not found</html>"))
        .mount(&mock_server)
        .await;

    let raw = client_for(&mock_server)
        .fetch_raw("/articles/1", &[("populate", "*")])
        .await
        .expect("fetch_raw failed");
    assert_eq!(raw.status, 404);
    assert!(raw.url.contains("/api/articles/1"));
    let text = raw.body.expect_err("body should not parse");
    assert!(text.contains("<html>not found</html>"));
}
