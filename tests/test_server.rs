mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use common::{mock_completion, test_config};
use distill::config::{AppConfig, AuthConfig};
use distill::server::{router, ServerState};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app(config: &AppConfig) -> Router {
    router(Arc::new(ServerState::from_config(config).unwrap()))
}

fn with_auth(server: &ServerGuard) -> AppConfig {
    let mut config = test_config(server);
    config.auth = Some(AuthConfig {
        url: server.url(),
        anon_key: "anon".to_string(),
    });
    config
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

#[tokio::test]
async fn test_summarize_success() {
    let mut server = Server::new_async().await;
    let _completion = mock_completion(&mut server, 400, "1/2 Rust is fast\n\n2/2 and safe").await;

    let response = app(&test_config(&server))
        .oneshot(post_json(
            "/api/summarize",
            r#"{"content": "Rust is fast and memory safe.", "contentType": "text", "outputFormat": "thread"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(
        body,
        json!({
            "summary": "1/2 Rust is fast\n\n2/2 and safe",
            "format": "thread",
            "contentLength": 29,
            "truncated": false
        })
    );
}

#[tokio::test]
async fn test_summarize_validation_errors() {
    let server = Server::new_async().await;
    let app = app(&test_config(&server));

    let cases = [
        (r#"{"content": "", "contentType": "text", "outputFormat": "summary"}"#, "Please provide content to process"),
        (r#"{"contentType": "text", "outputFormat": "summary"}"#, "Please provide content to process"),
        (r#"{"content": "x", "contentType": "pdf", "outputFormat": "summary"}"#, "Please select a valid content type"),
        (r#"{"content": "x", "contentType": "text", "outputFormat": "poem"}"#, "Please select a valid output format"),
        (r#"{"content": "nope", "contentType": "url", "outputFormat": "summary"}"#, "Please provide a valid URL"),
        (
            r#"{"content": "https://vimeo.com/123", "contentType": "youtube", "outputFormat": "summary"}"#,
            "Please provide a valid YouTube URL",
        ),
    ];

    for (body, message) in cases {
        let response = app.clone().oneshot(post_json("/api/summarize", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", body);
        assert_eq!(json_body(response).await, json!({ "error": message }));
    }
}

#[tokio::test]
async fn test_summarize_malformed_json() {
    let server = Server::new_async().await;
    let response = app(&test_config(&server))
        .oneshot(post_json("/api/summarize", "{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["error"].is_string());
}

#[tokio::test]
async fn test_health() {
    let server = Server::new_async().await;
    let response = app(&test_config(&server)).oneshot(get("/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_pages_redirect_without_session() {
    let server = Server::new_async().await;
    let app = app(&test_config(&server));

    for path in ["/", "/dashboard"] {
        let response = app.clone().oneshot(get(path, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
    }

    for path in ["/login", "/signup", "/verify-email"] {
        let response = app.clone().oneshot(get(path, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{}", path);
    }
}

#[tokio::test]
async fn test_pages_redirect_with_session() {
    let server = Server::new_async().await;
    let app = app(&test_config(&server));
    let cookie = Some("distill-session=token");

    for path in ["/", "/login", "/signup"] {
        let response = app.clone().oneshot(get(path, cookie)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/dashboard");
    }

    let response = app.clone().oneshot(get("/dashboard", cookie)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_without_auth_configured() {
    let server = Server::new_async().await;
    let mut config = test_config(&server);
    config.auth = None;
    if config.auth_settings().is_some() {
        // SUPABASE_URL is set in this environment
        return;
    }

    let response = app(&config)
        .oneshot(post_json("/api/auth/login", r#"{"email": "a@b.c", "password": "pw"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Server configuration error. Please try again later." })
    );
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let mut server = Server::new_async().await;
    let token = server
        .mock("POST", "/auth/v1/token")
        .match_query(Matcher::UrlEncoded("grant_type".into(), "password".into()))
        .match_header("apikey", "anon")
        .match_body(Matcher::PartialJson(json!({ "email": "ada@example.com" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token": "jwt-token", "expires_in": 600, "user": {"id": "u1", "email": "ada@example.com"}}"#)
        .create_async()
        .await;

    let response = app(&with_auth(&server))
        .oneshot(post_json(
            "/api/auth/login",
            r#"{"email": "ada@example.com", "password": "hunter2"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(cookie.starts_with("distill-session=jwt-token;"));
    assert!(cookie.contains("Max-Age=600"));
    assert_eq!(json_body(response).await, json!({ "redirect": "/dashboard" }));
    token.assert_async().await;
}

#[tokio::test]
async fn test_login_rejected() {
    let mut server = Server::new_async().await;
    let _token = server
        .mock("POST", "/auth/v1/token")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "invalid_grant", "error_description": "Invalid login credentials"}"#)
        .create_async()
        .await;

    let response = app(&with_auth(&server))
        .oneshot(post_json(
            "/api/auth/login",
            r#"{"email": "ada@example.com", "password": "wrong"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Invalid login credentials" })
    );
}

#[tokio::test]
async fn test_signup_needing_confirmation() {
    let mut server = Server::new_async().await;
    let _signup = server
        .mock("POST", "/auth/v1/signup")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "u2", "email": "new@example.com", "confirmation_sent_at": "2024-01-01T00:00:00Z"}"#)
        .create_async()
        .await;

    let response = app(&with_auth(&server))
        .oneshot(post_json(
            "/api/auth/signup",
            r#"{"email": "new@example.com", "password": "secret123"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "redirect": "/verify-email" }));
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let mut server = Server::new_async().await;
    let logout = server
        .mock("POST", "/auth/v1/logout")
        .match_header("authorization", "Bearer jwt-token")
        .with_status(204)
        .create_async()
        .await;

    let mut request = post_json("/api/auth/logout", "");
    request
        .headers_mut()
        .insert(header::COOKIE, "distill-session=jwt-token".parse().unwrap());
    let response = app(&with_auth(&server)).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("distill-session=;"));
    assert!(cookie.contains("Max-Age=0"));
    assert_eq!(json_body(response).await, json!({ "redirect": "/login" }));
    logout.assert_async().await;
}

#[tokio::test]
async fn test_login_with_auth_provider_down() {
    let mut server = Server::new_async().await;
    let _token = server
        .mock("POST", "/auth/v1/token")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_header("content-type", "text/html")
        .with_body("<html><body>Service Unavailable</body></html>")
        .create_async()
        .await;

    let response = app(&with_auth(&server))
        .oneshot(post_json(
            "/api/auth/login",
            r#"{"email": "ada@example.com", "password": "hunter2"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Authentication service unavailable. Please try again later." })
    );
}

#[tokio::test]
async fn test_unknown_pages_are_gated() {
    let server = Server::new_async().await;
    let app = app(&test_config(&server));

    let response = app.clone().oneshot(get("/settings/profile", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = app
        .clone()
        .oneshot(get("/settings/profile", Some("distill-session=token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.clone().oneshot(get("/api/nowhere", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_summarize_null_content() {
    let server = Server::new_async().await;
    let response = app(&test_config(&server))
        .oneshot(post_json(
            "/api/summarize",
            r#"{"content": null, "contentType": "text", "outputFormat": "summary"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Please provide content to process" })
    );
}
