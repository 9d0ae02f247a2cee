#![allow(dead_code)]

use distill::config::{AppConfig, ProviderConfig};
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::json;

/// Configuration pointing the OpenAI provider and YouTube at `server`
pub fn test_config(server: &ServerGuard) -> AppConfig {
    let mut config = AppConfig::default();
    config.providers.insert(
        "openai".to_string(),
        ProviderConfig {
            enabled: true,
            model: Some("gpt-3.5-turbo".to_string()),
            api_key: Some("test-key".to_string()),
            base_url: Some(server.url()),
        },
    );
    config.youtube.base_url = server.url();
    config.timeout = 5;
    config
}

/// Chat completion answering `content` for requests with `max_tokens`
pub async fn mock_completion(server: &mut ServerGuard, max_tokens: u32, content: &str) -> Mock {
    server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::PartialJson(json!({ "max_tokens": max_tokens })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "choices": [{ "message": { "content": content } }] }).to_string())
        .create_async()
        .await
}

pub async fn mock_page(server: &mut ServerGuard, path: &str, html: &str) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(html)
        .create_async()
        .await
}

/// Watch page for `video_id` whose only caption track is served by `server`
pub async fn mock_watch_page(server: &mut ServerGuard, video_id: &str) -> Mock {
    let page = format!(
        r#"<html><script>var ytInitialPlayerResponse = {{"captions":{{"playerCaptionsTracklistRenderer":{{"captionTracks":[{{"baseUrl":"{}/api/timedtext/{}","languageCode":"en"}}],"audioTracks":[]}}}}}};</script></html>"#,
        server.url(),
        video_id
    );
    server
        .mock("GET", "/watch")
        .match_query(Matcher::UrlEncoded("v".into(), video_id.into()))
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(page)
        .create_async()
        .await
}
