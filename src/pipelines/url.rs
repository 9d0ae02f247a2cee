use log::debug;
use url::Url;

use crate::url_to_text::fetchers::RequestFetcher;
use crate::url_to_text::html::html_to_text;
use crate::url_to_text::ExtractError;

/// Process a web page URL into readable text
///
/// This pipeline:
/// 1. Fetches HTML using RequestFetcher
/// 2. Strips scripts, styles, comments and tags
/// 3. Fails if nothing readable is left
pub async fn process(fetcher: &RequestFetcher, url: &Url) -> Result<String, ExtractError> {
    let html = fetcher.fetch(url.as_str()).await?;
    let text = html_to_text(&html);
    debug!("Extracted {} characters from {}", text.len(), url);

    if text.is_empty() {
        return Err(ExtractError::EmptyPage);
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_process_page() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/post")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html><body><h1>Title</h1><p>Body text.</p></body></html>")
            .create_async()
            .await;

        let fetcher = RequestFetcher::new(None, "test").unwrap();
        let url = Url::parse(&format!("{}/post", server.url())).unwrap();
        let text = process(&fetcher, &url).await.unwrap();
        assert_eq!(text, "Title Body text.");
    }

    #[tokio::test]
    async fn test_process_empty_page() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/blank")
            .with_status(200)
            .with_body("<html><body><script>render()</script></body></html>")
            .create_async()
            .await;

        let fetcher = RequestFetcher::new(None, "test").unwrap();
        let url = Url::parse(&format!("{}/blank", server.url())).unwrap();
        let err = process(&fetcher, &url).await.unwrap_err();
        assert!(matches!(err, ExtractError::EmptyPage));
    }
}
