use log::debug;
use reqwest::Client;
use std::time::Duration;

use crate::url_to_text::ExtractError;

pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(timeout: Option<Duration>, user_agent: &str) -> Result<Self, ExtractError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }

    /// Shared HTTP client, also used for transcript requests
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// GET `url` and return the body; non-success statuses are errors
    pub async fn fetch(&self, url: &str) -> Result<String, ExtractError> {
        let response = self
            .client
            .get(url)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!("{} answered {}", url, status);
            return Err(ExtractError::Upstream {
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or(status.as_str())
                    .to_string(),
            });
        }

        let html = response.text().await?;
        Ok(html)
    }
}
