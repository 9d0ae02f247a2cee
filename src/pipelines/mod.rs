pub mod url;

use log::info;
use std::time::Duration;

use crate::config::AppConfig;
use crate::url_to_text::fetchers::{RequestFetcher, TranscriptFetcher};
use crate::url_to_text::{ContentSource, ExtractError};

/// Appended to text cut at the character ceiling
pub const ELLIPSIS: &str = "...";

/// Text ready to be sent to the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub truncated: bool,
}

/// Runs the fetcher matching a [`ContentSource`]
pub struct ContentExtractor {
    fetcher: RequestFetcher,
    transcripts: TranscriptFetcher,
}

impl ContentExtractor {
    pub fn new(fetcher: RequestFetcher, transcripts: TranscriptFetcher) -> Self {
        Self {
            fetcher,
            transcripts,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ExtractError> {
        let fetcher = RequestFetcher::new(
            Some(Duration::from_secs(config.timeout)),
            &config.extraction.user_agent,
        )?;
        let transcripts = TranscriptFetcher::new(
            fetcher.client().clone(),
            &config.youtube.base_url,
            &config.youtube.language,
        );
        Ok(Self::new(fetcher, transcripts))
    }

    /// Plain text for `source`; raw text is returned unchanged
    pub async fn extract(&self, source: &ContentSource) -> Result<String, ExtractError> {
        match source {
            ContentSource::Text(text) => Ok(text.clone()),
            ContentSource::WebUrl(page) => url::process(&self.fetcher, page).await,
            ContentSource::Youtube { video_id } => self.transcripts.fetch(video_id).await,
        }
    }
}

/// Cut `text` to `max_chars` characters, marking the cut with [`ELLIPSIS`]
pub fn truncate(text: String, max_chars: usize) -> ExtractedText {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let original_chars = text.chars().count();
            let mut truncated = String::with_capacity(cut + ELLIPSIS.len());
            truncated.push_str(&text[..cut]);
            truncated.push_str(ELLIPSIS);
            info!(
                "Content truncated from {} to {} characters",
                original_chars, max_chars
            );
            ExtractedText {
                text: truncated,
                truncated: true,
            }
        }
        None => ExtractedText {
            text,
            truncated: false,
        },
    }
}
