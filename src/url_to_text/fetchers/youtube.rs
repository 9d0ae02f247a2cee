use log::{debug, warn};
use reqwest::Client;
use scraper::{Html, Selector};
use serde::Deserialize;
use std::error::Error;

use crate::url_to_text::ExtractError;

/// Marker preceding the caption track list in a watch page's player response
const CAPTION_TRACKS_MARKER: &str = "\"captionTracks\":";

#[derive(Debug, Deserialize)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(rename = "languageCode", default)]
    language_code: String,
}

/// Fetches the caption transcript of a YouTube video
pub struct TranscriptFetcher {
    client: Client,
    base_url: String,
    language: String,
}

impl TranscriptFetcher {
    pub fn new(client: Client, base_url: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            language: language.into(),
        }
    }

    /// Caption text of `video_id`, segments joined with single spaces in order
    pub async fn fetch(&self, video_id: &str) -> Result<String, ExtractError> {
        let segments = self.fetch_segments(video_id).await.map_err(|e| {
            warn!("Transcript unavailable for {}: {}", video_id, e);
            ExtractError::NoCaptions
        })?;

        if segments.is_empty() {
            return Err(ExtractError::NoCaptions);
        }

        Ok(segments.join(" "))
    }

    async fn fetch_segments(
        &self,
        video_id: &str,
    ) -> Result<Vec<String>, Box<dyn Error + Send + Sync>> {
        let watch_page = self
            .client
            .get(format!("{}/watch", self.base_url))
            .query(&[("v", video_id)])
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let tracks = caption_tracks(&watch_page).ok_or("video has no caption tracks")?;
        let track = tracks
            .iter()
            .find(|track| track.language_code.starts_with(&self.language))
            .or_else(|| tracks.first())
            .ok_or("video has no caption tracks")?;
        debug!("Using {} captions for {}", track.language_code, video_id);

        let xml = self
            .client
            .get(&track.base_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(parse_transcript(&xml))
    }
}

/// Caption tracks listed in a watch page, if any
fn caption_tracks(watch_page: &str) -> Option<Vec<CaptionTrack>> {
    let start = watch_page.find(CAPTION_TRACKS_MARKER)? + CAPTION_TRACKS_MARKER.len();
    // The array is embedded in a larger JS object; read exactly one JSON value.
    serde_json::Deserializer::from_str(&watch_page[start..])
        .into_iter::<Vec<CaptionTrack>>()
        .next()?
        .ok()
        .filter(|tracks| !tracks.is_empty())
}

/// Text of each `<text>` element of a timedtext document, in order
fn parse_transcript(xml: &str) -> Vec<String> {
    let document = Html::parse_document(xml);
    let Ok(selector) = Selector::parse("text") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(|segment| {
            let raw = segment.text().collect::<String>();
            // Caption text is entity-encoded once more inside the XML
            let decoded = html_escape::decode_html_entities(&raw);
            decoded.split_whitespace().collect::<Vec<_>>().join(" ")
        })
        .filter(|segment| !segment.is_empty())
        .collect()
}
