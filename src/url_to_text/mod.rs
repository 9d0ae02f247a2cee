//! Turning a content descriptor into plain text.
//!
//! The descriptor is classified once, at the boundary, into a
//! [`ContentSource`]; the fetchers below only ever see an already-resolved
//! web URL or YouTube video id.

pub mod fetchers;
pub mod html;

use thiserror::Error;
use url::Url;

use crate::model::ContentType;

#[derive(Error, Debug)]
pub enum ExtractError {
    /// Input could not be classified (bad URL, YouTube URL without a video id)
    #[error("{0}")]
    InvalidInput(String),

    #[error("Failed to fetch YouTube transcript. Please check if the video has closed captions enabled.")]
    NoCaptions,

    #[error("No readable content found on the webpage")]
    EmptyPage,

    /// The page answered with a non-success status
    #[error("Failed to fetch content: {reason}")]
    Upstream { status: u16, reason: String },

    #[error("Failed to fetch web content. Please check the URL and try again. ({0})")]
    Transport(#[from] reqwest::Error),
}

/// Where the text to distill comes from
#[derive(Debug, Clone, PartialEq)]
pub enum ContentSource {
    Text(String),
    WebUrl(Url),
    Youtube { video_id: String },
}

impl ContentSource {
    /// Classify `content` according to the declared content type.
    ///
    /// A URL that carries a YouTube video id is always treated as a video,
    /// even when it was submitted as a plain `url`.
    pub fn resolve(content: &str, content_type: ContentType) -> Result<Self, ExtractError> {
        if content_type == ContentType::Text {
            return Ok(ContentSource::Text(content.to_string()));
        }

        let url = Url::parse(content.trim())
            .map_err(|_| ExtractError::InvalidInput("Please provide a valid URL".to_string()))?;

        match youtube_video_id(&url) {
            Some(video_id) => Ok(ContentSource::Youtube { video_id }),
            None if content_type == ContentType::Youtube => Err(ExtractError::InvalidInput(
                "Please provide a valid YouTube URL".to_string(),
            )),
            None => Ok(ContentSource::WebUrl(url)),
        }
    }
}

fn is_domain(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Video id from a `youtube.com/watch?v=` or `youtu.be/<id>` URL
pub fn youtube_video_id(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_ascii_lowercase();

    let id = if is_domain(&host, "youtube.com") {
        url.query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
    } else if is_domain(&host, "youtu.be") {
        url.path_segments()
            .and_then(|mut segments| segments.next())
            .map(String::from)
    } else {
        None
    };

    id.filter(|id| !id.is_empty())
}
