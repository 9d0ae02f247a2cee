use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::formats::OutputFormat;

/// The three accepted shapes of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Url,
    Youtube,
    Text,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Url => "url",
            ContentType::Youtube => "youtube",
            ContentType::Text => "text",
        }
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "url" => Ok(ContentType::Url),
            "youtube" => Ok(ContentType::Youtube),
            "text" => Ok(ContentType::Text),
            other => Err(format!("Unknown content type: {}", other)),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /api/summarize`, as received.
///
/// Fields stay strings so that validation can reject them one at a time,
/// in order, with its own messages.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummarizeRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub content_type: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub output_format: String,
}

/// `null` reads the same as a missing field
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl SummarizeRequest {
    pub fn new(content: impl Into<String>, content_type: ContentType, format: OutputFormat) -> Self {
        Self {
            content: content.into(),
            content_type: content_type.as_str().to_string(),
            output_format: format.id().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeResult {
    pub summary: String,
    pub format: OutputFormat,
    /// Characters of text sent to the model
    pub content_length: usize,
    pub truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hashtags: Option<String>,
}
