//! The request handler behind `POST /api/summarize`.
//!
//! Every step is a hard gate: the first failure is returned and nothing after
//! it runs. The only exception is the LinkedIn hashtag call, whose failure
//! just leaves `hashtags` out of the result.

use log::{debug, info};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::formats::OutputFormat;
use crate::hashtags::HashtagSuggester;
use crate::model::{ContentType, SummarizeRequest, SummarizeResult};
use crate::pipelines::{truncate, ContentExtractor};
use crate::providers::{CompletionRequest, LlmProvider, ProviderFactory};
use crate::url_to_text::ContentSource;
use crate::DistillError;

/// Presence and frequency penalty applied to every primary completion
pub const REPETITION_PENALTY: f64 = 0.1;

pub struct Summarizer {
    extractor: ContentExtractor,
    provider: Arc<dyn LlmProvider>,
    hashtags: HashtagSuggester,
    max_chars: usize,
}

impl Summarizer {
    pub fn new(
        extractor: ContentExtractor,
        provider: Arc<dyn LlmProvider>,
        max_chars: usize,
    ) -> Self {
        Self {
            extractor,
            hashtags: HashtagSuggester::new(Arc::clone(&provider)),
            provider,
            max_chars,
        }
    }

    /// Build from configuration; fails fast when the provider has no credentials
    pub fn from_config(config: &AppConfig) -> Result<Self, DistillError> {
        let provider: Arc<dyn LlmProvider> = ProviderFactory::get_default_provider(config)?.into();
        let extractor = ContentExtractor::from_config(config)?;
        info!("Using '{}' provider", provider.provider_name());
        Ok(Self::new(extractor, provider, config.extraction.max_chars))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Validate the request without doing any I/O
    pub fn validate(request: &SummarizeRequest) -> Result<(ContentSource, OutputFormat), DistillError> {
        if request.content.is_empty() {
            return Err(DistillError::Validation(
                "Please provide content to process".to_string(),
            ));
        }

        let content_type: ContentType = request.content_type.parse().map_err(|_| {
            DistillError::Validation("Please select a valid content type".to_string())
        })?;

        let format: OutputFormat = request.output_format.parse().map_err(|_| {
            DistillError::Validation("Please select a valid output format".to_string())
        })?;

        let source = ContentSource::resolve(&request.content, content_type)?;
        Ok((source, format))
    }

    pub async fn handle(&self, request: &SummarizeRequest) -> Result<SummarizeResult, DistillError> {
        let (source, format) = Self::validate(request)?;

        let text = self.extractor.extract(&source).await?;
        if text.trim().is_empty() {
            return Err(DistillError::NoContent);
        }

        let extracted = truncate(text, self.max_chars);
        let spec = format.spec();

        let completion = CompletionRequest::new(spec.system_prompt, extracted.text.as_str())
            .temperature(spec.temperature)
            .max_tokens(spec.max_tokens)
            .penalties(REPETITION_PENALTY, REPETITION_PENALTY);

        let summary = self.provider.complete(&completion).await?.ok_or_else(|| {
            DistillError::GenerationFailed("Failed to generate content. Please try again.".to_string())
        })?;
        debug!("Generated {} characters of {}", summary.len(), format);

        let hashtags = if format == OutputFormat::Linkedin {
            Some(self.hashtags.suggest(&extracted.text).await).filter(|tags| !tags.is_empty())
        } else {
            None
        };

        Ok(SummarizeResult {
            summary,
            format,
            content_length: extracted.text.chars().count(),
            truncated: extracted.truncated,
            hashtags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(content: &str, content_type: &str, format: &str) -> SummarizeRequest {
        SummarizeRequest {
            content: content.to_string(),
            content_type: content_type.to_string(),
            output_format: format.to_string(),
        }
    }

    fn validation_message(result: Result<(ContentSource, OutputFormat), DistillError>) -> String {
        match result {
            Err(DistillError::Validation(message)) => message,
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_content_wins_over_other_errors() {
        let message = validation_message(Summarizer::validate(&request("", "bogus", "bogus")));
        assert_eq!(message, "Please provide content to process");
    }

    #[test]
    fn test_unknown_content_type() {
        let message = validation_message(Summarizer::validate(&request("x", "pdf", "summary")));
        assert_eq!(message, "Please select a valid content type");
    }

    #[test]
    fn test_unknown_output_format() {
        let message = validation_message(Summarizer::validate(&request("x", "text", "haiku")));
        assert_eq!(message, "Please select a valid output format");
    }

    #[test]
    fn test_youtube_type_with_other_site() {
        let message = validation_message(Summarizer::validate(&request(
            "https://example.com/watch?v=abc",
            "youtube",
            "summary",
        )));
        assert_eq!(message, "Please provide a valid YouTube URL");
    }

    #[test]
    fn test_malformed_url() {
        let message =
            validation_message(Summarizer::validate(&request("not a url", "url", "tweet")));
        assert_eq!(message, "Please provide a valid URL");
    }

    #[test]
    fn test_valid_text_request() {
        let (source, format) =
            Summarizer::validate(&request("Some text", "text", "bullets")).unwrap();
        assert_eq!(source, ContentSource::Text("Some text".to_string()));
        assert_eq!(format, OutputFormat::Bullets);
    }
}
