use std::time::Duration;

use crate::config::{AppConfig, ProviderConfig};
use crate::formats::OutputFormat;
use crate::model::{ContentType, SummarizeRequest, SummarizeResult};
use crate::summarizer::Summarizer;
use crate::DistillError;

/// Represents the input source for a distillation
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Fetch a web page
    Url(String),
    /// Fetch a YouTube video's transcript
    Youtube(String),
    /// Use plain text content
    Text(String),
}

impl InputSource {
    fn into_parts(self) -> (String, ContentType) {
        match self {
            InputSource::Url(url) => (url, ContentType::Url),
            InputSource::Youtube(url) => (url, ContentType::Youtube),
            InputSource::Text(text) => (text, ContentType::Text),
        }
    }
}

/// Optional LLM provider selection
#[derive(Debug, Clone)]
pub enum LlmProvider {
    OpenAI,
    Anthropic,
}

impl LlmProvider {
    /// Convert to provider name string used by the factory
    fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::OpenAI => "openai",
            LlmProvider::Anthropic => "anthropic",
        }
    }
}

/// Builder for configuring and executing a distillation
#[derive(Debug, Default)]
pub struct DistillerBuilder {
    source: Option<InputSource>,
    format: Option<OutputFormat>,
    config: Option<AppConfig>,
    provider: Option<LlmProvider>,
    timeout: Option<Duration>,
    api_key: Option<String>,
    model: Option<String>,
}

impl DistillerBuilder {
    /// Set the input source to a web page URL
    ///
    /// # Example
    /// ```
    /// use distill::Distiller;
    ///
    /// let builder = Distiller::builder()
    ///     .url("https://example.com/article");
    /// ```
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.source = Some(InputSource::Url(url.into()));
        self
    }

    /// Set the input source to a YouTube video URL
    pub fn youtube(mut self, url: impl Into<String>) -> Self {
        self.source = Some(InputSource::Youtube(url.into()));
        self
    }

    /// Set the input source to plain text
    ///
    /// # Example
    /// ```
    /// use distill::{Distiller, OutputFormat};
    ///
    /// let builder = Distiller::builder()
    ///     .text("Rust 1.0 was released in May 2015.")
    ///     .format(OutputFormat::Tweet);
    /// ```
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.source = Some(InputSource::Text(text.into()));
        self
    }

    /// Set the output format (defaults to a summary)
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Use this configuration instead of loading `distill.toml` and the environment
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a custom LLM provider
    pub fn provider(mut self, provider: LlmProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set a timeout for HTTP requests
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the API key for the LLM provider
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the LLM provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Build and execute the distillation
    ///
    /// # Errors
    /// Returns `DistillError` if:
    /// - No input source was specified
    /// - The provider has no credentials
    /// - Any step of [`Summarizer::handle`] fails
    ///
    /// # Example
    /// ```no_run
    /// # use distill::{Distiller, OutputFormat};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let result = Distiller::builder()
    ///     .url("https://example.com/article")
    ///     .format(OutputFormat::Bullets)
    ///     .build()
    ///     .await?;
    /// println!("{}", result.summary);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<SummarizeResult, DistillError> {
        let source = self.source.ok_or_else(|| {
            DistillError::Validation(
                "No input source specified. Use .url(), .youtube() or .text()".to_string(),
            )
        })?;

        let mut config = match self.config {
            Some(config) => config,
            None => AppConfig::load()?,
        };

        if let Some(provider) = &self.provider {
            config.default_provider = provider.as_str().to_string();
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout.as_secs().max(1);
        }
        if self.api_key.is_some() || self.model.is_some() {
            let entry = config
                .providers
                .entry(config.default_provider.clone())
                .or_insert_with(|| ProviderConfig {
                    enabled: true,
                    ..Default::default()
                });
            if let Some(api_key) = self.api_key {
                entry.api_key = Some(api_key);
            }
            if let Some(model) = self.model {
                entry.model = Some(model);
            }
        }

        let (content, content_type) = source.into_parts();
        let request = SummarizeRequest::new(
            content,
            content_type,
            self.format.unwrap_or(OutputFormat::Summary),
        );

        Summarizer::from_config(&config)?.handle(&request).await
    }
}

/// Main entry point for the builder API
pub struct Distiller;

impl Distiller {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use distill::Distiller;
    ///
    /// let builder = Distiller::builder();
    /// ```
    pub fn builder() -> DistillerBuilder {
        DistillerBuilder::default()
    }
}
