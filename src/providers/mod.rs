mod anthropic;
mod factory;
mod open_ai;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use open_ai::OpenAIProvider;

use async_trait::async_trait;
use thiserror::Error;

/// One chat completion: a system instruction plus the user's text
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Ignored by providers without repetition penalties
    pub presence_penalty: Option<f64>,
    pub frequency_penalty: Option<f64>,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature: 0.7,
            max_tokens: 500,
            presence_penalty: None,
            frequency_penalty: None,
        }
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn penalties(mut self, presence: f64, frequency: f64) -> Self {
        self.presence_penalty = Some(presence);
        self.frequency_penalty = Some(frequency);
        self
    }
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Request to provider failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider rejected our credentials
    #[error("Provider rejected the API key: {0}")]
    Unauthorized(String),

    #[error("Provider returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("{0} not found in config or environment")]
    MissingApiKey(&'static str),

    #[error("Provider '{0}' is not enabled in configuration")]
    NotEnabled(String),

    #[error("Unknown provider: {0}")]
    Unknown(String),
}

/// Unified trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Run one completion. `Ok(None)` means the model answered with no content.
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, ProviderError>;
}

/// Pull a human-readable message out of a provider error body
pub(crate) fn error_message(body: &serde_json::Value, fallback: &str) -> String {
    body["error"]["message"]
        .as_str()
        .or_else(|| body["error"].as_str())
        .unwrap_or(fallback)
        .to_string()
}
