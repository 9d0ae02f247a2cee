use log::warn;
use std::sync::Arc;

use crate::providers::{CompletionRequest, LlmProvider};

/// Tag vocabulary the model may choose from, by category
pub const HASHTAG_CATEGORIES: [(&str, &[&str]); 5] = [
    (
        "technology",
        &["tech", "innovation", "digital", "future", "ai", "machinelearning", "data", "programming"],
    ),
    (
        "business",
        &["business", "entrepreneurship", "leadership", "management", "startup", "success", "growth"],
    ),
    (
        "career",
        &["career", "jobs", "hiring", "work", "productivity", "personaldevelopment", "networking"],
    ),
    (
        "marketing",
        &["marketing", "socialmedia", "branding", "digitalmarketing", "content", "strategy"],
    ),
    (
        "industry",
        &["fintech", "healthtech", "edtech", "sustainability", "blockchain", "cybersecurity"],
    ),
];

const TEMPERATURE: f64 = 0.3;
const MAX_TOKENS: u32 = 50;

/// Build the system prompt listing every category and its tags
pub fn hashtag_prompt() -> String {
    let categories = HASHTAG_CATEGORIES
        .iter()
        .map(|(category, tags)| {
            let tags = tags
                .iter()
                .map(|tag| format!("#{}", tag))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}: {}", category, tags)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a LinkedIn hashtag expert. Analyze the content and suggest 3 relevant hashtags from these categories:\n{}\n\nReturn only the hashtags, separated by spaces, no other text.",
        categories
    )
}

/// Suggests topic hashtags with a second, cheap completion
pub struct HashtagSuggester {
    provider: Arc<dyn LlmProvider>,
}

impl HashtagSuggester {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Space-joined hashtags for `text`; empty on any failure
    pub async fn suggest(&self, text: &str) -> String {
        let request = CompletionRequest::new(hashtag_prompt(), text)
            .temperature(TEMPERATURE)
            .max_tokens(MAX_TOKENS);

        match self.provider.complete(&request).await {
            Ok(Some(hashtags)) => hashtags.trim().to_string(),
            Ok(None) => String::new(),
            Err(e) => {
                warn!("Error suggesting hashtags: {}", e);
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderError;
    use async_trait::async_trait;

    struct Canned(Result<Option<String>, u16>);

    #[async_trait]
    impl LlmProvider for Canned {
        fn provider_name(&self) -> &str {
            "canned"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, ProviderError> {
            assert_eq!(request.temperature, TEMPERATURE);
            assert_eq!(request.max_tokens, MAX_TOKENS);
            self.0.clone().map_err(|status| ProviderError::Api {
                status,
                message: "boom".to_string(),
            })
        }
    }

    #[test]
    fn test_prompt_lists_every_category() {
        let prompt = hashtag_prompt();
        for (category, tags) in HASHTAG_CATEGORIES {
            assert!(prompt.contains(&format!("{}: #{}", category, tags[0])));
        }
        assert!(prompt.contains("#machinelearning, #data"));
        assert!(prompt.contains("suggest 3 relevant hashtags"));
    }

    #[tokio::test]
    async fn test_suggest_returns_model_output() {
        let suggester =
            HashtagSuggester::new(Arc::new(Canned(Ok(Some(" #ai #tech #future\n".into())))));
        assert_eq!(suggester.suggest("content").await, "#ai #tech #future");
    }

    #[tokio::test]
    async fn test_suggest_swallows_errors() {
        let suggester = HashtagSuggester::new(Arc::new(Canned(Err(500))));
        assert_eq!(suggester.suggest("content").await, "");

        let suggester = HashtagSuggester::new(Arc::new(Canned(Ok(None))));
        assert_eq!(suggester.suggest("content").await, "");
    }
}
