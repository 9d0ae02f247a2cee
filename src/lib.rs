pub mod auth;
pub mod builder;
pub mod config;
pub mod drafts;
pub mod error;
pub mod formats;
pub mod hashtags;
pub mod model;
pub mod pipelines;
pub mod providers;
pub mod server;
pub mod summarizer;
pub mod url_to_text;

// Re-export commonly used types
pub use builder::{Distiller, DistillerBuilder, InputSource, LlmProvider};
pub use config::AppConfig;
pub use drafts::{format_relative_time, Draft, DraftPatch, DraftStore, NewDraft};
pub use error::DistillError;
pub use formats::{OutputFormat, OutputFormatSpec};
pub use model::{ContentType, SummarizeRequest, SummarizeResult};
pub use summarizer::Summarizer;

/// Summarize a web page with the configuration from `distill.toml` and the environment
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let result = distill::summarize_url("https://example.com/article").await?;
/// println!("{}", result.summary);
/// # Ok(())
/// # }
/// ```
pub async fn summarize_url(url: &str) -> Result<SummarizeResult, DistillError> {
    Distiller::builder().url(url).build().await
}

/// Turn plain text into `format` with the configuration from `distill.toml` and the environment
pub async fn distill_text(text: &str, format: OutputFormat) -> Result<SummarizeResult, DistillError> {
    Distiller::builder().text(text).format(format).build().await
}
