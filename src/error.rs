use thiserror::Error;

use crate::auth::AuthError;
use crate::providers::ProviderError;
use crate::url_to_text::ExtractError;

/// Errors that can occur while distilling content
#[derive(Error, Debug)]
pub enum DistillError {
    /// Missing, malformed or unrecognized request fields
    #[error("{0}")]
    Validation(String),

    /// Content source unreachable, no captions, or an empty page
    #[error("{message}")]
    ExtractionFailed {
        message: String,
        /// The source answered but had nothing usable (as opposed to a transport failure)
        upstream: bool,
    },

    /// Extracted text was empty after trimming
    #[error("No content could be extracted. Please check your input and try again.")]
    NoContent,

    /// The model returned nothing or the completion call failed
    #[error("{0}")]
    GenerationFailed(String),

    /// Missing credentials or unusable settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// Sign-in, sign-up or session errors
    #[error("{0}")]
    Auth(String),

    /// The auth provider could not be reached or failed
    #[error("{0}")]
    AuthUnavailable(String),

    /// Draft store file errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Draft store document errors
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading error
    #[error("Configuration error: {0}")]
    Settings(#[from] config::ConfigError),
}

impl DistillError {
    /// HTTP status code this error is reported with
    pub fn status_code(&self) -> u16 {
        match self {
            DistillError::Validation(_) | DistillError::NoContent => 400,
            DistillError::ExtractionFailed { upstream: true, .. } => 400,
            DistillError::Auth(_) => 401,
            _ => 500,
        }
    }

    /// Message safe to show to the person who sent the request
    pub fn public_message(&self) -> String {
        match self {
            DistillError::Config(_) | DistillError::Settings(_) => {
                "Server configuration error. Please try again later.".to_string()
            }
            DistillError::AuthUnavailable(_) => {
                "Authentication service unavailable. Please try again later.".to_string()
            }
            DistillError::Io(_) | DistillError::Json(_) => {
                "Failed to process content. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<ExtractError> for DistillError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::InvalidInput(message) => DistillError::Validation(message),
            ExtractError::Transport(_) => DistillError::ExtractionFailed {
                message: err.to_string(),
                upstream: false,
            },
            other => DistillError::ExtractionFailed {
                message: other.to_string(),
                upstream: true,
            },
        }
    }
}

impl From<ProviderError> for DistillError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::MissingApiKey(name) => {
                DistillError::Config(format!("{} not found in config or environment", name))
            }
            ProviderError::Unauthorized(message) => DistillError::Config(message),
            ProviderError::NotEnabled(_) | ProviderError::Unknown(_) => {
                DistillError::Config(err.to_string())
            }
            other => DistillError::GenerationFailed(other.to_string()),
        }
    }
}

impl From<AuthError> for DistillError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotConfigured => DistillError::Config(err.to_string()),
            AuthError::MissingCredentials => DistillError::Validation(err.to_string()),
            AuthError::Http(_) | AuthError::Unavailable(_) => {
                DistillError::AuthUnavailable(err.to_string())
            }
            other => DistillError::Auth(other.to_string()),
        }
    }
}
