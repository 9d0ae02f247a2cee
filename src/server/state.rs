use std::time::Duration;

use crate::auth::{AuthClient, AuthError};
use crate::config::AppConfig;
use crate::summarizer::Summarizer;
use crate::DistillError;

/// Everything a request handler needs; built once at startup, never mutated
pub struct ServerState {
    summarizer: Summarizer,
    auth: Option<AuthClient>,
    session_cookie: String,
    secure_cookies: bool,
}

impl ServerState {
    pub fn new(summarizer: Summarizer, auth: Option<AuthClient>, config: &AppConfig) -> Self {
        Self {
            summarizer,
            auth,
            session_cookie: config.server.session_cookie.clone(),
            secure_cookies: config.server.secure_cookies,
        }
    }

    /// Fails fast when LLM credentials are missing
    pub fn from_config(config: &AppConfig) -> Result<Self, DistillError> {
        let summarizer = Summarizer::from_config(config)?;
        let auth = config
            .auth_settings()
            .map(|settings| AuthClient::new(&settings, Duration::from_secs(config.timeout)))
            .transpose()?;
        Ok(Self::new(summarizer, auth, config))
    }

    pub fn summarizer(&self) -> &Summarizer {
        &self.summarizer
    }

    pub fn auth(&self) -> Result<&AuthClient, AuthError> {
        self.auth.as_ref().ok_or(AuthError::NotConfigured)
    }

    pub fn session_cookie(&self) -> &str {
        &self.session_cookie
    }

    pub fn secure_cookies(&self) -> bool {
        self.secure_cookies
    }
}
