use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// File name of the draft store inside the data directory
pub const DRAFTS_FILE: &str = "distill_drafts.json";

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Provider used for completions
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default = "default_providers")]
    pub providers: HashMap<String, ProviderConfig>,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Authentication provider; sign-in endpoints are disabled without it
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    #[serde(default)]
    pub youtube: YoutubeConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub drafts: DraftsConfig,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Configuration for a specific LLM provider
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier (e.g., "gpt-3.5-turbo"); each provider has its own default
    pub model: Option<String>,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server listens on
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Name of the cookie holding the session token
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,
    /// Mark the session cookie `Secure` (requires HTTPS)
    #[serde(default)]
    pub secure_cookies: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            session_cookie: default_session_cookie(),
            secure_cookies: false,
        }
    }
}

/// Supabase-compatible auth endpoint
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Project URL, e.g. https://xyzcompany.supabase.co
    pub url: String,
    /// Public anon key sent as the `apikey` header
    pub anon_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct YoutubeConfig {
    /// Origin serving watch pages
    #[serde(default = "default_youtube_base_url")]
    pub base_url: String,
    /// Preferred caption language code
    #[serde(default = "default_caption_language")]
    pub language: String,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            base_url: default_youtube_base_url(),
            language: default_caption_language(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExtractionConfig {
    /// Characters of extracted text sent to the model
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    /// User agent used when fetching pages and transcripts
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DraftsConfig {
    /// Draft store file; defaults to the user's data directory
    pub path: Option<PathBuf>,
}

// Default value functions
fn default_provider() -> String {
    "openai".to_string()
}

fn default_providers() -> HashMap<String, ProviderConfig> {
    let mut providers = HashMap::new();
    providers.insert(
        "openai".to_string(),
        ProviderConfig {
            enabled: true,
            ..Default::default()
        },
    );
    providers
}

fn default_enabled() -> bool {
    true
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_session_cookie() -> String {
    "distill-session".to_string()
}

fn default_youtube_base_url() -> String {
    "https://www.youtube.com".to_string()
}

fn default_caption_language() -> String {
    "en".to_string()
}

fn default_max_chars() -> usize {
    15_000
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; DistillBot/1.0)".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: default_providers(),
            server: ServerConfig::default(),
            auth: None,
            youtube: YoutubeConfig::default(),
            extraction: ExtractionConfig::default(),
            drafts: DraftsConfig::default(),
            timeout: default_timeout(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with DISTILL__ prefix
    /// 2. distill.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: DISTILL__PROVIDERS__OPENAI__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Auth settings from the config file, or from SUPABASE_URL / SUPABASE_ANON_KEY
    pub fn auth_settings(&self) -> Option<AuthConfig> {
        self.auth.clone().or_else(|| {
            let url = std::env::var("SUPABASE_URL").ok()?;
            let anon_key = std::env::var("SUPABASE_ANON_KEY").ok()?;
            Some(AuthConfig { url, anon_key })
        })
    }

    /// Location of the draft store file
    pub fn drafts_path(&self) -> PathBuf {
        self.drafts.path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("distill")
                .join(DRAFTS_FILE)
        })
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("distill").required(false))
        // Use double underscore for nested: DISTILL__PROVIDERS__OPENAI__API_KEY
        .add_source(
            Environment::with_prefix("DISTILL")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
