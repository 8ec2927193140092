//! Configuration module

use std::env;
use std::path::PathBuf;

use crate::logic::breach::hibp::{HibpConfig, DEFAULT_TIMEOUT_SECS, HIBP_API_BASE};

/// Errors reading configuration files
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    /// Bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Sender directory JSON file
    pub directory_path: PathBuf,

    /// Spam model artifact JSON file
    pub model_path: PathBuf,

    /// HIBP API key; lookups are disabled when unset
    pub hibp_api_key: Option<String>,

    /// HIBP API base URL
    pub hibp_api_url: String,

    /// User-Agent sent to HIBP (required by the service)
    pub hibp_user_agent: String,

    /// Upper bound on one breach lookup
    pub breach_timeout_secs: u64,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10000),

            directory_path: env::var("DIRECTORY_PATH")
                .unwrap_or_else(|_| "config/directory.json".to_string())
                .into(),

            model_path: env::var("MODEL_PATH")
                .unwrap_or_else(|_| "models/spam_model.json".to_string())
                .into(),

            hibp_api_key: env::var("HIBP_API_KEY").ok().filter(|k| !k.trim().is_empty()),

            hibp_api_url: env::var("HIBP_API_URL").unwrap_or_else(|_| HIBP_API_BASE.to_string()),

            hibp_user_agent: env::var("HIBP_USER_AGENT")
                .unwrap_or_else(|_| concat!("sms-shield/", env!("CARGO_PKG_VERSION")).to_string()),

            breach_timeout_secs: env::var("BREACH_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|&s: &u64| s > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Breach client settings derived from this config
    pub fn hibp(&self) -> HibpConfig {
        HibpConfig {
            base_url: self.hibp_api_url.clone(),
            api_key: self.hibp_api_key.clone(),
            user_agent: self.hibp_user_agent.clone(),
            timeout_seconds: self.breach_timeout_secs,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("directory_path", &self.directory_path)
            .field("model_path", &self.model_path)
            .field("hibp_api_key", &self.hibp_api_key.as_ref().map(|_| "<redacted>"))
            .field("hibp_api_url", &self.hibp_api_url)
            .field("hibp_user_agent", &self.hibp_user_agent)
            .field("breach_timeout_secs", &self.breach_timeout_secs)
            .field("environment", &self.environment)
            .finish()
    }
}
