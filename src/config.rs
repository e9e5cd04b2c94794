use std::env;
use thiserror::Error;

pub const EMAIL_ADDRESS: &str = "EMAIL_ADDRESS";
pub const EMAIL_PASSWORD: &str = "EMAIL_PASSWORD";
pub const RECIPIENT_EMAIL: &str = "RECIPIENT_EMAIL";
pub const NEWS_API_KEY: &str = "NEWS_API_KEY";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable {0}. Check your .env file.")]
    Missing(&'static str),
}

/// Secrets needed for one run. Loaded once in `main` and passed down.
#[derive(Clone)]
pub struct Config {
    pub sender_email: String,
    pub sender_password: String,
    pub recipient_email: String,
    pub news_api_key: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("sender_email", &self.sender_email)
            .field("sender_password", &"<redacted>")
            .field("recipient_email", &self.recipient_email)
            .field("news_api_key", &"<redacted>")
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Don't fail if .env missing

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any name -> value lookup. Unset and blank values
    /// are both treated as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        Ok(Config {
            sender_email: require(EMAIL_ADDRESS)?,
            sender_password: require(EMAIL_PASSWORD)?,
            recipient_email: require(RECIPIENT_EMAIL)?,
            news_api_key: require(NEWS_API_KEY)?,
        })
    }
}
