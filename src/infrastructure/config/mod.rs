//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

pub const ENV_ID_INSTANCE: &str = "GREEN_ID_INSTANCE";
pub const ENV_API_TOKEN: &str = "GREEN_API_TOKEN_INSTANCE";
pub const ENV_API_URL: &str = "GREEN_API_URL";

/// receiveTimeout values accepted by Green API, in seconds
pub const RECEIVE_TIMEOUT_RANGE: std::ops::RangeInclusive<u64> = 5..=60;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub green_api: GreenApiConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    #[serde(default = "default_prefix")]
    pub command_prefix: String,
}

/// Green API instance settings. Credentials have no defaults.
#[derive(Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct GreenApiConfig {
    #[serde(default)]
    pub id_instance: Option<String>,
    #[serde(default)]
    pub api_token_instance: Option<String>,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Long-poll timeout for receiveNotification, in seconds
    #[serde(default = "default_receive_timeout")]
    pub receive_timeout: u64,
    /// Acknowledge queued notifications at startup without replying
    #[serde(default = "default_skip_backlog")]
    pub skip_backlog: bool,
}

/// Validated Green API credentials
#[derive(Clone, PartialEq, Eq)]
pub struct GreenApiCredentials {
    pub id_instance: String,
    pub api_token_instance: String,
}

impl GreenApiConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !RECEIVE_TIMEOUT_RANGE.contains(&self.receive_timeout) {
            return Err(ConfigError::InvalidValue(format!(
                "receive-timeout must be between {} and {} seconds: {}",
                RECEIVE_TIMEOUT_RANGE.start(),
                RECEIVE_TIMEOUT_RANGE.end(),
                self.receive_timeout
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for GreenApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GreenApiConfig")
            .field("id_instance", &self.id_instance)
            .field("api_token_instance", &self.api_token_instance.as_ref().map(|_| "***"))
            .field("api_url", &self.api_url)
            .field("receive_timeout", &self.receive_timeout)
            .field("skip_backlog", &self.skip_backlog)
            .finish()
    }
}

impl std::fmt::Debug for GreenApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GreenApiCredentials")
            .field("id_instance", &self.id_instance)
            .field("api_token_instance", &"***")
            .finish()
    }
}

fn default_prefix() -> String {
    "/".to_string()
}

fn default_api_url() -> String {
    "https://api.green-api.com".to_string()
}

fn default_receive_timeout() -> u64 {
    20
}

fn default_skip_backlog() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "muntushop-bot".to_string(),
                command_prefix: default_prefix(),
            },
            green_api: GreenApiConfig {
                id_instance: None,
                api_token_instance: None,
                api_url: default_api_url(),
                receive_timeout: default_receive_timeout(),
                skip_backlog: default_skip_backlog(),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Overlay values from environment variables
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Overlay values from a key lookup; empty values are ignored
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(id) = lookup(ENV_ID_INSTANCE) {
            self.green_api.id_instance = Some(id);
        }
        if let Some(token) = lookup(ENV_API_TOKEN) {
            self.green_api.api_token_instance = Some(token);
        }
        if let Some(url) = lookup(ENV_API_URL) {
            self.green_api.api_url = url;
        }
    }

    /// Require both Green API credentials and valid polling settings
    pub fn credentials(&self) -> Result<GreenApiCredentials, ConfigError> {
        self.green_api.validate()?;

        let id_instance = self
            .green_api
            .id_instance
            .clone()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingField(format!("green-api.id-instance (or {})", ENV_ID_INSTANCE)))?;

        let api_token_instance = self
            .green_api
            .api_token_instance
            .clone()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingField(format!("green-api.api-token-instance (or {})", ENV_API_TOKEN)))?;

        if !id_instance.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidValue(format!("id-instance must be numeric: {}", id_instance)));
        }

        Ok(GreenApiCredentials {
            id_instance,
            api_token_instance,
        })
    }
}
