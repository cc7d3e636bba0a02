//! SDK configuration.
//!
//! Credentials are always passed explicitly. [`FacebookConfig::from_env`] and
//! [`FacebookConfig::from_yaml_str`] are conveniences the caller opts into;
//! nothing reads the environment behind the caller's back.

use crate::types::{AccessToken, DEFAULT_GRAPH_VERSION};
use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const APP_ID_ENV_NAME: &str = "FACEBOOK_APP_ID";
pub const APP_SECRET_ENV_NAME: &str = "FACEBOOK_APP_SECRET";
pub const GRAPH_VERSION_ENV_NAME: &str = "FACEBOOK_GRAPH_VERSION";
pub const ACCESS_TOKEN_ENV_NAME: &str = "FACEBOOK_ACCESS_TOKEN";
pub const REQUEST_TIMEOUT_ENV_NAME: &str = "FACEBOOK_REQUEST_TIMEOUT_SECS";

/// Graph API host used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://graph.facebook.com";

/// Request timeout used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacebookConfig {
    pub app_id: String,
    pub app_secret: String,
    #[serde(default = "default_graph_version")]
    pub default_graph_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_access_token: Option<AccessToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn default_graph_version() -> String {
    DEFAULT_GRAPH_VERSION.to_string()
}

impl FacebookConfig {
    pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            default_graph_version: default_graph_version(),
            default_access_token: None,
            request_timeout_secs: None,
            base_url: None,
        }
    }

    pub fn with_graph_version(mut self, version: impl Into<String>) -> Self {
        self.default_graph_version = version.into();
        self
    }

    pub fn with_access_token(mut self, token: impl Into<AccessToken>) -> Self {
        self.default_access_token = Some(token.into());
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    /// Override the Graph host (primarily for testing with mock servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Build a config from `FACEBOOK_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup (environment-shaped).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::new(
            non_empty(APP_ID_ENV_NAME).unwrap_or_default(),
            non_empty(APP_SECRET_ENV_NAME).unwrap_or_default(),
        );
        if let Some(version) = non_empty(GRAPH_VERSION_ENV_NAME) {
            config.default_graph_version = version;
        }
        config.default_access_token = non_empty(ACCESS_TOKEN_ENV_NAME).map(AccessToken::from);
        if let Some(raw) = non_empty(REQUEST_TIMEOUT_ENV_NAME) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                Error::configuration_with_context(
                    format!("invalid request timeout \"{}\"", raw),
                    ErrorContext::new()
                        .with_field_path(REQUEST_TIMEOUT_ENV_NAME)
                        .with_details("expected a whole number of seconds")
                        .with_source("config_loader"),
                )
            })?;
            config.request_timeout_secs = Some(secs);
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML document with the same field names as this struct.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid config document: {}", e),
                ErrorContext::new().with_source("config_loader"),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the app credentials are present.
    pub fn validate(&self) -> Result<()> {
        if self.app_id.trim().is_empty() {
            return Err(Error::configuration_with_context(
                format!(
                    "required \"app_id\" not supplied in config and could not find fallback environment variable \"{}\"",
                    APP_ID_ENV_NAME
                ),
                ErrorContext::new()
                    .with_field_path("config.app_id")
                    .with_source("config_validator"),
            ));
        }
        if self.app_secret.trim().is_empty() {
            return Err(Error::configuration_with_context(
                format!(
                    "required \"app_secret\" not supplied in config and could not find fallback environment variable \"{}\"",
                    APP_SECRET_ENV_NAME
                ),
                ErrorContext::new()
                    .with_field_path("config.app_secret")
                    .with_source("config_validator"),
            ));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(Error::configuration_with_context(
                "request timeout must be greater than zero",
                ErrorContext::new()
                    .with_field_path("config.request_timeout_secs")
                    .with_source("config_validator"),
            ));
        }
        Ok(())
    }
}
