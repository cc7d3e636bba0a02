use crate::client::core::Facebook;
use crate::config::FacebookConfig;
use crate::transport::HttpTransport;
use crate::types::{AccessToken, App};
use crate::Result;
use std::sync::Arc;

/// Builder for creating a [`Facebook`] facade with custom configuration.
///
/// Keep this surface area small and predictable.
pub struct FacebookBuilder {
    config: FacebookConfig,
    transport: Option<HttpTransport>,
}

impl FacebookBuilder {
    pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self::from_config(FacebookConfig::new(app_id, app_secret))
    }

    pub fn from_config(config: FacebookConfig) -> Self {
        Self {
            config,
            transport: None,
        }
    }

    /// Graph version used when a call does not name one.
    pub fn default_graph_version(mut self, version: impl Into<String>) -> Self {
        self.config.default_graph_version = version.into();
        self
    }

    /// Token used when a call does not carry one.
    pub fn default_access_token(mut self, token: impl Into<AccessToken>) -> Self {
        self.config.default_access_token = Some(token.into());
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = Some(secs);
        self
    }

    /// Override the Graph host.
    ///
    /// This is primarily for testing with mock servers.
    pub fn base_url_override(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Use a pre-built transport instead of one derived from the config.
    pub fn transport(mut self, transport: HttpTransport) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the facade.
    pub fn build(self) -> Result<Facebook> {
        self.config.validate()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => HttpTransport::from_config(&self.config)?,
        };

        let app = Arc::new(App::new(
            self.config.app_id.clone(),
            self.config.app_secret.clone(),
        ));

        Ok(Facebook {
            app,
            default_graph_version: self.config.default_graph_version,
            default_access_token: self
                .config
                .default_access_token
                .filter(|t| !t.is_empty()),
            transport,
        })
    }
}
