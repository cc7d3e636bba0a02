//! Per-call overrides for facade requests.

use crate::types::{AccessToken, Headers, Params};
use serde_json::Value;

/// Optional token, params, headers and version for a single call.
///
/// Anything left unset falls back to the facade defaults.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub access_token: Option<AccessToken>,
    pub params: Params,
    pub headers: Headers,
    pub graph_version: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn access_token(mut self, token: impl Into<AccessToken>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn graph_version(mut self, version: impl Into<String>) -> Self {
        self.graph_version = Some(version.into());
        self
    }
}
