//! # Request Module
//!
//! A [`Request`] is one logical Graph API call. It never performs I/O; it only
//! derives what the transport needs to put on the wire:
//!
//! | Accessor | Meaning |
//! |----------|---------|
//! | [`Request::url`] | `/{graph_version}/{endpoint}` |
//! | [`Request::params`] | query string parameters (always carries `access_token` when set) |
//! | [`Request::post_params`] | body parameters, `None` unless the method is POST |
//! | [`Request::url_encode_body`] | form-encoded body, `None` when there is nothing to send |
//!
//! Several requests can be merged into a single round trip with
//! [`batch::BatchRequest`].
//!
//! ## Example
//!
//! ```rust
//! use graph_sdk_rust::request::Request;
//! use graph_sdk_rust::types::{App, Method};
//! use std::sync::Arc;
//!
//! let app = Arc::new(App::new("123", "shh"));
//! let request = Request::new(app, Method::Post, "me/feed")
//!     .with_param("message", "hello")
//!     .with_access_token("user-token");
//!
//! assert_eq!(request.url(), "/v2.10/me/feed");
//! assert_eq!(request.url_encode_body().as_deref(), Some("message=hello"));
//! assert_eq!(request.params().len(), 1);
//! ```

pub mod batch;

pub use batch::{BatchEntry, BatchItem, BatchMember, BatchRequest, MAX_REQUESTS_PER_BATCH};

use crate::types::{AccessToken, App, Headers, Method, Params, DEFAULT_GRAPH_VERSION};
use crate::utils::{force_slash_prefix, url_encode};
use serde_json::Value;
use std::sync::Arc;

/// A single Graph API call.
#[derive(Debug, Clone)]
pub struct Request {
    app: Arc<App>,
    method: Method,
    endpoint: String,
    params: Params,
    headers: Headers,
    access_token: Option<AccessToken>,
    graph_version: String,
}

impl Request {
    pub fn new(app: Arc<App>, method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            app,
            method,
            endpoint: endpoint.into(),
            params: Params::new(),
            headers: Headers::new(),
            access_token: None,
            graph_version: DEFAULT_GRAPH_VERSION.to_string(),
        }
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_access_token(mut self, token: impl Into<AccessToken>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Replace the token; `None` clears it.
    pub fn with_optional_access_token(mut self, token: Option<AccessToken>) -> Self {
        self.access_token = token;
        self
    }

    pub fn with_graph_version(mut self, version: impl Into<String>) -> Self {
        self.graph_version = version.into();
        self
    }

    pub fn app(&self) -> &Arc<App> {
        &self.app
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn graph_version(&self) -> &str {
        &self.graph_version
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// The token, if one is set and non-empty.
    pub fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref().filter(|t| !t.is_empty())
    }

    pub fn set_access_token(&mut self, token: impl Into<AccessToken>) {
        self.access_token = Some(token.into());
    }

    /// Parameters exactly as supplied, regardless of method.
    pub fn raw_params(&self) -> &Params {
        &self.params
    }

    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.params.insert(key.into(), value.into());
    }

    pub(crate) fn extend_params(&mut self, params: Params) {
        self.params.extend(params);
    }

    /// Relative URL of the call, e.g. `/v2.10/me`.
    pub fn url(&self) -> String {
        format!(
            "{}{}",
            force_slash_prefix(&self.graph_version),
            force_slash_prefix(&self.endpoint)
        )
    }

    /// Query string parameters.
    ///
    /// POST parameters travel in the body, so only the token is left here for POST.
    pub fn params(&self) -> Params {
        let mut params = if self.method == Method::Post {
            Params::new()
        } else {
            self.params.clone()
        };
        if let Some(token) = self.access_token() {
            params.insert("access_token".to_string(), Value::String(token.to_string()));
        }
        params
    }

    /// Body parameters; `None` for methods without a body.
    pub fn post_params(&self) -> Option<Params> {
        match self.method {
            Method::Post => Some(self.params.clone()),
            _ => None,
        }
    }

    /// Form-encoded body, or `None` when there are no body parameters.
    pub fn url_encode_body(&self) -> Option<String> {
        self.post_params()
            .filter(|params| !params.is_empty())
            .map(|params| url_encode(&params))
    }

    /// Merge header contributions in order; later keys overwrite earlier ones.
    pub fn add_headers<I, K, V>(&mut self, headers: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in headers {
            self.headers.insert(key.into(), value.into());
        }
    }
}
