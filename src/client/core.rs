use crate::client::builder::FacebookBuilder;
use crate::client::options::RequestOptions;
use crate::config::FacebookConfig;
use crate::request::{BatchMember, BatchRequest, Request};
use crate::response::{BatchResponse, GraphResponse};
use crate::transport::HttpTransport;
use crate::types::{AccessToken, App, Method, DEFAULT_GRAPH_VERSION};
use crate::Result;
use std::sync::Arc;
use tracing::debug;

/// Entry point holding the app, the call defaults and the transport.
pub struct Facebook {
    pub(crate) app: Arc<App>,
    pub(crate) default_graph_version: String,
    pub(crate) default_access_token: Option<AccessToken>,
    pub(crate) transport: HttpTransport,
}

impl Facebook {
    /// Create a facade from an explicit configuration.
    pub fn new(config: FacebookConfig) -> Result<Self> {
        FacebookBuilder::from_config(config).build()
    }

    pub fn builder(app_id: impl Into<String>, app_secret: impl Into<String>) -> FacebookBuilder {
        FacebookBuilder::new(app_id, app_secret)
    }

    pub fn app(&self) -> &Arc<App> {
        &self.app
    }

    pub fn default_graph_version(&self) -> &str {
        &self.default_graph_version
    }

    pub fn default_access_token(&self) -> Option<&AccessToken> {
        self.default_access_token.as_ref()
    }

    pub fn set_default_access_token(&mut self, token: impl Into<AccessToken>) {
        let token = token.into();
        self.default_access_token = if token.is_empty() { None } else { Some(token) };
    }

    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    fn resolve_token(&self, token: Option<AccessToken>) -> Option<AccessToken> {
        token
            .filter(|t| !t.is_empty())
            .or_else(|| self.default_access_token.clone())
    }

    fn resolve_version(&self, version: Option<String>) -> String {
        version
            .filter(|v| !v.is_empty())
            .or_else(|| Some(self.default_graph_version.clone()).filter(|v| !v.is_empty()))
            .unwrap_or_else(|| DEFAULT_GRAPH_VERSION.to_string())
    }

    /// Build a request carrying the facade defaults.
    pub fn request(&self, method: Method, endpoint: impl Into<String>) -> Request {
        self.request_with(method, endpoint, RequestOptions::default())
    }

    /// Build a request, letting `options` override the facade defaults.
    pub fn request_with(
        &self,
        method: Method,
        endpoint: impl Into<String>,
        options: RequestOptions,
    ) -> Request {
        let RequestOptions {
            access_token,
            params,
            headers,
            graph_version,
        } = options;

        Request::new(Arc::clone(&self.app), method, endpoint)
            .with_params(params)
            .with_headers(headers)
            .with_optional_access_token(self.resolve_token(access_token))
            .with_graph_version(self.resolve_version(graph_version))
    }

    /// An empty batch carrying the facade defaults.
    pub fn batch_request(&self) -> BatchRequest {
        BatchRequest::new(Arc::clone(&self.app))
            .with_optional_access_token(self.default_access_token.clone())
            .with_graph_version(self.default_graph_version.clone())
    }

    /// A batch filled with `members`, with optional token and version overrides.
    pub fn batch_request_with(
        &self,
        members: impl Into<BatchMember>,
        access_token: Option<AccessToken>,
        graph_version: Option<String>,
    ) -> Result<BatchRequest> {
        BatchRequest::new(Arc::clone(&self.app))
            .with_optional_access_token(self.resolve_token(access_token))
            .with_graph_version(self.resolve_version(graph_version))
            .with_requests(members)
    }

    /// Build and send a single request.
    pub async fn send_request(
        &self,
        method: Method,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<GraphResponse> {
        let request = self.request_with(method, endpoint, options);
        self.send_facebook_request(&request).await
    }

    /// Send an already built request.
    pub async fn send_facebook_request(&self, request: &Request) -> Result<GraphResponse> {
        debug!(method = %request.method(), relative_url = %request.url(), "sending graph request");
        self.transport.send(request).await
    }

    pub async fn get(&self, endpoint: &str, options: RequestOptions) -> Result<GraphResponse> {
        self.send_request(Method::Get, endpoint, options).await
    }

    pub async fn post(&self, endpoint: &str, options: RequestOptions) -> Result<GraphResponse> {
        self.send_request(Method::Post, endpoint, options).await
    }

    pub async fn delete(&self, endpoint: &str, options: RequestOptions) -> Result<GraphResponse> {
        self.send_request(Method::Delete, endpoint, options).await
    }

    /// Build a batch from `members` and send it in one round trip.
    pub async fn send_batch_request(
        &self,
        members: impl Into<BatchMember>,
        access_token: Option<AccessToken>,
        graph_version: Option<String>,
    ) -> Result<BatchResponse> {
        let mut batch = self.batch_request_with(members, access_token, graph_version)?;
        self.send_batch(&mut batch).await
    }

    /// Send a batch assembled by the caller.
    pub async fn send_batch(&self, batch: &mut BatchRequest) -> Result<BatchResponse> {
        self.transport.send_batch(batch).await
    }
}
