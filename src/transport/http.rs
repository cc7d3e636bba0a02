use crate::config::{FacebookConfig, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::request::{BatchRequest, Request};
use crate::response::{BatchResponse, GraphResponse, ResponseHeaders};
use crate::utils::param_value_to_string;
use crate::Result;
use reqwest::header::{HeaderMap, CONTENT_TYPE, USER_AGENT};
use std::time::{Duration, Instant};
use tracing::info;

const SDK_USER_AGENT: &str = concat!("graph-sdk-rust/", env!("CARGO_PKG_VERSION"));
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Connection settings for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            pool_max_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl From<&FacebookConfig> for TransportConfig {
    fn from(config: &FacebookConfig) -> Self {
        Self {
            base_url: config.base_url().to_string(),
            timeout: config.request_timeout(),
            ..Self::default()
        }
    }
}

/// Sends [`Request`]s and [`BatchRequest`]s to the Graph API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: TransportConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Some(config.pool_idle_timeout))
            .build()
            .map_err(|e| crate::Error::Transport(crate::transport::TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &FacebookConfig) -> Result<Self> {
        Self::new(TransportConfig::from(config))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request and decode the response.
    ///
    /// Graph error envelopes and non-2xx statuses come back as [`crate::Error::Remote`].
    pub async fn send(&self, request: &Request) -> Result<GraphResponse> {
        let relative_url = request.url();
        let url = format!("{}{}", self.base_url, relative_url);

        let query: Vec<(String, String)> = request
            .params()
            .iter()
            .map(|(k, v)| (k.clone(), param_value_to_string(v)))
            .collect();

        let mut builder = self
            .client
            .request(request.method().into(), &url)
            .header(USER_AGENT, SDK_USER_AGENT)
            .query(&query);

        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.url_encode_body() {
            builder = builder.header(CONTENT_TYPE, FORM_CONTENT_TYPE).body(body);
        }

        let started = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|e| crate::Error::Transport(crate::transport::TransportError::Http(e)))?;

        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let text = response
            .text()
            .await
            .map_err(|e| crate::Error::Transport(crate::transport::TransportError::Http(e)))?;

        info!(
            method = %request.method(),
            relative_url = %relative_url,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "graph request completed"
        );

        GraphResponse::new(status, headers, &text, relative_url).error_for_status()
    }

    /// Validate, prepare and send a batch, then pair the results with entry names.
    pub async fn send_batch(&self, batch: &mut BatchRequest) -> Result<BatchResponse> {
        batch.validate_batch_request_count()?;
        batch.prepare_batch_request()?;

        info!(count = batch.len(), "sending batch request");
        let response = self.send(batch.as_request()).await?;
        BatchResponse::from_response(&response, batch.names())
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

fn collect_headers(headers: &HeaderMap) -> ResponseHeaders {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
