//! Batch requests: several Graph calls sent in one HTTP round trip.
//!
//! A [`BatchRequest`] is itself a POST request to the Graph root whose body
//! carries a JSON array of [`BatchItem`] descriptors. Items are applied by the
//! server in array order, and later items may refer to earlier ones by name,
//! so insertion order is preserved everywhere.

use super::Request;
use crate::types::{AccessToken, App, Headers, Method, Params, DEFAULT_GRAPH_VERSION};
use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::debug;

/// Maximum number of sub-requests the Graph API accepts in one batch.
pub const MAX_REQUESTS_PER_BATCH: usize = 50;

/// What can be handed to [`BatchRequest::add`].
#[derive(Debug, Clone)]
pub enum BatchMember {
    /// One request, optionally named.
    Single {
        request: Request,
        name: Option<String>,
    },
    /// Members named after their zero-based position.
    Sequence(Vec<BatchMember>),
    /// Members named after their key, in the given order.
    Named(Vec<(String, BatchMember)>),
}

impl BatchMember {
    pub fn named(name: impl Into<String>, request: Request) -> Self {
        BatchMember::Single {
            request,
            name: Some(name.into()),
        }
    }
}

impl From<Request> for BatchMember {
    fn from(request: Request) -> Self {
        BatchMember::Single {
            request,
            name: None,
        }
    }
}

impl From<Vec<Request>> for BatchMember {
    fn from(requests: Vec<Request>) -> Self {
        BatchMember::Sequence(requests.into_iter().map(BatchMember::from).collect())
    }
}

impl<K: Into<String>> From<Vec<(K, Request)>> for BatchMember {
    fn from(requests: Vec<(K, Request)>) -> Self {
        BatchMember::Named(
            requests
                .into_iter()
                .map(|(name, request)| (name.into(), BatchMember::from(request)))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, Request>> for BatchMember {
    fn from(requests: BTreeMap<String, Request>) -> Self {
        BatchMember::from(requests.into_iter().collect::<Vec<_>>())
    }
}

/// Iteration order of a `HashMap` is unspecified; prefer `Vec<(K, Request)>` when order matters.
impl From<HashMap<String, Request>> for BatchMember {
    fn from(requests: HashMap<String, Request>) -> Self {
        BatchMember::from(requests.into_iter().collect::<Vec<_>>())
    }
}

/// A request stored in a batch, with the name used to address its result.
#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub name: Option<String>,
    pub request: Request,
}

impl BatchEntry {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn request(&self) -> &Request {
        &self.request
    }
}

/// One element of the `batch` JSON array. Absent fields are omitted, never null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItem {
    pub headers: Headers,
    pub method: Method,
    pub relative_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<AccessToken>,
}

/// A POST to the Graph root carrying up to [`MAX_REQUESTS_PER_BATCH`] sub-requests.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    inner: Request,
    requests: Vec<BatchEntry>,
}

impl BatchRequest {
    pub fn new(app: Arc<App>) -> Self {
        Self {
            inner: Request::new(app, Method::Post, ""),
            requests: Vec::new(),
        }
    }

    pub fn with_access_token(mut self, token: impl Into<AccessToken>) -> Self {
        self.inner.set_access_token(token);
        self
    }

    pub fn with_optional_access_token(mut self, token: Option<AccessToken>) -> Self {
        self.inner = self.inner.with_optional_access_token(token);
        self
    }

    pub fn with_graph_version(mut self, version: impl Into<String>) -> Self {
        let version = version.into();
        self.inner = if version.is_empty() {
            self.inner.with_graph_version(DEFAULT_GRAPH_VERSION)
        } else {
            self.inner.with_graph_version(version)
        };
        self
    }

    /// Add initial members; fails like [`BatchRequest::add`].
    pub fn with_requests(mut self, member: impl Into<BatchMember>) -> Result<Self> {
        self.add(member)?;
        Ok(self)
    }

    /// Append a request, a sequence of requests, or a keyed set of requests.
    ///
    /// A request without a token inherits the batch token. If neither has
    /// one the call fails; members appended before the failure stay in the batch.
    pub fn add(&mut self, member: impl Into<BatchMember>) -> Result<()> {
        self.add_member(member.into(), None)
    }

    /// Append a single request under `name`.
    pub fn add_named(&mut self, request: Request, name: impl Into<String>) -> Result<()> {
        self.add(BatchMember::named(name, request))
    }

    fn add_member(&mut self, member: BatchMember, name: Option<String>) -> Result<()> {
        match member {
            BatchMember::Sequence(members) => {
                for (index, member) in members.into_iter().enumerate() {
                    self.add_member(member, Some(index.to_string()))?;
                }
                Ok(())
            }
            BatchMember::Named(members) => {
                for (key, member) in members {
                    self.add_member(member, Some(key))?;
                }
                Ok(())
            }
            BatchMember::Single {
                mut request,
                name: own_name,
            } => {
                self.resolve_access_token(&mut request)?;
                let name = name.or(own_name);
                debug!(
                    name = name.as_deref().unwrap_or("<unnamed>"),
                    method = %request.method(),
                    relative_url = %request.url(),
                    position = self.requests.len(),
                    "added request to batch"
                );
                self.requests.push(BatchEntry { name, request });
                Ok(())
            }
        }
    }

    fn resolve_access_token(&self, request: &mut Request) -> Result<()> {
        if request.access_token().is_some() {
            return Ok(());
        }
        match self.inner.access_token() {
            Some(token) => {
                request.set_access_token(token.clone());
                Ok(())
            }
            None => Err(Error::validation_with_context(
                "missing access token on request and batch request",
                ErrorContext::new()
                    .with_field_path(format!("batch.requests[{}]", self.requests.len()))
                    .with_details(format!("{} {}", request.method(), request.url()))
                    .with_source("batch_request"),
            )),
        }
    }

    /// Freeze the current entries into the outer request's params.
    ///
    /// Safe to call repeatedly; each call recomputes the body from the entries.
    pub fn prepare_batch_request(&mut self) -> Result<()> {
        let batch = self.requests_to_json()?;
        debug!(
            count = self.requests.len(),
            bytes = batch.len(),
            "prepared batch request"
        );
        let mut params = Params::new();
        params.insert("batch".to_string(), Value::String(batch));
        params.insert("include_headers".to_string(), Value::Bool(true));
        self.inner.extend_params(params);
        Ok(())
    }

    /// Describe one sub-request as a batch array element.
    pub fn request_entity_to_batch_array(&self, request: &Request, name: Option<&str>) -> BatchItem {
        let access_token = match request.access_token() {
            Some(token) if Some(token) != self.inner.access_token() => Some(token.clone()),
            _ => None,
        };
        BatchItem {
            headers: request.headers().clone(),
            method: request.method(),
            relative_url: request.url(),
            body: request.url_encode_body(),
            name: name.map(str::to_string),
            access_token,
        }
    }

    /// All entries as batch array elements, in insertion order.
    pub fn batch_items(&self) -> Vec<BatchItem> {
        self.requests
            .iter()
            .map(|entry| self.request_entity_to_batch_array(&entry.request, entry.name()))
            .collect()
    }

    /// Serialize the entries to the JSON array sent as the `batch` param.
    pub fn requests_to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.batch_items())?)
    }

    /// Check the batch is non-empty and within [`MAX_REQUESTS_PER_BATCH`].
    pub fn validate_batch_request_count(&self) -> Result<()> {
        let count = self.requests.len();
        if count == 0 {
            return Err(Error::validation_with_context(
                "empty batch request",
                ErrorContext::new()
                    .with_field_path("batch.requests")
                    .with_source("batch_request"),
            ));
        }
        if count > MAX_REQUESTS_PER_BATCH {
            return Err(Error::validation_with_context(
                format!(
                    "the limit of requests in batch is {}",
                    MAX_REQUESTS_PER_BATCH
                ),
                ErrorContext::new()
                    .with_field_path("batch.requests")
                    .with_details(format!("got {} requests", count))
                    .with_source("batch_request"),
            ));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn entries(&self) -> &[BatchEntry] {
        &self.requests
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BatchEntry> {
        self.requests.iter()
    }

    /// Entry names in order; unnamed entries yield `None`.
    pub fn names(&self) -> Vec<Option<String>> {
        self.requests.iter().map(|e| e.name.clone()).collect()
    }

    /// The outer POST request the transport sends.
    pub fn as_request(&self) -> &Request {
        &self.inner
    }

    pub fn app(&self) -> &Arc<App> {
        self.inner.app()
    }

    pub fn access_token(&self) -> Option<&AccessToken> {
        self.inner.access_token()
    }

    pub fn graph_version(&self) -> &str {
        self.inner.graph_version()
    }

    pub fn headers(&self) -> &Headers {
        self.inner.headers()
    }

    pub fn url(&self) -> String {
        self.inner.url()
    }

    pub fn params(&self) -> Params {
        self.inner.params()
    }

    pub fn post_params(&self) -> Option<Params> {
        self.inner.post_params()
    }

    pub fn url_encode_body(&self) -> Option<String> {
        self.inner.url_encode_body()
    }
}

impl<'a> IntoIterator for &'a BatchRequest {
    type Item = &'a BatchEntry;
    type IntoIter = std::slice::Iter<'a, BatchEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.requests.iter()
    }
}

impl IntoIterator for BatchRequest {
    type Item = BatchEntry;
    type IntoIter = std::vec::IntoIter<BatchEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.requests.into_iter()
    }
}
