//! # Response Module
//!
//! Envelopes returned by the transport. The SDK never interprets Graph data;
//! it only decodes the outer JSON, detects Graph error objects, and for batch
//! calls pairs each array element with the name of the entry that produced it.

use crate::{Error, ErrorContext, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Graph error object, as found under `"error"` in a response body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphError {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub error_subcode: Option<i64>,
    #[serde(default)]
    pub fbtrace_id: Option<String>,
}

impl GraphError {
    /// Extract the error object from a decoded body, if any.
    pub fn from_body(body: &Value) -> Option<Self> {
        let error = body.get("error")?;
        if !error.is_object() {
            return None;
        }
        serde_json::from_value(error.clone()).ok()
    }

    pub fn into_error(self, status: u16) -> Error {
        Error::Remote {
            status,
            message: self.message,
            error_type: self.error_type,
            code: self.code,
            subcode: self.error_subcode,
            fbtrace_id: self.fbtrace_id,
        }
    }
}

/// Response headers in arrival order. Repeated names (e.g. `Set-Cookie`) keep every value.
pub type ResponseHeaders = Vec<(String, String)>;

fn header_values<'a: 'n, 'n>(
    headers: &'a ResponseHeaders,
    name: &'n str,
) -> impl Iterator<Item = &'a str> + 'n {
    headers
        .iter()
        .filter(move |(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Decode a body as JSON, keeping non-JSON text as a JSON string.
fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Response to a single request (or to the outer batch POST).
#[derive(Debug, Clone)]
pub struct GraphResponse {
    pub status: u16,
    pub headers: ResponseHeaders,
    pub body: Value,
    /// Relative URL of the request that produced this response.
    pub request_url: String,
}

impl GraphResponse {
    pub fn new(status: u16, headers: ResponseHeaders, body_text: &str, request_url: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: decode_body(body_text),
            request_url: request_url.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        header_values(&self.headers, name).next()
    }

    /// Every value of a header, in arrival order.
    pub fn header_values<'a>(&'a self, name: &'a str) -> Vec<&'a str> {
        header_values(&self.headers, name).collect()
    }

    pub fn error(&self) -> Option<GraphError> {
        GraphError::from_body(&self.body)
    }

    pub fn is_error(&self) -> bool {
        !self.is_success() || self.error().is_some()
    }

    /// Turn Graph error envelopes and non-2xx statuses into [`Error::Remote`].
    pub fn error_for_status(self) -> Result<Self> {
        if let Some(error) = self.error() {
            warn!(
                status = self.status,
                code = error.code,
                error_type = error.error_type.as_deref().unwrap_or("unknown"),
                request_url = %self.request_url,
                "graph api returned an error"
            );
            return Err(error.into_error(self.status));
        }
        if !self.is_success() {
            warn!(status = self.status, request_url = %self.request_url, "graph api returned a non-success status");
            return Err(Error::Remote {
                status: self.status,
                message: format!("unexpected HTTP status {}", self.status),
                error_type: None,
                code: None,
                subcode: None,
                fbtrace_id: None,
            });
        }
        Ok(self)
    }

    /// Deserialize the body into a caller type.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.body.clone())?)
    }
}

#[derive(Debug, Deserialize)]
struct RawBatchHeader {
    name: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct RawBatchItem {
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    headers: Vec<RawBatchHeader>,
    #[serde(default)]
    body: Option<String>,
}

/// Result of one sub-request in a batch.
#[derive(Debug, Clone)]
pub struct BatchItemResponse {
    pub name: Option<String>,
    /// `None` when the server skipped the sub-request (e.g. a failed dependency).
    pub status: Option<u16>,
    pub headers: ResponseHeaders,
    pub body: Option<Value>,
}

impl BatchItemResponse {
    pub fn is_success(&self) -> bool {
        matches!(self.status, Some(code) if (200..300).contains(&code))
    }

    /// First value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        header_values(&self.headers, name).next()
    }

    /// Every value of a header, in arrival order.
    pub fn header_values<'a>(&'a self, name: &'a str) -> Vec<&'a str> {
        header_values(&self.headers, name).collect()
    }

    pub fn error(&self) -> Option<GraphError> {
        self.body.as_ref().and_then(GraphError::from_body)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(
            self.body.clone().unwrap_or(Value::Null),
        )?)
    }
}

/// Decoded batch response, one item per batch entry in entry order.
#[derive(Debug, Clone, Default)]
pub struct BatchResponse {
    pub items: Vec<BatchItemResponse>,
}

impl BatchResponse {
    /// Pair the response array with the batch entry names.
    ///
    /// Entries without a matching array element are reported as skipped.
    pub fn from_response(response: &GraphResponse, names: Vec<Option<String>>) -> Result<Self> {
        let elements = response.body.as_array().ok_or_else(|| {
            Error::validation_with_context(
                "batch response body is not a JSON array",
                ErrorContext::new()
                    .with_field_path("response.body")
                    .with_source("batch_response"),
            )
        })?;

        let mut items = Vec::with_capacity(names.len());
        for (index, name) in names.into_iter().enumerate() {
            let raw = match elements.get(index) {
                Some(Value::Null) | None => None,
                Some(element) => Some(RawBatchItem::deserialize(element)?),
            };
            items.push(match raw {
                None => BatchItemResponse {
                    name,
                    status: None,
                    headers: ResponseHeaders::new(),
                    body: None,
                },
                Some(raw) => BatchItemResponse {
                    name,
                    status: raw.code,
                    headers: raw.headers.into_iter().map(|h| (h.name, h.value)).collect(),
                    body: raw.body.as_deref().map(decode_body),
                },
            });
        }
        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BatchItemResponse> {
        self.items.iter()
    }

    /// Look up an item by the name it was added under.
    pub fn get(&self, name: &str) -> Option<&BatchItemResponse> {
        self.items.iter().find(|item| item.name.as_deref() == Some(name))
    }
}

impl IntoIterator for BatchResponse {
    type Item = BatchItemResponse;
    type IntoIter = std::vec::IntoIter<BatchItemResponse>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_graph_response_decodes_json() {
        let resp = GraphResponse::new(200, ResponseHeaders::new(), r#"{"id":"123","name":"Foo"}"#, "/v2.10/me");
        assert!(resp.is_success());
        assert!(!resp.is_error());
        assert_eq!(resp.body["id"], json!("123"));

        #[derive(Deserialize)]
        struct User {
            id: String,
        }
        let user: User = resp.json().unwrap();
        assert_eq!(user.id, "123");
    }

    #[test]
    fn test_graph_response_keeps_plain_text() {
        let resp = GraphResponse::new(200, ResponseHeaders::new(), "true", "/v2.10/123");
        assert_eq!(resp.body, json!(true));
        let resp = GraphResponse::new(200, ResponseHeaders::new(), "not json", "/v2.10/123");
        assert_eq!(resp.body, json!("not json"));
        let resp = GraphResponse::new(204, ResponseHeaders::new(), "", "/v2.10/123");
        assert_eq!(resp.body, Value::Null);
    }

    #[test]
    fn test_error_envelope_becomes_remote_error() {
        let body = r#"{"error":{"message":"Invalid OAuth access token.","type":"OAuthException","code":190,"fbtrace_id":"Abc"}}"#;
        let resp = GraphResponse::new(400, ResponseHeaders::new(), body, "/v2.10/me");
        assert!(resp.is_error());
        match resp.error_for_status().unwrap_err() {
            Error::Remote {
                status,
                message,
                error_type,
                code,
                fbtrace_id,
                ..
            } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid OAuth access token.");
                assert_eq!(error_type.as_deref(), Some("OAuthException"));
                assert_eq!(code, Some(190));
                assert_eq!(fbtrace_id.as_deref(), Some("Abc"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_success_without_envelope() {
        let resp = GraphResponse::new(502, ResponseHeaders::new(), "Bad Gateway", "/v2.10/me");
        assert!(matches!(
            resp.error_for_status(),
            Err(Error::Remote { status: 502, .. })
        ));
    }

    #[test]
    fn test_batch_response_zips_names() {
        let body = json!([
            {"code": 200, "headers": [{"name": "Content-Type", "value": "application/json"}], "body": "{\"id\":\"1\"}"},
            null,
            {"code": 400, "headers": [], "body": "{\"error\":{\"message\":\"boom\",\"type\":\"GraphMethodException\",\"code\":100}}"}
        ]);
        let resp = GraphResponse::new(200, ResponseHeaders::new(), &body.to_string(), "/v2.10/");
        let batch = BatchResponse::from_response(
            &resp,
            vec![Some("user".into()), Some("feed".into()), None],
        )
        .unwrap();

        assert_eq!(batch.len(), 3);
        let user = batch.get("user").unwrap();
        assert!(user.is_success());
        assert_eq!(user.header("content-type"), Some("application/json"));
        assert_eq!(user.body, Some(json!({"id": "1"})));

        let feed = batch.get("feed").unwrap();
        assert_eq!(feed.status, None);
        assert!(!feed.is_success());

        let third = &batch.items[2];
        assert_eq!(third.name, None);
        assert_eq!(third.error().unwrap().code, Some(100));
    }

    #[test]
    fn test_batch_item_keeps_repeated_headers() {
        let body = json!([
            {"code": 200, "headers": [
                {"name": "Set-Cookie", "value": "a=1"},
                {"name": "Content-Type", "value": "application/json"},
                {"name": "Set-Cookie", "value": "b=2"}
            ], "body": "{}"}
        ]);
        let resp = GraphResponse::new(200, ResponseHeaders::new(), &body.to_string(), "/v2.10/");
        let batch = BatchResponse::from_response(&resp, vec![Some("me".into())]).unwrap();
        let item = batch.get("me").unwrap();

        assert_eq!(item.headers.len(), 3);
        assert_eq!(item.header_values("set-cookie"), vec!["a=1", "b=2"]);
        assert_eq!(item.header("Set-Cookie"), Some("a=1"));
    }

    #[test]
    fn test_graph_response_repeated_headers() {
        let headers = vec![
            ("set-cookie".to_string(), "a=1".to_string()),
            ("set-cookie".to_string(), "b=2".to_string()),
        ];
        let resp = GraphResponse::new(200, headers, "{}", "/v2.10/me");
        assert_eq!(resp.header_values("Set-Cookie"), vec!["a=1", "b=2"]);
        assert_eq!(resp.header("x-missing"), None);
    }

    #[test]
    fn test_batch_response_shorter_than_entries() {
        let resp = GraphResponse::new(200, ResponseHeaders::new(), "[]", "/v2.10/");
        let batch = BatchResponse::from_response(&resp, vec![Some("0".into())]).unwrap();
        assert_eq!(batch.items[0].status, None);
    }

    #[test]
    fn test_batch_response_requires_array() {
        let resp = GraphResponse::new(200, ResponseHeaders::new(), r#"{"id":"1"}"#, "/v2.10/");
        let err = BatchResponse::from_response(&resp, vec![None]).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }
}
