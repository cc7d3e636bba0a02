//! Mock Graph API server setup for integration tests

use graph_sdk_rust::Facebook;
use mockito::{Matcher, Mock, Server, ServerGuard};
use std::sync::Arc;
use tokio::sync::Mutex;

pub const TEST_VERSION: &str = "v2.5";

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: Arc<Mutex<ServerGuard>>,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        init_tracing();
        let server = Server::new_async().await;
        let base_url = server.url();
        Self {
            server: Arc::new(Mutex::new(server)),
            base_url,
        }
    }

    /// Create a facade pointed at the mock server
    pub fn create_facebook(&self, default_token: Option<&str>) -> graph_sdk_rust::Result<Facebook> {
        let mut builder = Facebook::builder("123", "foo_secret")
            .default_graph_version(TEST_VERSION)
            .request_timeout_secs(5)
            .base_url_override(&self.base_url);
        if let Some(token) = default_token {
            builder = builder.default_access_token(token);
        }
        builder.build()
    }

    /// Create a mock for a JSON response to `method path` with the given query params
    pub async fn mock_json(
        &self,
        method: &str,
        path: &str,
        query: Vec<(&str, &str)>,
        status: usize,
        body: &str,
    ) -> Mock {
        let mut server = self.server.lock().await;
        let query = Matcher::AllOf(
            query
                .into_iter()
                .map(|(k, v)| Matcher::UrlEncoded(k.to_string(), v.to_string()))
                .collect(),
        );
        server
            .mock(method, path)
            .match_query(query)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// Create a mock for a form-encoded POST whose body contains every fragment
    pub async fn mock_form_post(
        &self,
        path: &str,
        token: &str,
        body_fragments: Vec<&str>,
        response_body: &str,
    ) -> Mock {
        let mut server = self.server.lock().await;
        let body = Matcher::AllOf(
            body_fragments
                .into_iter()
                .map(|f| Matcher::Regex(regex::escape(f)))
                .collect(),
        );
        server
            .mock("POST", path)
            .match_query(Matcher::UrlEncoded(
                "access_token".to_string(),
                token.to_string(),
            ))
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(body)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(response_body)
            .create_async()
            .await
    }
}

/// Route SDK logs to the test output; set `RUST_LOG=graph_sdk_rust=debug` to see them.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
