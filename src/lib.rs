//! # graph-sdk-rust
//!
//! Client-side SDK for the Facebook Graph API.
//!
//! ## Overview
//!
//! The crate turns logical Graph calls into well-formed HTTP requests and
//! merges many calls into a single batch round trip. Requests never perform
//! I/O themselves; a thin async transport sends them and unpacks the
//! response envelopes.
//!
//! ## Key Features
//!
//! - **Requests**: [`Request`] derives the relative URL, query string and form body of a call
//! - **Batching**: [`BatchRequest`] packs up to 50 calls into one POST with per-item token
//!   resolution and name-based addressing
//! - **Facade**: [`Facebook`] merges app, token and Graph version defaults into every call
//! - **Transport**: [`transport::HttpTransport`] sends requests with `reqwest`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use graph_sdk_rust::{Facebook, Method, RequestOptions};
//!
//! #[tokio::main]
//! async fn main() -> graph_sdk_rust::Result<()> {
//!     let fb = Facebook::builder("app-id", "app-secret")
//!         .default_access_token("user-token")
//!         .build()?;
//!
//!     let me = fb.get("me", RequestOptions::new().param("fields", "id,name")).await?;
//!     println!("{}", me.body);
//!
//!     let mut batch = fb.batch_request();
//!     batch.add_named(fb.request(Method::Get, "me"), "user")?;
//!     batch.add_named(fb.request(Method::Get, "me/feed"), "feed")?;
//!     let responses = fb.send_batch(&mut batch).await?;
//!     if let Some(feed) = responses.get("feed") {
//!         println!("{:?}", feed.body);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`types`] | App credentials, access tokens, methods, param/header maps |
//! | [`request`] | Single requests and batch assembly |
//! | [`response`] | Response envelopes and batch result matching |
//! | [`transport`] | HTTP transport |
//! | [`client`] | The [`Facebook`] facade |
//! | [`config`] | Explicit SDK configuration |

pub mod client;
pub mod config;
pub mod request;
pub mod response;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use client::{Facebook, FacebookBuilder, RequestOptions};
pub use config::FacebookConfig;
pub use request::{BatchEntry, BatchItem, BatchMember, BatchRequest, Request, MAX_REQUESTS_PER_BATCH};
pub use response::{BatchItemResponse, BatchResponse, GraphError, GraphResponse, ResponseHeaders};
pub use types::{AccessToken, App, Headers, Method, Params, DEFAULT_GRAPH_VERSION};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
