//! # Types Module
//!
//! Core data types shared by requests, batches and the facade.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`App`] | Application credentials (id, secret) |
//! | [`AccessToken`] | Opaque credential carried by requests |
//! | [`Method`] | HTTP verb of a Graph call |
//! | [`Params`] | Request parameters, name to JSON value |
//! | [`Headers`] | Request headers, name to value |
//!
//! ## Example
//!
//! ```rust
//! use graph_sdk_rust::types::{App, Method};
//!
//! let app = App::new("123", "shh");
//! assert_eq!(app.access_token().as_str(), "123|shh");
//! assert_eq!(Method::Post.as_str(), "POST");
//! ```

pub mod app;
pub mod method;
pub mod token;

pub use app::App;
pub use method::Method;
pub use token::AccessToken;

use std::collections::BTreeMap;

/// Graph API version used when none is given.
pub const DEFAULT_GRAPH_VERSION: &str = "v2.10";

/// Request parameters. Keys are sorted so encoded output is deterministic.
pub type Params = BTreeMap<String, serde_json::Value>;

/// Request headers.
pub type Headers = BTreeMap<String, String>;
