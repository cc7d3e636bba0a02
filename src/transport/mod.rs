//! HTTP transport for Graph requests.

mod http;

pub use http::{HttpTransport, TransportConfig, TransportError};
