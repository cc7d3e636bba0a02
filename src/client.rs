//! Facade over requests, batches and the transport.
//!
//! [`Facebook`] carries the app credentials, default Graph version and default
//! token, builds [`crate::request::Request`]s with those defaults merged in,
//! and hands them to the [`crate::transport::HttpTransport`].

pub mod builder;
pub mod core;
pub mod options;

pub use builder::FacebookBuilder;
pub use core::Facebook;
pub use options::RequestOptions;
