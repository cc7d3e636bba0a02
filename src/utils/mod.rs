//! Small string helpers shared by requests and the transport.

pub mod form;
pub mod path;

pub use form::{param_value_to_string, url_encode};
pub use path::force_slash_prefix;
