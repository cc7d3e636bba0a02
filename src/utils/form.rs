//! `application/x-www-form-urlencoded` encoding of request parameters.

use crate::types::Params;
use serde_json::Value;

/// Render a parameter value the way it travels on the wire.
///
/// Strings go out verbatim, scalars use their JSON text, `null` becomes an
/// empty string, and arrays/objects are sent as compact JSON.
pub fn param_value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Form-encode `params` as `key=value&...` in key order.
pub fn url_encode(params: &Params) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, &param_value_to_string(value));
    }
    serializer.finish()
}
