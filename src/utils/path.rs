//! Relative URL segment helpers.

use std::borrow::Cow;

/// Prefix `segment` with `/` unless it already starts with one.
///
/// Idempotent: `force_slash_prefix(&force_slash_prefix(s)) == force_slash_prefix(s)`.
pub fn force_slash_prefix(segment: &str) -> Cow<'_, str> {
    if segment.starts_with('/') {
        Cow::Borrowed(segment)
    } else {
        Cow::Owned(format!("/{}", segment))
    }
}
