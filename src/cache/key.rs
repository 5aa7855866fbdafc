//! Key Canonicalization
//!
//! Turns caller-supplied keys into the strings used to address storage.

use std::borrow::Cow;

use url::Url;

/// Separator between a non-URL key and its namespace.
pub const NAMESPACE_SEPARATOR: &str = ":ns=";

// == Canonicalize ==
/// Returns the storage key for `raw_key` within `namespace`.
///
/// The key is percent-decoded first. Absolute URLs are used verbatim; any
/// other key gets a `:ns=<namespace>` suffix. Keys that fail to decode are
/// used as given.
pub fn canonicalize(raw_key: &str, namespace: &str) -> String {
    let key = decode_key(raw_key);
    if is_valid_url(&key) {
        key.into_owned()
    } else {
        format!("{}{}{}", key, NAMESPACE_SEPARATOR, namespace)
    }
}

/// Returns true if `candidate` parses as an absolute URL.
pub fn is_valid_url(candidate: &str) -> bool {
    Url::parse(candidate).is_ok()
}

fn decode_key(raw_key: &str) -> Cow<'_, str> {
    urlencoding::decode(raw_key).unwrap_or(Cow::Borrowed(raw_key))
}
