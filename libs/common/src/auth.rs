//! HTTP Basic authentication helpers

use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Build the value of an `Authorization` header for HTTP Basic authentication.
///
/// Credentials are not validated; empty values still produce a well-formed header.
pub fn basic_auth(username: &str, password: &str) -> String {
    let encoded = STANDARD.encode(format!("{}:{}", username, password));
    format!("Basic {}", encoded)
}
