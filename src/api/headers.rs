//! Header building for geography API requests.

use crate::config::Credentials;

/// Header name and value.
pub type Header = (&'static str, String);

const JSON: &str = "application/json";

/// Headers for the token exchange: the two secrets plus `Accept`.
pub fn credential_headers(credentials: &Credentials) -> [Header; 3] {
    [
        ("Accept", JSON.to_string()),
        ("user-email", credentials.account_email.expose().to_string()),
        ("api-token", credentials.api_token.expose().to_string()),
    ]
}

/// Headers for token-authenticated endpoints.
pub fn bearer_headers(access_token: &str) -> [Header; 2] {
    [
        ("Accept", JSON.to_string()),
        ("Authorization", format!("Bearer {}", access_token)),
    ]
}
