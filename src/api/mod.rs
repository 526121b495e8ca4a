//! Geography API access: wire client, header building and response shape checks.

mod client;
mod error;
mod headers;
pub mod validate;

use async_trait::async_trait;

use crate::config::Credentials;

pub use client::GeoClient;
pub use error::{ClientError, ErrorKind, FetchError, Resource};
pub use headers::{bearer_headers, credential_headers, Header};

/// Source of geography data consumed by the pipeline.
///
/// [`GeoClient`] talks to the real API. Each call performs exactly one
/// request and returns names already shape-checked, in upstream order.
#[async_trait]
pub trait GeoSource: Send + Sync {
    /// Exchange the two secrets for a bearer token.
    async fn access_token(&self, credentials: &Credentials) -> Result<String, FetchError>;

    /// State names for the configured country.
    async fn states(&self, access_token: &str) -> Result<Vec<String>, FetchError>;

    /// City names for one state.
    async fn cities(&self, access_token: &str, state: &str) -> Result<Vec<String>, FetchError>;
}
