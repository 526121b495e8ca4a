//! Error types for geography API calls.
//!
//! Every failure is classified into an [`ErrorKind`] so that a stage can
//! record *what* went wrong without holding on to the error value itself.

use serde::Serialize;
use thiserror::Error;

/// The remote resource a request was for. Used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    AccessToken,
    States,
    Cities,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Resource::AccessToken => "access token",
            Resource::States => "states",
            Resource::Cities => "cities",
        };
        f.write_str(name)
    }
}

/// Coarse failure classification stored in stage state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// HTTP status outside the 2xx range.
    Response,
    /// Body did not match the expected structure.
    Shape,
    /// The request never produced a response.
    Transport,
}

/// Errors that can occur while fetching from the geography API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Upstream answered with a non-success status.
    #[error("Error requesting {resource}. The response was not ok (status {status}).")]
    Response { resource: Resource, status: u16 },

    /// Decoded body has the wrong structure.
    #[error("{0}")]
    Shape(String),

    /// Body was not valid JSON.
    #[error("Failed to decode {resource} response: {source}")]
    Decode {
        resource: Resource,
        #[source]
        source: reqwest::Error,
    },

    /// Connection failure, timeout, or a request that could not be built.
    #[error("Failed to request {resource}: {source}")]
    Transport {
        resource: Resource,
        #[source]
        source: reqwest::Error,
    },

    /// Endpoint URL could not be derived from the base URL.
    #[error("Invalid URL for {resource}: {message}")]
    InvalidUrl { resource: Resource, message: String },
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Response { .. } => ErrorKind::Response,
            FetchError::Shape(_) | FetchError::Decode { .. } => ErrorKind::Shape,
            FetchError::Transport { .. } | FetchError::InvalidUrl { .. } => ErrorKind::Transport,
        }
    }
}

/// Errors raised while constructing a [`GeoClient`](super::GeoClient).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}
