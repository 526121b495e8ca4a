use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;

use crate::config::{ApiConfig, Credentials};

use super::error::{ClientError, FetchError, Resource};
use super::headers::{bearer_headers, credential_headers, Header};
use super::validate;
use super::GeoSource;

/// HTTP client for the geography API.
///
/// The base URL and country are fixed when the client is built.
#[derive(Clone)]
pub struct GeoClient {
    client: Client,
    base_url: Url,
    country: String,
}

impl GeoClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: config.base_url.clone(),
            message: e.to_string(),
        })?;

        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: config.base_url.clone(),
                message: "URL cannot be used as a base".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_seconds)))
            .build()?;

        Ok(Self {
            client,
            base_url,
            country: config.country.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    pub fn endpoint(&self, resource: Resource, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl {
                resource,
                message: format!("'{}' cannot be a base", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<const N: usize>(
        &self,
        resource: Resource,
        url: Url,
        headers: [Header; N],
    ) -> Result<Value, FetchError> {
        tracing::debug!(url = %url, resource = %resource, "Sending request");

        let mut builder = self.client.get(url);
        for (name, value) in headers {
            builder = builder.header(name, value);
        }

        let response = builder
            .send()
            .await
            .map_err(|source| FetchError::Transport { resource, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Response {
                resource,
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| FetchError::Decode { resource, source })
    }
}

#[async_trait]
impl GeoSource for GeoClient {
    async fn access_token(&self, credentials: &Credentials) -> Result<String, FetchError> {
        let url = self.endpoint(Resource::AccessToken, &["getaccesstoken"])?;
        let body = self
            .get_json(Resource::AccessToken, url, credential_headers(credentials))
            .await?;
        validate::access_token(&body)
    }

    async fn states(&self, access_token: &str) -> Result<Vec<String>, FetchError> {
        let url = self.endpoint(Resource::States, &["states", self.country.as_str()])?;
        let body = self
            .get_json(Resource::States, url, bearer_headers(access_token))
            .await?;
        validate::state_names(&body)
    }

    async fn cities(&self, access_token: &str, state: &str) -> Result<Vec<String>, FetchError> {
        let url = self.endpoint(Resource::Cities, &["cities", state])?;
        let body = self
            .get_json(Resource::Cities, url, bearer_headers(access_token))
            .await?;
        validate::city_names(&body)
    }
}
