use serde::{Deserialize, Serialize};

/// Default base URL of the geography API.
pub const DEFAULT_BASE_URL: &str = "https://www.universal-tutorial.com/api";

/// Country whose states are listed by default.
pub const DEFAULT_COUNTRY: &str = "United States";

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub stages: StagesConfig,
}

/// Geography API endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint is joined onto (e.g., "https://www.universal-tutorial.com/api").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Country passed to the states endpoint.
    #[serde(default = "default_country")]
    pub country: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Secrets read from the config file. Environment variables take precedence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub account_email: Option<String>,
    #[serde(default)]
    pub api_token: Option<String>,
}

/// Per-stage result policies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagesConfig {
    /// Collapse duplicate state names (default: false).
    #[serde(default)]
    pub dedupe_states: bool,
    /// Collapse duplicate city names (default: true).
    #[serde(default = "default_true")]
    pub dedupe_cities: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            country: default_country(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for StagesConfig {
    fn default() -> Self {
        Self {
            dedupe_states: false,
            dedupe_cities: true,
        }
    }
}
