//! Credential resolution from configuration and the environment.
//!
//! The two secrets needed to obtain an access token come from process-wide
//! configuration. Environment variables win over the config file. A missing
//! secret is never fatal: it resolves to an empty value and the pipeline
//! stays inert.

use super::types::CredentialsConfig;

/// Environment variable holding the account email.
pub const EMAIL_ENV_VAR: &str = "GEOFORM_API_EMAIL";

/// Environment variable holding the API token.
pub const TOKEN_ENV_VAR: &str = "GEOFORM_API_TOKEN";

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecureString(String);

impl SecureString {
    /// Create a new secure string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to APIs.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// The pair of secrets exchanged for an access token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub account_email: SecureString,
    pub api_token: SecureString,
}

impl Credentials {
    pub fn new(account_email: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            account_email: SecureString::new(account_email),
            api_token: SecureString::new(api_token),
        }
    }

    /// Both secrets are present. Only complete credentials cause network activity.
    pub fn is_complete(&self) -> bool {
        !self.account_email.is_empty() && !self.api_token.is_empty()
    }
}

/// Process-wide source of credentials.
pub struct CredentialSource;

impl CredentialSource {
    /// Resolve credentials from the process environment, falling back to the
    /// values in the config file.
    pub fn resolve(config: &CredentialsConfig) -> Credentials {
        Self::resolve_with(config, |name| std::env::var(name).ok())
    }

    /// Resolve credentials with a custom variable lookup.
    ///
    /// Empty values count as missing. Each missing secret is logged with the
    /// variable name that would supply it.
    pub fn resolve_with<F>(config: &CredentialsConfig, lookup: F) -> Credentials
    where
        F: Fn(&str) -> Option<String>,
    {
        let account_email = pick(EMAIL_ENV_VAR, &lookup, config.account_email.as_deref());
        let api_token = pick(TOKEN_ENV_VAR, &lookup, config.api_token.as_deref());

        Credentials {
            account_email: SecureString::new(account_email),
            api_token: SecureString::new(api_token),
        }
    }
}

fn pick<F>(var: &str, lookup: &F, fallback: Option<&str>) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(var).filter(|v| !v.is_empty()) {
        return value;
    }
    if let Some(value) = fallback.filter(|v| !v.is_empty()) {
        return value.to_string();
    }

    tracing::warn!(
        variable = var,
        "Missing credential: set {} or add it to the [credentials] section of the config file",
        var
    );
    String::new()
}
