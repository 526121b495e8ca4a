mod credentials;
mod loader;
mod types;

pub use credentials::{
    CredentialSource, Credentials, SecureString, EMAIL_ENV_VAR, TOKEN_ENV_VAR,
};
pub use loader::ConfigError;
pub use types::{
    ApiConfig, Config, CredentialsConfig, StagesConfig, DEFAULT_BASE_URL, DEFAULT_COUNTRY,
};
