use crate::config::Credentials;
use crate::mvi::Intent;

#[derive(Debug, Clone)]
pub enum TokenIntent {
    /// Credential source produced a (possibly incomplete) pair.
    CredentialsChanged(Credentials),
    /// Exchange succeeded.
    Resolved { attempt: u64, access_token: String },
    /// Exchange failed; already logged by the caller.
    Failed { attempt: u64 },
}

impl Intent for TokenIntent {}
