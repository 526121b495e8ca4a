//! State for the token resolver.

use crate::config::{Credentials, SecureString};
use crate::mvi::MachineState;

/// A launched token exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenAttempt {
    pub id: u64,
    pub credentials: Credentials,
}

/// Token resolver state.
///
/// There is no failure phase: a failed exchange simply leaves
/// `access_token` as it was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenState {
    /// Empty until the first successful exchange.
    pub access_token: SecureString,
    /// Credentials of the last exchange issued. Identical credentials do not
    /// trigger another request.
    pub requested: Option<Credentials>,
    pub in_flight: Option<TokenAttempt>,
    pub generation: u64,
}

impl MachineState for TokenState {}

impl TokenState {
    pub fn has_token(&self) -> bool {
        !self.access_token.is_empty()
    }

    pub fn is_current(&self, id: u64) -> bool {
        self.in_flight.as_ref().is_some_and(|attempt| attempt.id == id)
    }

    /// The exchange launched since `generation`, if the last dispatch started one.
    pub fn launched_since(&self, generation: u64) -> Option<&TokenAttempt> {
        if self.generation == generation {
            return None;
        }
        self.in_flight.as_ref()
    }
}
