use crate::config::SecureString;
use crate::mvi::Reducer;

use super::intent::TokenIntent;
use super::state::{TokenAttempt, TokenState};

pub struct TokenReducer;

impl Reducer for TokenReducer {
    type State = TokenState;
    type Intent = TokenIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            TokenIntent::CredentialsChanged(credentials) => {
                if !credentials.is_complete() {
                    // Inert: keep the token, forget whatever was in flight
                    return TokenState {
                        requested: None,
                        in_flight: None,
                        ..state
                    };
                }
                if state.requested.as_ref() == Some(&credentials) {
                    return state;
                }
                let id = state.generation + 1;
                TokenState {
                    requested: Some(credentials.clone()),
                    in_flight: Some(TokenAttempt { id, credentials }),
                    generation: id,
                    ..state
                }
            }

            TokenIntent::Resolved {
                attempt,
                access_token,
            } => {
                if !state.is_current(attempt) {
                    return state;
                }
                if access_token.is_empty() {
                    return TokenState {
                        in_flight: None,
                        ..state
                    };
                }
                TokenState {
                    access_token: SecureString::new(access_token),
                    in_flight: None,
                    ..state
                }
            }

            TokenIntent::Failed { attempt } => {
                if !state.is_current(attempt) {
                    return state;
                }
                TokenState {
                    in_flight: None,
                    ..state
                }
            }
        }
    }
}
