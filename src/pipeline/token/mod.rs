//! Token resolver feature module.
//!
//! Exchanges credentials for an access token:
//! - `state.rs` - Current token, last requested credentials, attempt
//! - `intent.rs` - Credential changes and exchange outcomes
//! - `reducer.rs` - Transitions with memoized triggering

mod intent;
mod reducer;
mod state;

pub use intent::TokenIntent;
pub use reducer::TokenReducer;
pub use state::{TokenAttempt, TokenState};
