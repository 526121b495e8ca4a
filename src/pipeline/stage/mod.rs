//! Geography stage feature module.
//!
//! One dependent fetch (states or cities) as a state machine:
//! - `state.rs` - Phase, retained names, current attempt
//! - `intent.rs` - Dependency changes and fetch completions
//! - `reducer.rs` - Transitions, including stale-attempt discard

mod intent;
mod reducer;
mod state;

pub use intent::StageIntent;
pub use reducer::StageReducer;
pub use state::{Attempt, StageKey, StagePhase, StageState};
