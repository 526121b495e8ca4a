//! Model-View-Intent primitives shared by the pipeline state machines.
//!
//! Every piece of pipeline state (the token resolver, each geography stage)
//! is advanced the same way:
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ Snapshot
//!    ↑                               │
//!    └──── task completion ──────────┘
//! ```
//!
//! - **State**: owned, cloneable value describing one machine
//! - **Intent**: a dependency change or a fetch completion
//! - **Reducer**: pure function `(State, Intent) -> State`
//!
//! Side effects (spawning fetches, logging) live in the orchestrator around
//! each dispatch, never inside a reducer.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::{dispatch, Reducer};
pub use state::MachineState;
