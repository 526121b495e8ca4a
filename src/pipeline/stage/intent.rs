//! Intents for a geography stage.

use crate::api::ErrorKind;
use crate::mvi::Intent;

use super::state::StageKey;

#[derive(Debug, Clone)]
pub enum StageIntent<K> {
    /// The stage's dependencies were recomputed. `None` means the
    /// prerequisite is unsatisfied.
    DepsChanged(Option<K>),

    /// A fetch finished. Accepted only if `(attempt, key)` is still current.
    Completed {
        attempt: u64,
        key: K,
        result: Result<Vec<String>, ErrorKind>,
    },
}

impl<K: StageKey> Intent for StageIntent<K> {}
