//! Reducer for a geography stage.

use std::marker::PhantomData;

use crate::mvi::Reducer;
use crate::pipeline::names::NameList;

use super::intent::StageIntent;
use super::state::{Attempt, StageKey, StagePhase, StageState};

/// Pure transitions for [`StageState`].
///
/// Launching the fetch for a new attempt is the caller's job: after a
/// dispatch it checks [`StageState::launched_since`].
pub struct StageReducer<K>(PhantomData<K>);

impl<K: StageKey> Reducer for StageReducer<K> {
    type State = StageState<K>;
    type Intent = StageIntent<K>;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            StageIntent::DepsChanged(None) => StageState {
                phase: StagePhase::Pending,
                in_flight: None,
                last_key: None,
                ..state
            },

            StageIntent::DepsChanged(Some(key)) => {
                if state.last_key.as_ref() == Some(&key) {
                    return state;
                }
                let id = state.generation + 1;
                StageState {
                    phase: StagePhase::Loading,
                    in_flight: Some(Attempt {
                        id,
                        key: key.clone(),
                    }),
                    last_key: Some(key),
                    generation: id,
                    ..state
                }
            }

            StageIntent::Completed {
                attempt,
                key,
                result,
            } => {
                if !state.is_current(attempt, &key) {
                    // Superseded attempt
                    return state;
                }
                match result {
                    Ok(names) => StageState {
                        phase: StagePhase::Loaded,
                        names: NameList::collect(names, state.policy),
                        in_flight: None,
                        ..state
                    },
                    Err(kind) => StageState {
                        phase: StagePhase::Error(kind),
                        in_flight: None,
                        ..state
                    },
                }
            }
        }
    }
}
