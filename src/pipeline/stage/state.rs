//! State for one dependent-fetch stage.

use crate::api::ErrorKind;
use crate::mvi::MachineState;
use crate::pipeline::names::{DedupPolicy, NameList};
use crate::pipeline::status::LoadingStatus;

/// Dependency values a stage fetch is keyed on.
pub trait StageKey: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static {}

impl<T> StageKey for T where T: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static {}

/// A launched fetch, tagged with its generation and the dependencies
/// captured at launch.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt<K> {
    pub id: u64,
    pub key: K,
}

/// Where the stage is in its fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StagePhase {
    #[default]
    Pending,
    Loading,
    Loaded,
    Error(ErrorKind),
}

/// Stage state machine.
///
/// `names` survives `Loading`, `Error` and `Pending`: it is only replaced by
/// a successful completion of the current attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct StageState<K> {
    pub phase: StagePhase,
    pub names: NameList,
    /// The attempt whose completion will be accepted, if any.
    pub in_flight: Option<Attempt<K>>,
    /// Dependencies of the most recent trigger (`None` while unsatisfied).
    pub last_key: Option<K>,
    /// Monotonic attempt counter.
    pub generation: u64,
    pub policy: DedupPolicy,
}

impl<K> Default for StageState<K> {
    fn default() -> Self {
        Self {
            phase: StagePhase::Pending,
            names: NameList::default(),
            in_flight: None,
            last_key: None,
            generation: 0,
            policy: DedupPolicy::default(),
        }
    }
}

impl<K: StageKey> MachineState for StageState<K> {}

impl<K: StageKey> StageState<K> {
    pub fn with_policy(policy: DedupPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn status(&self) -> LoadingStatus {
        match self.phase {
            StagePhase::Pending => LoadingStatus::Pending,
            StagePhase::Loading => LoadingStatus::Loading,
            StagePhase::Loaded => LoadingStatus::Loaded,
            StagePhase::Error(_) => LoadingStatus::Error,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self.phase {
            StagePhase::Error(kind) => Some(kind),
            _ => None,
        }
    }

    /// Whether a completion for `(id, key)` would be accepted.
    pub fn is_current(&self, id: u64, key: &K) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|attempt| attempt.id == id && &attempt.key == key)
    }

    /// The attempt launched since `generation`, if the last dispatch started one.
    pub fn launched_since(&self, generation: u64) -> Option<&Attempt<K>> {
        if self.generation == generation {
            return None;
        }
        self.in_flight.as_ref()
    }
}
