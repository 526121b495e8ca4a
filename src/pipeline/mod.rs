//! Dependent-fetch pipeline: credentials → token → states, (token, state) → cities.
//!
//! [`Pipeline`] owns one token resolver and two geography stages. Inputs
//! (`set_credentials`, `select_state`) and fetch completions are turned into
//! intents and dispatched to the matching reducer; any attempt a reducer
//! starts is then spawned as a tokio task. Completions re-enter through the
//! same path, so a result whose attempt has been superseded is dropped by the
//! reducer instead of overwriting newer state.
//!
//! Consumers read [`PipelineSnapshot`]s, either on demand or through a
//! `tokio::sync::watch` subscription.

mod names;
mod snapshot;
pub mod stage;
mod status;
pub mod token;

pub use names::{DedupPolicy, NameList};
pub use snapshot::PipelineSnapshot;
pub use status::LoadingStatus;

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::watch;

use crate::api::{ClientError, FetchError, GeoClient, GeoSource};
use crate::config::{Config, Credentials, SecureString, StagesConfig};
use crate::mvi;

use stage::{Attempt, StageIntent, StageKey, StageReducer, StageState};
use token::{TokenAttempt, TokenIntent, TokenReducer, TokenState};

/// Dependencies of the states stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StatesKey {
    pub access_token: SecureString,
}

/// Dependencies of the cities stage.
#[derive(Debug, Clone, PartialEq)]
pub struct CitiesKey {
    pub access_token: SecureString,
    pub state: String,
}

/// Deduplication policy for each stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagePolicies {
    pub states: DedupPolicy,
    pub cities: DedupPolicy,
}

impl Default for StagePolicies {
    fn default() -> Self {
        Self {
            states: DedupPolicy::KeepAll,
            cities: DedupPolicy::FirstSeen,
        }
    }
}

impl From<&StagesConfig> for StagePolicies {
    fn from(config: &StagesConfig) -> Self {
        Self {
            states: DedupPolicy::from_flag(config.dedupe_states),
            cities: DedupPolicy::from_flag(config.dedupe_cities),
        }
    }
}

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($inner:expr, $field:ident, $reducer:ty, $intent:expr) => {
        mvi::dispatch::<$reducer>(&mut $inner.$field, $intent)
    };
}

/// A fetch a reducer has started and the orchestrator must run.
enum Launch {
    Token(TokenAttempt),
    States(Attempt<StatesKey>),
    Cities(Attempt<CitiesKey>),
}

struct Inner {
    selected_state: String,
    token: TokenState,
    states: StageState<StatesKey>,
    cities: StageState<CitiesKey>,
}

impl Inner {
    /// Recompute both stage keys from the current token and selection.
    ///
    /// The reducers ignore a key equal to the last one, so only real
    /// dependency changes start a fetch.
    fn refresh_stages(&mut self) -> Vec<Launch> {
        let mut launches = Vec::new();
        let token = self.token.access_token.clone();

        let states_key = (!token.is_empty()).then(|| StatesKey {
            access_token: token.clone(),
        });
        let before = self.states.generation;
        dispatch_mvi!(
            self,
            states,
            StageReducer<StatesKey>,
            StageIntent::DepsChanged(states_key)
        );
        if let Some(attempt) = self.states.launched_since(before) {
            launches.push(Launch::States(attempt.clone()));
        }

        let cities_key = (!token.is_empty() && !self.selected_state.is_empty()).then(|| {
            CitiesKey {
                access_token: token,
                state: self.selected_state.clone(),
            }
        });
        let before = self.cities.generation;
        dispatch_mvi!(
            self,
            cities,
            StageReducer<CitiesKey>,
            StageIntent::DepsChanged(cities_key)
        );
        if let Some(attempt) = self.cities.launched_since(before) {
            launches.push(Launch::Cities(attempt.clone()));
        }

        launches
    }

    fn snapshot(&self) -> PipelineSnapshot {
        PipelineSnapshot {
            states: self.states.names.clone(),
            states_status: self.states.status(),
            states_error: self.states.error_kind(),
            cities: self.cities.names.clone(),
            cities_status: self.cities.status(),
            cities_error: self.cities.error_kind(),
            has_access_token: self.token.has_token(),
        }
    }
}

struct Shared {
    source: Arc<dyn GeoSource>,
    inner: Mutex<Inner>,
    snapshot_tx: watch::Sender<PipelineSnapshot>,
    closed: AtomicBool,
}

impl Shared {
    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Mutate state under the lock, publish the new snapshot, then spawn
    /// whatever fetches the mutation started. No-op once closed.
    fn update<F>(self: &Arc<Self>, f: F)
    where
        F: FnOnce(&mut Inner) -> Vec<Launch>,
    {
        if self.is_closed() {
            return;
        }

        let launches = {
            let mut inner = self.inner.lock();
            let launches = f(&mut inner);

            // Published under the lock: snapshot order follows mutation order
            let snapshot = inner.snapshot();
            self.snapshot_tx.send_if_modified(|current| {
                if *current == snapshot {
                    return false;
                }
                *current = snapshot;
                true
            });
            launches
        };

        for launch in launches {
            self.spawn(launch);
        }
    }

    fn spawn(self: &Arc<Self>, launch: Launch) {
        let shared = Arc::downgrade(self);
        let source = Arc::clone(&self.source);

        tokio::spawn(async move {
            match launch {
                Launch::Token(attempt) => {
                    tracing::debug!(attempt = attempt.id, "Requesting access token");
                    let result = source.access_token(&attempt.credentials).await;
                    finish_token(shared, attempt.id, result);
                }
                Launch::States(attempt) => {
                    tracing::debug!(attempt = attempt.id, "Requesting states");
                    let result = source.states(attempt.key.access_token.expose()).await;
                    finish(shared, attempt, result, |inner| &mut inner.states);
                }
                Launch::Cities(attempt) => {
                    tracing::debug!(
                        attempt = attempt.id,
                        state = %attempt.key.state,
                        "Requesting cities"
                    );
                    let result = source
                        .cities(attempt.key.access_token.expose(), &attempt.key.state)
                        .await;
                    finish(shared, attempt, result, |inner| &mut inner.cities);
                }
            }
        });
    }
}

fn finish_token(shared: Weak<Shared>, attempt: u64, result: Result<String, FetchError>) {
    let Some(shared) = shared.upgrade() else {
        return;
    };

    shared.update(|inner| {
        let current = inner.token.is_current(attempt);
        let intent = match result {
            Ok(access_token) => {
                if current {
                    tracing::info!(attempt, "Access token resolved");
                }
                TokenIntent::Resolved {
                    attempt,
                    access_token,
                }
            }
            Err(err) => {
                if current {
                    tracing::error!(attempt, error = %err, "Failed to resolve access token");
                }
                TokenIntent::Failed { attempt }
            }
        };
        if !current {
            tracing::debug!(attempt, "Discarding superseded access token result");
        }

        dispatch_mvi!(inner, token, TokenReducer, intent);
        inner.refresh_stages()
    });
}

fn finish<K, F>(
    shared: Weak<Shared>,
    attempt: Attempt<K>,
    result: Result<Vec<String>, FetchError>,
    stage: F,
) where
    K: StageKey,
    F: FnOnce(&mut Inner) -> &mut StageState<K>,
{
    let Some(shared) = shared.upgrade() else {
        return;
    };

    shared.update(|inner| {
        let stage = stage(inner);
        if !stage.is_current(attempt.id, &attempt.key) {
            tracing::debug!(attempt = attempt.id, key = ?attempt.key, "Discarding superseded result");
            return Vec::new();
        }

        let result = match result {
            Ok(names) => {
                tracing::info!(attempt = attempt.id, count = names.len(), "Stage loaded");
                Ok(names)
            }
            Err(err) => {
                tracing::error!(attempt = attempt.id, error = %err, "Stage fetch failed");
                Err(err.kind())
            }
        };

        mvi::dispatch::<StageReducer<K>>(
            stage,
            StageIntent::Completed {
                attempt: attempt.id,
                key: attempt.key,
                result,
            },
        );
        Vec::new()
    });
}

/// The orchestrator handed to the consuming form.
///
/// Must be used from within a tokio runtime: inputs may spawn fetch tasks.
/// Dropping the pipeline (or calling [`Pipeline::close`]) turns every
/// pending completion into a no-op.
pub struct Pipeline {
    shared: Arc<Shared>,
}

impl Pipeline {
    pub fn new(source: Arc<dyn GeoSource>, policies: StagePolicies) -> Self {
        let inner = Inner {
            selected_state: String::new(),
            token: TokenState::default(),
            states: StageState::with_policy(policies.states),
            cities: StageState::with_policy(policies.cities),
        };
        let (snapshot_tx, _) = watch::channel(inner.snapshot());

        Self {
            shared: Arc::new(Shared {
                source,
                inner: Mutex::new(inner),
                snapshot_tx,
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Build a pipeline talking to the configured geography API.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let client = GeoClient::new(&config.api)?;
        Ok(Self::new(
            Arc::new(client),
            StagePolicies::from(&config.stages),
        ))
    }

    /// Feed the credential pair. Incomplete credentials leave the pipeline inert.
    pub fn set_credentials(&self, credentials: Credentials) {
        if !credentials.is_complete() {
            tracing::debug!("Credentials incomplete, access token request skipped");
        }

        self.shared.update(|inner| {
            let before = inner.token.generation;
            dispatch_mvi!(
                inner,
                token,
                TokenReducer,
                TokenIntent::CredentialsChanged(credentials)
            );
            inner
                .token
                .launched_since(before)
                .cloned()
                .map(Launch::Token)
                .into_iter()
                .collect()
        });
    }

    /// Select a state for the cities stage. An empty string clears the selection.
    pub fn select_state(&self, state: impl Into<String>) {
        let state = state.into();
        self.shared.update(|inner| {
            inner.selected_state = state;
            inner.refresh_stages()
        });
    }

    pub fn selected_state(&self) -> String {
        self.shared.inner.lock().selected_state.clone()
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> PipelineSnapshot {
        self.shared.snapshot_tx.borrow().clone()
    }

    /// Receive every snapshot change.
    pub fn subscribe(&self) -> watch::Receiver<PipelineSnapshot> {
        self.shared.snapshot_tx.subscribe()
    }

    /// Stop accepting inputs and completions.
    pub fn close(&self) {
        if !self.shared.closed.swap(true, Ordering::SeqCst) {
            tracing::debug!("Pipeline closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.shared.is_closed()
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        self.close();
    }
}
