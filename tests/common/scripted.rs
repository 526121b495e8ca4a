//! In-memory geography source with per-call gates for ordering tests.

#![allow(dead_code)]

use async_trait::async_trait;
use geoform::api::{FetchError, GeoSource, Resource};
use geoform::Credentials;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// What a scripted call answers with.
#[derive(Debug, Clone)]
pub enum Reply {
    Token(String),
    Names(Vec<String>),
    Status(u16),
    Shape(&'static str),
}

impl Reply {
    pub fn names(names: &[&str]) -> Self {
        Reply::Names(names.iter().map(|n| n.to_string()).collect())
    }

    pub fn token(token: &str) -> Self {
        Reply::Token(token.to_string())
    }
}

/// Call keys:
/// - `token:{email}:{api_token}`
/// - `states:{access_token}`
/// - `cities:{access_token}:{state}`
///
/// Unscripted calls answer 404.
#[derive(Default)]
pub struct ScriptedSource {
    replies: Mutex<HashMap<String, Reply>>,
    gates: Mutex<HashMap<String, Arc<Semaphore>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, key: &str, reply: Reply) {
        self.replies.lock().insert(key.to_string(), reply);
    }

    /// Block calls for `key` until [`release`](Self::release) is called.
    pub fn hold(&self, key: &str) {
        self.gates
            .lock()
            .insert(key.to_string(), Arc::new(Semaphore::new(0)));
    }

    pub fn release(&self, key: &str) {
        if let Some(gate) = self.gates.lock().get(key) {
            gate.add_permits(1);
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn count(&self, key: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.as_str() == key).count()
    }

    async fn answer(&self, key: String, resource: Resource) -> Result<Reply, FetchError> {
        self.calls.lock().push(key.clone());

        let gate = self.gates.lock().get(&key).cloned();
        if let Some(gate) = gate {
            gate.acquire().await.expect("gate closed").forget();
        }

        let reply = self
            .replies
            .lock()
            .get(&key)
            .cloned()
            .unwrap_or(Reply::Status(404));

        match reply {
            Reply::Status(status) => Err(FetchError::Response { resource, status }),
            Reply::Shape(message) => Err(FetchError::Shape(message.to_string())),
            other => Ok(other),
        }
    }
}

#[async_trait]
impl GeoSource for ScriptedSource {
    async fn access_token(&self, credentials: &Credentials) -> Result<String, FetchError> {
        let key = format!(
            "token:{}:{}",
            credentials.account_email.expose(),
            credentials.api_token.expose()
        );
        match self.answer(key, Resource::AccessToken).await? {
            Reply::Token(token) => Ok(token),
            _ => Err(FetchError::Shape("auth_token key is missing.".to_string())),
        }
    }

    async fn states(&self, access_token: &str) -> Result<Vec<String>, FetchError> {
        match self
            .answer(format!("states:{}", access_token), Resource::States)
            .await?
        {
            Reply::Names(names) => Ok(names),
            _ => Err(FetchError::Shape("expected state names".to_string())),
        }
    }

    async fn cities(&self, access_token: &str, state: &str) -> Result<Vec<String>, FetchError> {
        match self
            .answer(format!("cities:{}:{}", access_token, state), Resource::Cities)
            .await?
        {
            Reply::Names(names) => Ok(names),
            _ => Err(FetchError::Shape("expected city names".to_string())),
        }
    }
}
