//! Geography form controller.
//!
//! Resolves credentials → access token → states → cities for a selected
//! state, tracking a loading status per stage and discarding results of
//! superseded fetches. See [`pipeline::Pipeline`] for the entry point.

pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod mvi;
pub mod pipeline;

pub use api::{ErrorKind, FetchError, GeoClient, GeoSource};
pub use config::{Config, CredentialSource, Credentials};
pub use pipeline::{LoadingStatus, NameList, Pipeline, PipelineSnapshot, StagePolicies};
