use serde::Serialize;

use crate::api::ErrorKind;

use super::names::NameList;
use super::status::LoadingStatus;

/// Everything the consuming form renders, published after every change.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineSnapshot {
    pub states: NameList,
    pub states_status: LoadingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub states_error: Option<ErrorKind>,
    pub cities: NameList,
    pub cities_status: LoadingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cities_error: Option<ErrorKind>,
    /// Whether an access token has been obtained. The token itself is never exposed.
    pub has_access_token: bool,
}
