use serde::Serialize;

/// Externally visible progress of one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingStatus {
    /// Prerequisite (token, or token and state) not yet satisfied.
    #[default]
    Pending,
    /// A request is in flight.
    Loading,
    /// The last completed request succeeded.
    Loaded,
    /// The last completed request failed.
    Error,
}

impl LoadingStatus {
    /// Loaded or Error: nothing more will happen until a dependency changes.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Loaded | Self::Error)
    }
}

impl std::fmt::Display for LoadingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LoadingStatus::Pending => "pending",
            LoadingStatus::Loading => "loading",
            LoadingStatus::Loaded => "loaded",
            LoadingStatus::Error => "error",
        };
        f.write_str(s)
    }
}
