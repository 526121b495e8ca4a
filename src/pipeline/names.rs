//! Ordered name lists produced by the geography stages.

use indexmap::IndexSet;
use serde::Serialize;

/// How a stage treats repeated names in an upstream response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupPolicy {
    /// Pass every name through unmodified.
    #[default]
    KeepAll,
    /// Collapse repeats by exact string equality, keeping first-seen order.
    FirstSeen,
}

impl DedupPolicy {
    pub fn from_flag(dedupe: bool) -> Self {
        if dedupe {
            DedupPolicy::FirstSeen
        } else {
            DedupPolicy::KeepAll
        }
    }
}

/// Display names in upstream order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NameList(Vec<String>);

impl NameList {
    /// Build a list from raw upstream names under the given policy.
    pub fn collect(names: Vec<String>, policy: DedupPolicy) -> Self {
        match policy {
            DedupPolicy::KeepAll => Self(names),
            DedupPolicy::FirstSeen => {
                let unique: IndexSet<String> = names.into_iter().collect();
                Self(unique.into_iter().collect())
            }
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }
}

impl From<NameList> for Vec<String> {
    fn from(list: NameList) -> Self {
        list.0
    }
}
