//! PublisherConfig - Publisher の設定

use serde::{Deserialize, Serialize};

/// Settings for a `Publisher`.
///
/// Missing fields fall back to [`PublisherConfig::default`] when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublisherConfig {
    /// Shows up in log records.
    pub name: String,

    /// Drop expired slots at the end of every `emit`.
    ///
    /// Off by default: removing slots is otherwise an explicit action.
    pub prune_expired_on_emit: bool,
}

impl PublisherConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            name: "publisher".to_string(),
            prune_expired_on_emit: false,
        }
    }
}
