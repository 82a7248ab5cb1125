//! Relay liveness.

use serde::{Deserialize, Serialize};

/// Observable state of a relay's target.
///
/// State transitions:
/// - Alive -> Expired (once the last strong owner of the target is dropped)
///
/// There is no way back from `Expired`, and no teardown state: the relay object
/// lives on until its publisher removes the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelayState {
    /// The target can still be resolved (or there is no target at all).
    Alive,

    /// The target has been reclaimed. Dispatch is a no-op.
    Expired,
}

impl RelayState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RelayState::Expired)
    }
}
