//! Status - Publisher のスロット集計

use serde::{Deserialize, Serialize};

/// Point-in-time slot counts of a `Publisher`.
///
/// `expired` slots stay until they are pruned or unsubscribed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCounts {
    pub alive: usize,
    pub expired: usize,
}

impl SlotCounts {
    pub fn total(&self) -> usize {
        self.alive + self.expired
    }
}
