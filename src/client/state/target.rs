use std::collections::VecDeque;

use interfaces::types::BlockLocation;
use serde::Deserialize;

use crate::client::dig_order::DigOrder;

/// Points of interest near the dig site. The dig loop only carries them.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct Landmarks {
    pub chest: Option<BlockLocation>,
    pub crafting_table: Option<BlockLocation>,
}

/// The state every behavior of a single excavation run reads and writes.
/// It is owned by the machine and lent to whichever state is active.
#[derive(Debug, Default)]
pub struct TargetContext {
    /// remaining work, front first
    pub dig_order: VecDeque<BlockLocation>,

    /// the block being approached or broken
    pub current_target: Option<BlockLocation>,

    /// where the agent stands to break [`Self::current_target`]
    pub interact_position: Option<BlockLocation>,

    pub chest_location: Option<BlockLocation>,
    pub crafting_table: Option<BlockLocation>,

    /// blocks broken successfully
    pub mined: usize,

    /// queued blocks that were already clear when reached
    pub skipped: usize,

    /// blocks the host could not break. They are not retried.
    pub failed: Vec<BlockLocation>,
}

impl TargetContext {
    pub fn new(order: DigOrder) -> Self {
        Self {
            dig_order: order.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_landmarks(mut self, landmarks: Landmarks) -> Self {
        self.chest_location = landmarks.chest;
        self.crafting_table = landmarks.crafting_table;
        self
    }

    pub fn peek(&self) -> Option<BlockLocation> {
        self.dig_order.front().copied()
    }

    pub fn pop(&mut self) -> Option<BlockLocation> {
        self.dig_order.pop_front()
    }

    pub fn has_work(&self) -> bool {
        !self.dig_order.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.dig_order.len()
    }
}
