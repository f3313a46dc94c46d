//! The contracts between a digging behavior and whatever host runs the agent.
//!
//! A host owns the world connection, pathfinding and the break animation. The
//! behaviors only issue requests through these traits and poll for progress
//! once per tick.

use crate::types::{BlockKind, BlockLocation};

pub mod types;

/// How far along a long-running request is
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Progress {
    InProgress,
    Succeeded,
    Failed,
}

impl Progress {
    /// Finished either way
    pub const fn is_finished(self) -> bool {
        !matches!(self, Progress::InProgress)
    }
}

/// Read access to the world
pub trait WorldQuery {
    fn block_kind_at(&self, location: BlockLocation) -> BlockKind;
}

/// Moving the agent around. Only one move is in flight at a time; a new
/// [`Movement::move_to`] replaces the previous one.
pub trait Movement {
    fn move_to(&mut self, goal: BlockLocation);

    fn progress(&self) -> Progress;

    fn is_finished(&self) -> bool {
        self.progress().is_finished()
    }
}

/// Breaking blocks. Only one break is in flight at a time.
pub trait Mining {
    fn mine(&mut self, location: BlockLocation);

    fn progress(&self) -> Progress;

    fn is_finished(&self) -> bool {
        self.progress().is_finished()
    }
}

/// Finds a standable location from which `target` can be reached
pub trait InteractFinder {
    fn find_interact_position(&self, target: BlockLocation) -> BlockLocation;
}

/// Everything a digging behavior needs from its host
pub trait Agent: WorldQuery + Movement + Mining + InteractFinder {}

impl<T: WorldQuery + Movement + Mining + InteractFinder> Agent for T {}

#[cfg(test)]
mod tests {
    use crate::Progress;

    #[test]
    fn finished() {
        assert!(!Progress::InProgress.is_finished());
        assert!(Progress::Succeeded.is_finished());
        assert!(Progress::Failed.is_finished());
    }
}
