//! An in-memory host. It stands in for a real game connection: moves and
//! breaks take a fixed number of ticks and then apply to a [`WorldBlocks`].

use std::collections::HashMap;

use interfaces::{
    types::{BlockKind, BlockLocation, BlockState, Volume},
    InteractFinder, Mining, Movement, Progress, WorldQuery,
};
use tracing::trace;

use crate::storage::blocks::WorldBlocks;

#[derive(Debug, Copy, Clone)]
struct Pending {
    target: BlockLocation,
    ticks_left: u32,
}

impl Pending {
    /// Count down one tick. Returns the target once it is done.
    fn advance(slot: &mut Option<Self>) -> Option<BlockLocation> {
        let pending = slot.as_mut()?;
        pending.ticks_left = pending.ticks_left.saturating_sub(1);
        if pending.ticks_left == 0 {
            slot.take().map(|pending| pending.target)
        } else {
            None
        }
    }
}

#[derive(Debug)]
pub struct SimAgent {
    world: WorldBlocks,
    location: BlockLocation,

    move_ticks: u32,
    mine_ticks: u32,

    movement: Option<Pending>,
    mining: Option<Pending>,
    move_progress: Progress,
    mine_progress: Progress,

    move_calls: usize,
    mine_calls: HashMap<BlockLocation, usize>,
}

impl SimAgent {
    pub const DEFAULT_MOVE_TICKS: u32 = 2;
    pub const DEFAULT_MINE_TICKS: u32 = 3;

    pub fn new(world: WorldBlocks, location: BlockLocation) -> Self {
        Self {
            world,
            location,
            move_ticks: Self::DEFAULT_MOVE_TICKS,
            mine_ticks: Self::DEFAULT_MINE_TICKS,
            movement: None,
            mining: None,
            move_progress: Progress::Succeeded,
            mine_progress: Progress::Succeeded,
            move_calls: 0,
            mine_calls: HashMap::new(),
        }
    }

    /// How many ticks a move and a break take. 0 completes on request.
    #[must_use]
    pub fn with_timing(mut self, move_ticks: u32, mine_ticks: u32) -> Self {
        self.move_ticks = move_ticks;
        self.mine_ticks = mine_ticks;
        self
    }

    /// Advance the world by one game tick
    pub fn update(&mut self) {
        if let Some(goal) = Pending::advance(&mut self.movement) {
            self.arrive(goal);
        }

        if let Some(target) = Pending::advance(&mut self.mining) {
            self.break_block(target);
        }
    }

    fn arrive(&mut self, goal: BlockLocation) {
        trace!(%goal, "arrived");
        self.location = goal;
        self.move_progress = Progress::Succeeded;
    }

    fn break_block(&mut self, target: BlockLocation) {
        self.world.set_block(target, BlockState::AIR);
        self.mine_progress = Progress::Succeeded;
    }

    pub const fn location(&self) -> BlockLocation {
        self.location
    }

    pub const fn world(&self) -> &WorldBlocks {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut WorldBlocks {
        &mut self.world
    }

    pub const fn move_calls(&self) -> usize {
        self.move_calls
    }

    #[cfg(test)]
    pub fn mine_calls(&self, location: BlockLocation) -> usize {
        self.mine_calls.get(&location).copied().unwrap_or_default()
    }

    pub fn total_mine_calls(&self) -> usize {
        self.mine_calls.values().sum()
    }
}

impl WorldQuery for SimAgent {
    fn block_kind_at(&self, location: BlockLocation) -> BlockKind {
        self.world.get_block_kind(location)
    }
}

impl Movement for SimAgent {
    fn move_to(&mut self, goal: BlockLocation) {
        self.move_calls += 1;

        if !self.world.standable(goal) {
            self.movement = None;
            self.move_progress = Progress::Failed;
            return;
        }

        if self.move_ticks == 0 {
            self.movement = None;
            self.arrive(goal);
            return;
        }

        self.movement = Some(Pending {
            target: goal,
            ticks_left: self.move_ticks,
        });
        self.move_progress = Progress::InProgress;
    }

    fn progress(&self) -> Progress {
        self.move_progress
    }
}

impl Mining for SimAgent {
    fn mine(&mut self, location: BlockLocation) {
        *self.mine_calls.entry(location).or_default() += 1;

        if self.world.get_block_or_air(location).unbreakable() {
            self.mining = None;
            self.mine_progress = Progress::Failed;
            return;
        }

        if self.mine_ticks == 0 {
            self.mining = None;
            self.break_block(location);
            return;
        }

        self.mining = Some(Pending {
            target: location,
            ticks_left: self.mine_ticks,
        });
        self.mine_progress = Progress::InProgress;
    }

    fn progress(&self) -> Progress {
        self.mine_progress
    }
}

impl InteractFinder for SimAgent {
    /// The first horizontal neighbour the agent fits in, else the block above
    /// the target (whether or not the agent fits there)
    fn find_interact_position(&self, target: BlockLocation) -> BlockLocation {
        target
            .horizontal_neighbors()
            .into_iter()
            .chain(std::iter::once(target.above()))
            .find(|&loc| self.world.standable(loc))
            .unwrap_or_else(|| target.above())
    }
}

/// A world where the whole excavation, staircase columns included, is stone
pub fn quarry(volume: &Volume) -> WorldBlocks {
    let Volume {
        anchor,
        width,
        height,
        depth,
    } = *volume;

    let mut world = WorldBlocks::default();
    world.fill(
        anchor + BlockLocation::new(0, 1 - height, 0),
        anchor + BlockLocation::new(width + 1, 0, depth - 1),
        BlockState::STONE,
    );
    world
}

#[cfg(test)]
mod tests {
    use interfaces::{
        types::{BlockKind, BlockLocation, BlockState, Volume},
        InteractFinder, Mining, Movement, Progress, WorldQuery,
    };

    use crate::{
        client::sim::{quarry, SimAgent},
        storage::blocks::WorldBlocks,
    };

    #[test]
    fn quarry_is_solid() {
        let volume = Volume::new(BlockLocation::new(0, 10, 0), 2, 3, 2);
        let world = quarry(&volume);

        // footprint plus the two staircase columns
        assert_eq!(world.solid_blocks().count(), 4 * 3 * 2);
        assert_eq!(world.get_block(BlockLocation::new(3, 8, 1)), Some(BlockState::STONE));
        assert_eq!(world.get_block(BlockLocation::new(0, 7, 0)), None);
    }

    #[test]
    fn mining_takes_ticks() {
        let target = BlockLocation::new(0, 0, 0);
        let mut world = WorldBlocks::default();
        world.set_block(target, BlockState::STONE);

        let mut agent = SimAgent::new(world, BlockLocation::new(0, 1, 0)).with_timing(0, 2);
        agent.mine(target);
        assert_eq!(Mining::progress(&agent), Progress::InProgress);

        agent.update();
        assert_eq!(Mining::progress(&agent), Progress::InProgress);
        assert_eq!(agent.block_kind_at(target), BlockKind::Other);

        agent.update();
        assert_eq!(Mining::progress(&agent), Progress::Succeeded);
        assert_eq!(agent.block_kind_at(target), BlockKind::Air);
        assert_eq!(agent.mine_calls(target), 1);
    }

    #[test]
    fn bedrock_fails() {
        let target = BlockLocation::new(0, 0, 0);
        let mut world = WorldBlocks::default();
        world.set_block(target, BlockState::BEDROCK);

        let mut agent = SimAgent::new(world, BlockLocation::new(0, 1, 0));
        agent.mine(target);
        assert_eq!(Mining::progress(&agent), Progress::Failed);
        assert!(Mining::is_finished(&agent));
    }

    #[test]
    fn move_into_wall_fails() {
        let wall = BlockLocation::new(1, 0, 0);
        let mut world = WorldBlocks::default();
        world.set_block(wall, BlockState::STONE);

        let mut agent = SimAgent::new(world, BlockLocation::new(0, 0, 0)).with_timing(1, 1);
        agent.move_to(wall);
        assert_eq!(Movement::progress(&agent), Progress::Failed);
        assert_eq!(agent.location(), BlockLocation::new(0, 0, 0));

        agent.move_to(BlockLocation::new(-1, 0, 0));
        assert!(!Movement::is_finished(&agent));
        agent.update();
        assert_eq!(Movement::progress(&agent), Progress::Succeeded);
        assert_eq!(agent.location(), BlockLocation::new(-1, 0, 0));
        assert_eq!(agent.move_calls(), 2);
    }

    #[test]
    fn interact_position() {
        let target = BlockLocation::new(0, 0, 0);
        let mut world = WorldBlocks::default();
        world.fill(
            BlockLocation::new(-1, -1, -1),
            BlockLocation::new(1, 1, 1),
            BlockState::STONE,
        );

        let agent = SimAgent::new(world.clone(), BlockLocation::default());
        // boxed in: fall back to standing on top
        assert_eq!(agent.find_interact_position(target), target.above());

        world.set_block(BlockLocation::new(0, 0, -1), BlockState::AIR);
        world.set_block(BlockLocation::new(0, 1, -1), BlockState::AIR);
        let agent = SimAgent::new(world, BlockLocation::default());
        assert_eq!(
            agent.find_interact_position(target),
            BlockLocation::new(0, 0, -1)
        );
    }
}
