// Copyright (c) 2021 Andrew Gazelka - All Rights Reserved.
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! The excavation state machine.
//!
//! Each state is a small struct doing one unit of work when it is entered.
//! Long running work (walking, breaking) is handed to the [`Agent`] and
//! polled through [`BehaviorTrait::is_finished`] on later ticks. The order
//! the states run in lives in [`machine::DIG_TRANSITIONS`].

use interfaces::Agent;

use crate::client::state::target::TargetContext;

pub use find_interact::FindInteractPosition;
pub use idle::{Entry, Exit};
pub use machine::{DigMachine, StateMachine};
pub use mine_block::MineBlock;
pub use mine_select::MineSelect;
pub use move_to::MoveTo;
pub use select_block::SelectBlock;

pub mod find_interact;
pub mod idle;
pub mod machine;
pub mod mine_block;
pub mod mine_select;
pub mod move_to;
pub mod select_block;
pub mod transitions;

#[enum_dispatch]
pub trait BehaviorTrait {
    /// Called once when the state becomes active
    fn on_enter(&mut self, _ctx: &mut TargetContext, _agent: &mut impl Agent) {}

    /// Polled every tick while the state is active
    fn is_finished(&self, _ctx: &TargetContext, _agent: &impl Agent) -> bool {
        true
    }

    /// Called once right before another state becomes active
    fn on_exit(&mut self, _ctx: &mut TargetContext, _agent: &impl Agent) {}
}

/// Names the states so transitions can refer to them
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum StateKind {
    Entry,
    SelectBlock,
    FindInteractPosition,
    MoveTo,
    MineSelect,
    MineBlock,
    Exit,
}

#[enum_dispatch(BehaviorTrait)]
#[derive(Debug)]
pub enum Behavior {
    Entry,
    SelectBlock,
    FindInteractPosition,
    MoveTo,
    MineSelect,
    MineBlock,
    Exit,
}

impl From<StateKind> for Behavior {
    fn from(kind: StateKind) -> Self {
        match kind {
            StateKind::Entry => Self::Entry(Entry),
            StateKind::SelectBlock => Self::SelectBlock(SelectBlock),
            StateKind::FindInteractPosition => Self::FindInteractPosition(FindInteractPosition),
            StateKind::MoveTo => Self::MoveTo(MoveTo::default()),
            StateKind::MineSelect => Self::MineSelect(MineSelect),
            StateKind::MineBlock => Self::MineBlock(MineBlock::default()),
            StateKind::Exit => Self::Exit(Exit),
        }
    }
}

impl Behavior {
    pub const fn kind(&self) -> StateKind {
        match self {
            Self::Entry(_) => StateKind::Entry,
            Self::SelectBlock(_) => StateKind::SelectBlock,
            Self::FindInteractPosition(_) => StateKind::FindInteractPosition,
            Self::MoveTo(_) => StateKind::MoveTo,
            Self::MineSelect(_) => StateKind::MineSelect,
            Self::MineBlock(_) => StateKind::MineBlock,
            Self::Exit(_) => StateKind::Exit,
        }
    }
}

#[cfg(test)]
mod tests {
    use interfaces::types::BlockLocation;

    use crate::{
        client::{
            behavior::{Behavior, BehaviorTrait, StateKind},
            sim::SimAgent,
            state::target::TargetContext,
        },
        storage::blocks::WorldBlocks,
    };

    #[test]
    fn every_kind_builds_its_state() {
        use StateKind::*;

        let agent = SimAgent::new(WorldBlocks::default(), BlockLocation::default());
        let ctx = TargetContext::default();

        for kind in [
            Entry,
            SelectBlock,
            FindInteractPosition,
            MoveTo,
            MineSelect,
            MineBlock,
            Exit,
        ] {
            let behavior = Behavior::from(kind);
            assert_eq!(behavior.kind(), kind);
            // nothing was requested, so every fresh state is done
            assert!(behavior.is_finished(&ctx, &agent), "{kind:?}");
        }
    }

    #[test]
    fn dispatches_to_the_active_state() {
        let target = BlockLocation::new(2, 0, 0);
        let mut agent = SimAgent::new(WorldBlocks::default(), BlockLocation::default());
        let mut ctx = TargetContext::new(vec![target]);

        let mut select = Behavior::from(StateKind::MineSelect);
        select.on_enter(&mut ctx, &mut agent);
        assert_eq!(ctx.current_target, Some(target));
        assert!(!ctx.has_work());

        let mut exit = Behavior::from(StateKind::Exit);
        exit.on_enter(&mut ctx, &mut agent);
        exit.on_exit(&mut ctx, &agent);
        assert_eq!(ctx.current_target, Some(target));
        assert_eq!(agent.move_calls(), 0);
    }
}
