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
use interfaces::{types::BlockLocation, Agent, Mining, Progress};
use tracing::{debug, warn};

use crate::client::{behavior::BehaviorTrait, state::target::TargetContext};

/// Breaks the current target and waits for the host to confirm it
#[derive(Debug, Default, Clone, Copy)]
pub struct MineBlock {
    target: Option<BlockLocation>,
}

impl BehaviorTrait for MineBlock {
    fn on_enter(&mut self, ctx: &mut TargetContext, agent: &mut impl Agent) {
        self.target = ctx.current_target;

        if let Some(target) = self.target {
            debug!(block = %target, "mining");
            agent.mine(target);
        }
    }

    fn is_finished(&self, _ctx: &TargetContext, agent: &impl Agent) -> bool {
        self.target.is_none() || Mining::is_finished(agent)
    }

    fn on_exit(&mut self, ctx: &mut TargetContext, agent: &impl Agent) {
        let Some(target) = self.target else {
            return;
        };

        match Mining::progress(agent) {
            Progress::Succeeded => ctx.mined += 1,
            Progress::Failed => {
                warn!(block = %target, "could not mine block, skipping it");
                ctx.failed.push(target);
            }
            Progress::InProgress => {}
        }
    }
}
