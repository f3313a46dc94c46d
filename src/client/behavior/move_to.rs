use interfaces::{types::BlockLocation, Agent, Movement, Progress};
use tracing::{trace, warn};

use crate::client::{behavior::BehaviorTrait, state::target::TargetContext};

/// Walks to the interact position.
///
/// A failed move counts as finished. The machine carries on and lets the
/// break attempt fail instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct MoveTo {
    goal: Option<BlockLocation>,
}

impl BehaviorTrait for MoveTo {
    fn on_enter(&mut self, ctx: &mut TargetContext, agent: &mut impl Agent) {
        self.goal = ctx.interact_position;

        if let Some(goal) = self.goal {
            trace!(%goal, "moving");
            agent.move_to(goal);
        }
    }

    fn is_finished(&self, _ctx: &TargetContext, agent: &impl Agent) -> bool {
        self.goal.is_none() || Movement::is_finished(agent)
    }

    fn on_exit(&mut self, _ctx: &mut TargetContext, agent: &impl Agent) {
        if let Some(goal) = self.goal {
            if Movement::progress(agent) == Progress::Failed {
                warn!(%goal, "could not reach interact position");
            }
        }
    }
}
