use interfaces::Agent;
use tracing::trace;

use crate::client::{behavior::BehaviorTrait, state::target::TargetContext};

/// Asks the host where to stand to reach the current target
#[derive(Debug, Default, Clone, Copy)]
pub struct FindInteractPosition;

impl BehaviorTrait for FindInteractPosition {
    fn on_enter(&mut self, ctx: &mut TargetContext, agent: &mut impl Agent) {
        ctx.interact_position = ctx
            .current_target
            .map(|target| agent.find_interact_position(target));

        trace!(position = ?ctx.interact_position, "interact position");
    }
}
