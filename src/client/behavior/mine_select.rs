use interfaces::Agent;

use crate::client::{behavior::BehaviorTrait, state::target::TargetContext};

/// Takes the front of the queue as the block to break. The agent is already
/// in place so the front is not checked again.
#[derive(Debug, Default, Clone, Copy)]
pub struct MineSelect;

impl BehaviorTrait for MineSelect {
    fn on_enter(&mut self, ctx: &mut TargetContext, _agent: &mut impl Agent) {
        ctx.current_target = ctx.pop();
    }
}
