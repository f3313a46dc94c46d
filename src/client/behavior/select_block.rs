use interfaces::Agent;
use tracing::{debug, trace};

use crate::client::{behavior::BehaviorTrait, state::target::TargetContext};

/// Picks the next block that still has to be broken.
///
/// The front of the queue is only peeked. Entries the world already reports
/// as clear are dropped on the spot, all within this one activation, so no
/// cleared location ever becomes the current target.
#[derive(Debug, Default, Clone, Copy)]
pub struct SelectBlock;

impl BehaviorTrait for SelectBlock {
    fn on_enter(&mut self, ctx: &mut TargetContext, agent: &mut impl Agent) {
        ctx.current_target = None;

        while let Some(front) = ctx.peek() {
            let kind = agent.block_kind_at(front);

            if !kind.is_cleared() {
                debug!(block = %front, remaining = ctx.remaining(), "selected block");
                ctx.current_target = Some(front);
                return;
            }

            trace!(location = %front, ?kind, "already cleared");
            ctx.pop();
            ctx.skipped += 1;
        }

        debug!("dig order exhausted");
    }
}
