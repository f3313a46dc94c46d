use interfaces::Agent;
use tracing::{info, trace};

use crate::client::{
    behavior::{
        transitions::{self, Conditions, Guard, Transition},
        Behavior, BehaviorTrait, Entry, StateKind,
    },
    state::target::TargetContext,
};

/// Something the host advances once per tick
pub trait StateMachine<A: Agent> {
    fn tick(&mut self, agent: &mut A);

    /// true once the machine reached its exit state. Further ticks do nothing.
    fn is_done(&self) -> bool;
}

/// Dig loop transitions in priority order
pub const DIG_TRANSITIONS: [Transition<StateKind>; 8] = {
    use Guard::{Always, Exhausted, Finished, FinishedWithWork};
    use StateKind::{
        Entry, Exit, FindInteractPosition, MineBlock, MineSelect, MoveTo, SelectBlock,
    };

    [
        Transition::new(Entry, Always, SelectBlock),
        // everything left was already clear
        Transition::new(SelectBlock, Exhausted, Exit),
        Transition::new(SelectBlock, Always, FindInteractPosition),
        Transition::new(FindInteractPosition, Always, MoveTo),
        Transition::new(MoveTo, Finished, MineSelect),
        Transition::new(MineSelect, Always, MineBlock),
        Transition::new(MineBlock, FinishedWithWork, SelectBlock),
        Transition::new(MineBlock, Finished, Exit),
    ]
};

/// Digs out a dig order one block at a time
#[derive(Debug)]
pub struct DigMachine {
    state: Behavior,
    ctx: TargetContext,
}

impl DigMachine {
    pub const fn new(ctx: TargetContext) -> Self {
        Self {
            state: Behavior::Entry(Entry),
            ctx,
        }
    }

    pub const fn kind(&self) -> StateKind {
        self.state.kind()
    }

    pub const fn context(&self) -> &TargetContext {
        &self.ctx
    }
}

impl<A: Agent> StateMachine<A> for DigMachine {
    fn tick(&mut self, agent: &mut A) {
        let conditions = Conditions {
            finished: self.state.is_finished(&self.ctx, &*agent),
            has_work: self.ctx.has_work(),
        };

        let from = self.kind();
        let Some(to) = transitions::next(&DIG_TRANSITIONS, from, conditions) else {
            return;
        };

        trace!(?from, ?to, "transition");

        self.state.on_exit(&mut self.ctx, &*agent);
        self.state = Behavior::from(to);
        self.state.on_enter(&mut self.ctx, agent);

        if to == StateKind::Exit {
            info!(
                mined = self.ctx.mined,
                skipped = self.ctx.skipped,
                failed = self.ctx.failed.len(),
                "excavation complete"
            );
        }
    }

    fn is_done(&self) -> bool {
        self.kind() == StateKind::Exit
    }
}
