//! Table driven transitions shared by every state machine in the crate.
//!
//! A machine lists its transitions as `(from, guard, to)` rows. Each tick only
//! the rows leaving the active state are looked at, in the order they are
//! listed, and the first whose guard holds fires.

/// What has to be true for a transition to fire
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Guard {
    Always,
    /// the active state reports it is finished
    Finished,
    /// finished, and the machine still has work queued
    FinishedWithWork,
    /// the machine has no work left
    Exhausted,
}

/// A snapshot of everything a guard can look at
#[derive(Copy, Clone, Debug, Default)]
pub struct Conditions {
    pub finished: bool,
    pub has_work: bool,
}

impl Guard {
    pub const fn holds(self, conditions: Conditions) -> bool {
        let Conditions { finished, has_work } = conditions;
        match self {
            Guard::Always => true,
            Guard::Finished => finished,
            Guard::FinishedWithWork => finished && has_work,
            Guard::Exhausted => !has_work,
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Transition<K> {
    pub from: K,
    pub guard: Guard,
    pub to: K,
}

impl<K> Transition<K> {
    pub const fn new(from: K, guard: Guard, to: K) -> Self {
        Self { from, guard, to }
    }
}

/// The state to move to from `current`, if any transition fires
pub fn next<K: Copy + Eq>(
    table: &[Transition<K>],
    current: K,
    conditions: Conditions,
) -> Option<K> {
    table
        .iter()
        .filter(|transition| transition.from == current)
        .find(|transition| transition.guard.holds(conditions))
        .map(|transition| transition.to)
}
