//! Walking a loop of waypoints around a center. The same table driven
//! pattern as the dig loop, minus the mining.

use std::f64::consts::TAU;

use indexmap::IndexSet;
use interfaces::{types::BlockLocation, Agent, Movement, Progress};
use tracing::{debug, info, warn};

use crate::{
    client::behavior::{
        transitions::{self, Conditions, Guard, Transition},
        StateMachine,
    },
    error::{Error, Res},
};

/// `points` evenly spaced locations on a horizontal circle, rounded to blocks.
/// Points that round onto the same block are only visited once.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn waypoints(center: BlockLocation, radius: i32, points: usize) -> Res<Vec<BlockLocation>> {
    if points == 0 || radius < 0 {
        return Err(Error::InvalidPatrol { radius, points });
    }

    let radius = f64::from(radius);
    let waypoints: IndexSet<_> = (0..points)
        .map(|i| {
            let theta = TAU * i as f64 / points as f64;
            let dx = (radius * theta.cos()).round() as i32;
            let dz = (radius * theta.sin()).round() as i32;
            center + BlockLocation::new(dx, 0, dz)
        })
        .collect();

    Ok(waypoints.into_iter().collect())
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PatrolState {
    Entry,
    NextWaypoint,
    MoveTo,
    Exit,
}

pub const PATROL_TRANSITIONS: [Transition<PatrolState>; 4] = {
    use Guard::{Always, Finished, FinishedWithWork};
    use PatrolState::{Entry, Exit, MoveTo, NextWaypoint};

    [
        Transition::new(Entry, Always, NextWaypoint),
        Transition::new(NextWaypoint, FinishedWithWork, MoveTo),
        Transition::new(NextWaypoint, Always, Exit),
        Transition::new(MoveTo, Finished, NextWaypoint),
    ]
};

#[derive(Debug)]
pub struct PatrolMachine {
    state: PatrolState,
    waypoints: Vec<BlockLocation>,
    next: usize,
    /// 0 patrols forever
    laps: u32,
    laps_done: u32,
    goal: Option<BlockLocation>,
    pub visited: usize,
    pub failed: usize,
}

impl PatrolMachine {
    pub const fn new(waypoints: Vec<BlockLocation>, laps: u32) -> Self {
        Self {
            state: PatrolState::Entry,
            waypoints,
            next: 0,
            laps,
            laps_done: 0,
            goal: None,
            visited: 0,
            failed: 0,
        }
    }

    pub const fn laps_done(&self) -> u32 {
        self.laps_done
    }

    fn select_waypoint(&mut self) {
        let lapped_out = self.laps != 0 && self.laps_done >= self.laps;
        self.goal = if lapped_out {
            None
        } else {
            self.waypoints.get(self.next).copied()
        };

        if self.goal.is_some() {
            self.next += 1;
            if self.next == self.waypoints.len() {
                self.next = 0;
                self.laps_done += 1;
            }
        }
    }

    fn on_enter(&mut self, agent: &mut impl Agent) {
        match self.state {
            PatrolState::NextWaypoint => self.select_waypoint(),
            PatrolState::MoveTo => {
                if let Some(goal) = self.goal {
                    debug!(%goal, "patrolling to");
                    agent.move_to(goal);
                }
            }
            PatrolState::Exit => {
                info!(visited = self.visited, failed = self.failed, "patrol complete");
            }
            PatrolState::Entry => {}
        }
    }

    fn on_exit(&mut self, agent: &impl Agent) {
        if self.state != PatrolState::MoveTo {
            return;
        }

        match Movement::progress(agent) {
            Progress::Failed => {
                warn!(goal = ?self.goal, "could not reach waypoint");
                self.failed += 1;
            }
            Progress::Succeeded => self.visited += 1,
            Progress::InProgress => {}
        }
    }

    fn is_finished(&self, agent: &impl Agent) -> bool {
        match self.state {
            PatrolState::MoveTo => self.goal.is_none() || Movement::is_finished(agent),
            _ => true,
        }
    }
}

impl<A: Agent> StateMachine<A> for PatrolMachine {
    fn tick(&mut self, agent: &mut A) {
        let conditions = Conditions {
            finished: self.is_finished(&*agent),
            has_work: self.goal.is_some(),
        };

        let Some(to) = transitions::next(&PATROL_TRANSITIONS, self.state, conditions) else {
            return;
        };

        self.on_exit(&*agent);
        self.state = to;
        self.on_enter(agent);
    }

    fn is_done(&self) -> bool {
        self.state == PatrolState::Exit
    }
}
