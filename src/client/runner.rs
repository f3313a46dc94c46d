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
use std::time::Duration;

use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::warn;

use crate::client::{behavior::StateMachine, sim::SimAgent};

#[derive(Debug, Copy, Clone)]
pub struct RunnerOptions {
    /// time between ticks. 0 runs as fast as possible.
    pub tick_ms: u64,
    /// give up after this many ticks
    pub max_ticks: u64,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            tick_ms: 50,
            max_ticks: 100_000,
        }
    }
}

/// What is left once a run stops
#[derive(Debug)]
pub struct Finished<M> {
    pub machine: M,
    pub agent: SimAgent,
    pub ticks: u64,
    /// false if the run hit `max_ticks` first
    pub completed: bool,
}

/// Drives a machine and its host one game tick at a time
pub struct Runner<M> {
    machine: M,
    agent: SimAgent,
    options: RunnerOptions,
}

impl<M: StateMachine<SimAgent>> Runner<M> {
    pub const fn new(machine: M, agent: SimAgent, options: RunnerOptions) -> Self {
        Self {
            machine,
            agent,
            options,
        }
    }

    pub async fn run(mut self) -> Finished<M> {
        let mut timer = (self.options.tick_ms > 0).then(|| {
            let mut timer: Interval = interval(Duration::from_millis(self.options.tick_ms));
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            timer
        });

        let mut ticks = 0;

        while !self.machine.is_done() {
            if ticks >= self.options.max_ticks {
                warn!(ticks, "giving up, tick limit reached");
                break;
            }

            match timer.as_mut() {
                Some(timer) => {
                    timer.tick().await;
                }
                None => tokio::task::yield_now().await,
            }

            self.agent.update();
            self.machine.tick(&mut self.agent);
            ticks += 1;
        }

        Finished {
            completed: self.machine.is_done(),
            machine: self.machine,
            agent: self.agent,
            ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use interfaces::types::{BlockLocation, Volume};

    use crate::client::{
        behavior::DigMachine,
        dig_order::plan,
        patrol::{waypoints, PatrolMachine},
        runner::{Runner, RunnerOptions},
        sim::{quarry, SimAgent},
        state::target::TargetContext,
    };

    #[tokio::test]
    async fn digs_to_completion() {
        let volume = Volume::new(BlockLocation::new(0, 64, 0), 2, 3, 2);
        let order = plan(&volume).unwrap();
        let total = order.len();

        let agent = SimAgent::new(quarry(&volume), volume.anchor.above()).with_timing(0, 0);
        let machine = DigMachine::new(TargetContext::new(order));
        let options = RunnerOptions {
            tick_ms: 0,
            max_ticks: 10_000,
        };

        let finished = Runner::new(machine, agent, options).run().await;

        assert!(finished.completed);
        assert_eq!(finished.machine.context().mined, total);
        assert_eq!(finished.agent.total_mine_calls(), total);
    }

    #[tokio::test]
    async fn stops_at_tick_limit() {
        let volume = Volume::new(BlockLocation::new(0, 64, 0), 3, 4, 3);
        let order = plan(&volume).unwrap();

        let agent = SimAgent::new(quarry(&volume), volume.anchor.above());
        let machine = DigMachine::new(TargetContext::new(order));
        let options = RunnerOptions {
            tick_ms: 1,
            max_ticks: 25,
        };

        let finished = Runner::new(machine, agent, options).run().await;

        assert!(!finished.completed);
        assert_eq!(finished.ticks, 25);
        assert!(finished.machine.context().has_work());
    }

    #[tokio::test]
    async fn patrols() {
        let center = BlockLocation::new(0, 64, 0);
        let points = waypoints(center, 5, 8).unwrap();
        let count = points.len();

        let agent = SimAgent::new(Default::default(), center);
        let machine = PatrolMachine::new(points, 1);
        let options = RunnerOptions {
            tick_ms: 0,
            ..RunnerOptions::default()
        };

        let finished = Runner::new(machine, agent, options).run().await;

        assert!(finished.completed);
        assert_eq!(finished.machine.visited, count);
    }
}
