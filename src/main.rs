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
#![deny(unused_must_use)]
#![deny(rustdoc::broken_intra_doc_links)]

#[macro_use]
extern crate enum_dispatch;

use std::process::ExitCode;

use anyhow::{bail, Context};
use interfaces::types::BlockState;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    bootstrap::{
        config::{Config, Credentials},
        opts::CliOptions,
    },
    client::{
        behavior::DigMachine,
        dig_order,
        patrol::{self, PatrolMachine},
        runner::{Runner, RunnerOptions},
        sim::{quarry, SimAgent},
        state::target::TargetContext,
    },
};

mod bootstrap;
mod client;
mod error;
mod storage;

fn main() -> ExitCode {
    init_logging();

    match start() {
        Ok(()) => ExitCode::SUCCESS,

        // print the error in non-debug fashion
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` picks the level, `info` by default
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn start() -> anyhow::Result<()> {
    // the state machines are single threaded
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("could not start runtime")?;

    rt.block_on(run())
}

/// Only the username is logged. No game session is opened here.
fn log_session(credentials: &Credentials) {
    info!(
        username = %credentials.username,
        offline = credentials.is_offline(),
        "session"
    );
}

async fn run() -> anyhow::Result<()> {
    let CliOptions {
        config: config_path,
        tick_ms,
        max_ticks,
        plan_only,
        patrol,
        seed_air,
        move_ticks,
        mine_ticks,
    } = CliOptions::get();

    let config = Config::load(&config_path)
        .with_context(|| format!("could not load config {}", config_path.display()))?;

    let options = RunnerOptions { tick_ms, max_ticks };

    if plan_only {
        let order = dig_order::plan(&config.excavation).context("could not plan excavation")?;
        for location in order {
            println!("{location}");
        }
        return Ok(());
    }

    log_session(&config.credentials);

    if patrol {
        let Some(route) = config.patrol else {
            bail!("--patrol needs a \"patrol\" section in the config");
        };

        let points = patrol::waypoints(route.center, route.radius, route.points)
            .context("could not lay out patrol")?;
        info!(waypoints = points.len(), laps = route.laps, "starting patrol");

        let agent = SimAgent::new(Default::default(), route.center)
            .with_timing(move_ticks, mine_ticks);
        let finished = Runner::new(PatrolMachine::new(points, route.laps), agent, options)
            .run()
            .await;

        info!(
            ticks = finished.ticks,
            visited = finished.machine.visited,
            failed = finished.machine.failed,
            laps = finished.machine.laps_done(),
            position = %finished.agent.location(),
            "patrol stopped"
        );
        return Ok(());
    }

    let volume = config.excavation;
    let order = dig_order::plan(&volume).context("could not plan excavation")?;
    info!(
        blocks = order.len(),
        footprint = volume.footprint_volume(),
        "planned excavation"
    );

    let mut agent =
        SimAgent::new(quarry(&volume), volume.anchor.above()).with_timing(move_ticks, mine_ticks);
    for &location in order.iter().take(seed_air) {
        agent.world_mut().set_block(location, BlockState::AIR);
    }

    let ctx = TargetContext::new(order).with_landmarks(config.landmarks);
    info!(
        solid = agent.world().solid_blocks().count(),
        chest = ?ctx.chest_location,
        crafting_table = ?ctx.crafting_table,
        "world ready"
    );

    let finished = Runner::new(DigMachine::new(ctx), agent, options)
        .run()
        .await;

    let ctx = finished.machine.context();
    info!(
        ticks = finished.ticks,
        mined = ctx.mined,
        skipped = ctx.skipped,
        failed = ctx.failed.len(),
        mine_calls = finished.agent.total_mine_calls(),
        move_calls = finished.agent.move_calls(),
        position = %finished.agent.location(),
        "excavation stopped"
    );

    if !finished.completed {
        bail!(
            "stopped after {} ticks with {} blocks left",
            finished.ticks,
            ctx.remaining()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{
        io::Write,
        sync::{Arc, Mutex},
    };

    use crate::{bootstrap::config::Credentials, log_session};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn session_log_names_user_only() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let credentials = Credentials {
            username: "digger".to_string(),
            password: Some("hunter2".to_string()),
        };
        tracing::subscriber::with_default(subscriber, || log_session(&credentials));

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("session"), "{output}");
        assert!(output.contains("digger"), "{output}");
        assert!(!output.contains("connected"), "{output}");
        assert!(!output.contains("hunter2"), "{output}");
    }
}
