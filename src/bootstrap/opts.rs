//! Module to interact with cargo options

use std::path::PathBuf;

use clap::Parser;

/// Options parsed from CLI
#[derive(Parser, Debug)]
#[command(about, version)]
pub struct CliOptions {
    /// The JSON run config. See `config.example.json`.
    #[clap(long, default_value = "config.json")]
    pub config: PathBuf,

    /// Milliseconds between ticks. A Minecraft server ticks every 50ms. 0
    /// runs as fast as possible.
    #[clap(long, default_value = "50")]
    pub tick_ms: u64,

    /// Stop after this many ticks even if the run is not finished
    #[clap(long, default_value = "100000")]
    pub max_ticks: u64,

    /// Print the dig order, one block per line, and exit
    #[clap(long)]
    pub plan_only: bool,

    /// Patrol the configured circle of waypoints instead of digging
    #[clap(long)]
    pub patrol: bool,

    /// Clear the first n blocks of the dig order before starting, as if
    /// someone had already dug them
    #[clap(long, default_value = "0")]
    pub seed_air: usize,

    /// Ticks the simulated agent takes to walk to a block
    #[clap(long, default_value = "2")]
    pub move_ticks: u32,

    /// Ticks the simulated agent takes to break a block
    #[clap(long, default_value = "3")]
    pub mine_ticks: u32,
}

impl CliOptions {
    pub fn get() -> Self {
        Self::parse()
    }
}
