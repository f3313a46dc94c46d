use std::{
    fmt::{Debug, Formatter},
    fs::File,
    io::BufReader,
    path::Path,
};

use interfaces::types::{BlockLocation, Volume};
use serde::Deserialize;

use crate::{client::state::target::Landmarks, error::Res};

/// The account the agent logs in with. Only the session layer uses the
/// password, so it is never printed.
#[derive(Deserialize, Clone)]
pub struct Credentials {
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
}

impl Credentials {
    /// offline servers accept any username without a password
    pub const fn is_offline(&self) -> bool {
        self.password.is_none()
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
pub struct PatrolConfig {
    pub center: BlockLocation,
    pub radius: i32,
    pub points: usize,
    /// 0 patrols forever
    #[serde(default)]
    pub laps: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub excavation: Volume,
    #[serde(default)]
    pub landmarks: Landmarks,
    #[serde(default)]
    pub patrol: Option<PatrolConfig>,
}

impl Config {
    pub fn load(path: &Path) -> Res<Self> {
        let file = File::open(path)?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    pub fn parse(json: &str) -> Res<Self> {
        let config = serde_json::from_str(json)?;
        Ok(config)
    }
}
