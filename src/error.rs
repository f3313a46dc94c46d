use thiserror::Error;

pub type Res<T = ()> = Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid volume {width}x{height}x{depth}: every extent must be positive")]
    InvalidVolume { width: i32, height: i32, depth: i32 },

    #[error("invalid patrol of {points} points with radius {radius}")]
    InvalidPatrol { radius: i32, points: usize },

    #[error("could not parse config: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
