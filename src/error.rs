//! Error types for the simulation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid grid dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Invalid seed density {0}: must be within 0.0..=1.0")]
    InvalidDensity(f64),

    #[error("Unknown pattern: {0}")]
    UnknownPattern(String),

    #[error("Invalid viewport {width}x{height}: both must be positive")]
    InvalidViewport { width: usize, height: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}
