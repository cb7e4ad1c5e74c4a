//! Configuration types for the engine and the viewer.

use crate::domain::{InitialState, Neighborhood, Strategy};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV_VAR: &str = "TORUS_LIFE_CONFIG";

/// Simulation engine parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Width of the toroidal grid
    pub width: usize,
    /// Height of the toroidal grid
    pub height: usize,
    /// Neighbor offsets sampled by the rule
    pub neighborhood: Neighborhood,
    /// Serial or rayon-parallel compute phase
    pub strategy: Strategy,
    /// First generation, applied on the first advance
    pub initial_state: InitialState,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 2000,
            neighborhood: Neighborhood::default(),
            strategy: Strategy::default(),
            initial_state: InitialState::default(),
        }
    }
}

impl EngineConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, ..Self::default() }
    }

    /// Reject configurations the engine cannot be built from: a zero
    /// dimension, or more cells than one allocation can hold.
    pub fn validate(&self) -> Result<()> {
        let cells = self.width.checked_mul(self.height).filter(|&n| n <= isize::MAX as usize);
        if self.width == 0 || self.height == 0 || cells.is_none() {
            return Err(Error::InvalidDimensions { width: self.width, height: self.height });
        }
        self.initial_state.clone().resolve((self.width, self.height))?;
        Ok(())
    }
}

/// Windowed driver parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Engine to drive
    pub engine: EngineConfig,
    /// Visible columns, starting at x = 0
    pub viewport_width: usize,
    /// Visible rows, starting at y = 0
    pub viewport_height: usize,
    /// Stop after this many frames (None = run until quit)
    pub frame_limit: Option<u64>,
    /// Generations per second (None = one per rendered frame)
    pub updates_per_second: Option<f32>,
    /// Pixel size of one cell
    pub cell_size: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            viewport_width: 140,
            viewport_height: 70,
            frame_limit: Some(500),
            updates_per_second: None,
            cell_size: 7.0,
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<()> {
        self.engine.validate()?;
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(Error::InvalidViewport {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }
        if let Some(rate) = self.updates_per_second.filter(|r| !(r.is_finite() && *r > 0.0)) {
            return Err(Error::Config(format!("updates_per_second must be positive, got {rate}")));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            let message = format!("cell_size must be positive, got {}", self.cell_size);
            return Err(Error::Config(message));
        }
        Ok(())
    }

    /// Read a JSON config file; missing fields take their defaults
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by `TORUS_LIFE_CONFIG`, or defaults if unset
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }
}
