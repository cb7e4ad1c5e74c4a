// Domain layer - Simulation engine and its data model
pub mod domain;

// Application layer - Driver loop, viewport and display buffer
pub mod application;

// Infrastructure layer - Window rendering and input
pub mod rendering;
pub mod input;

// Ambient concerns
pub mod config;
pub mod error;
pub mod telemetry;

// Re-exports for convenience
pub use domain::{
    Cell, CellChange, Changes, Coord, Engine, Grid, InitialState, Neighborhood, Strategy, presets,
};
pub use application::{Display, Driver, Viewport};
pub use config::{EngineConfig, ViewerConfig};
pub use error::{Error, Result};
