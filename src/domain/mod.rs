mod cell;
mod grid;
mod neighborhood;
mod patterns;
mod strategy;
mod initial_state;
pub mod engine;

pub use cell::{Cell, CellChange, Coord};
pub use grid::Grid;
pub use neighborhood::Neighborhood;
pub use patterns::{Pattern, presets};
pub use strategy::Strategy;
pub use initial_state::{InitialState, DEFAULT_DENSITY};
pub use engine::{Changes, Engine};
