//! Sources for the first generation, applied lazily on the first advance.

use super::{Cell, Coord, Grid, presets};
use crate::error::{Error, Result};
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

/// Probability that a randomly seeded cell starts alive
pub const DEFAULT_DENSITY: f64 = 1.0 / 3.0;

/// How the bootstrap advance fills the grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InitialState {
    /// Each cell independently alive with probability `density`.
    /// `seed: None` draws a fresh generator per engine.
    Random {
        density: f64,
        seed: Option<u64>,
    },
    /// Exactly these cells alive; coordinates wrap onto the torus
    Cells { cells: Vec<Coord> },
    /// A named preset anchored at (x, y)
    Pattern { name: String, x: usize, y: usize },
}

impl Default for InitialState {
    fn default() -> Self {
        InitialState::Random { density: DEFAULT_DENSITY, seed: None }
    }
}

impl InitialState {
    /// Random seeding with the default density and a fixed seed
    pub fn seeded(seed: u64) -> Self {
        InitialState::Random { density: DEFAULT_DENSITY, seed: Some(seed) }
    }

    /// Check parameters and replace preset names by their cells on a grid of
    /// the given dimensions, so seeding itself cannot fail.
    pub fn resolve(self, dimensions: (usize, usize)) -> Result<Self> {
        match self {
            InitialState::Random { density, .. } if !(0.0..=1.0).contains(&density) => {
                Err(Error::InvalidDensity(density))
            }
            InitialState::Pattern { name, x, y } => presets::by_name(&name)
                .map(|pattern| InitialState::Cells { cells: pattern.cells_at(x, y, dimensions) })
                .ok_or(Error::UnknownPattern(name)),
            other => Ok(other),
        }
    }

    /// Write the first generation into `grid`, replacing its contents.
    /// Expects a state returned by `resolve`.
    pub(crate) fn apply(&self, grid: &mut Grid) {
        match self {
            InitialState::Random { density, seed: Some(seed) } => {
                grid.randomize(&mut StdRng::seed_from_u64(*seed), *density);
            }
            InitialState::Random { density, seed: None } => {
                grid.randomize(&mut rand::rng(), *density);
            }
            InitialState::Cells { cells } => {
                grid.clear();
                for coord in cells {
                    grid.set_wrapped(coord.x, coord.y, Cell::Alive);
                }
            }
            InitialState::Pattern { .. } => {
                unreachable!("patterns are resolved into cells before seeding")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_rejects_bad_density() {
        let state = InitialState::Random { density: 1.5, seed: None };
        assert!(matches!(state.resolve((4, 4)), Err(Error::InvalidDensity(d)) if d == 1.5));

        let state = InitialState::Random { density: -0.1, seed: Some(3) };
        assert!(state.resolve((4, 4)).is_err());
    }

    #[test]
    fn test_resolve_pattern_into_cells() {
        let state = InitialState::Pattern { name: "blinker".into(), x: 2, y: 3 };
        let resolved = state.resolve((8, 8)).unwrap();

        assert_eq!(
            resolved,
            InitialState::Cells {
                cells: vec![Coord::new(2, 4), Coord::new(3, 4), Coord::new(4, 4)],
            }
        );
    }

    #[test]
    fn test_resolve_unknown_pattern() {
        let state = InitialState::Pattern { name: "nope".into(), x: 0, y: 0 };
        let result = state.resolve((4, 4));
        assert!(matches!(result, Err(Error::UnknownPattern(name)) if name == "nope"));
    }

    #[test]
    fn test_resolve_pattern_wraps_anchor() {
        let state = InitialState::Pattern { name: "blinker".into(), x: usize::MAX, y: 9 };
        let resolved = state.resolve((4, 4)).unwrap();

        // x reduces to 3, y to 1; the blinker's row sits at y + 1
        assert_eq!(
            resolved,
            InitialState::Cells {
                cells: vec![Coord::new(3, 2), Coord::new(0, 2), Coord::new(1, 2)],
            }
        );
    }

    #[test]
    fn test_apply_cells_replaces_contents() {
        let mut grid = Grid::new(5, 5);
        InitialState::seeded(9).apply(&mut grid);

        InitialState::Cells { cells: vec![Coord::new(6, 0)] }.apply(&mut grid);
        assert_eq!(grid.alive_coords(), vec![Coord::new(1, 0)]);
    }

    #[test]
    fn test_serde_tagged() {
        let json = r#"{"kind":"pattern","name":"Glider","x":4,"y":4}"#;
        let state: InitialState = serde_json::from_str(json).unwrap();
        assert_eq!(state, InitialState::Pattern { name: "Glider".into(), x: 4, y: 4 });
    }
}
