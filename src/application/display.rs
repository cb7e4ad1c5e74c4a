use super::Viewport;
use crate::domain::{CellChange, Coord};

/// Display keeps what is on screen, updated only from change records.
#[derive(Clone, Debug)]
pub struct Display {
    viewport: Viewport,
    cells: Vec<bool>,
    alive: usize,
}

impl Display {
    /// Blank display; the first advance paints every visible cell
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            cells: vec![false; viewport.area()],
            alive: 0,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Apply a change stream, skipping records outside the viewport.
    /// Returns how many visible cells were updated.
    pub fn apply(&mut self, changes: impl IntoIterator<Item = CellChange>) -> usize {
        let viewport = self.viewport;
        let mut applied = 0;
        for change in changes.into_iter().filter(|c| viewport.contains(c.coord)) {
            let idx = change.coord.y * viewport.width + change.coord.x;
            match (self.cells[idx], change.alive) {
                (false, true) => self.alive += 1,
                (true, false) => self.alive -= 1,
                _ => {}
            }
            self.cells[idx] = change.alive;
            applied += 1;
        }
        applied
    }

    /// Shown state at a grid coordinate; off-screen reads as dead
    pub fn is_alive(&self, coord: Coord) -> bool {
        self.viewport.contains(coord) && self.cells[coord.y * self.viewport.width + coord.x]
    }

    /// Live cells currently shown
    pub fn alive_count(&self) -> usize {
        self.alive
    }

    /// Iterate visible cells row-major
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord, bool)> + '_ {
        let width = self.viewport.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &alive)| (Coord::new(i % width, i / width), alive))
    }
}
