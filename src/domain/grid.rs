use super::{Cell, Coord, Neighborhood, neighborhood::wrap};
use rand::Rng;
use rayon::prelude::*;

/// Grid stores one generation of the toroidal automaton.
/// Cells live in a single row-major buffer; neighbor lookup is pure index arithmetic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid with all cells initially dead.
    /// Dimensions are validated by the engine; a zero-sized grid is empty.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Dead; width * height],
        }
    }

    /// Get grid dimensions
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Convert 2D coordinates to 1D index
    const fn get_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Get cell at position (with bounds checking)
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.width && y < self.height)
            .then(|| self.cells[self.get_index(x, y)])
    }

    /// Alive state at `coord`; out-of-range coordinates read as dead
    pub fn is_alive(&self, coord: Coord) -> bool {
        self.get(coord.x, coord.y).is_some_and(Cell::is_alive)
    }

    /// Set cell, wrapping the coordinate onto the torus
    pub(crate) fn set_wrapped(&mut self, x: usize, y: usize, cell: Cell) {
        let idx = self.get_index(x % self.width, y % self.height);
        self.cells[idx] = cell;
    }

    /// Raw row-major cell buffer
    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One row of cells
    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// Count live neighbors using toroidal wrapping.
    /// Panics if `(x, y)` lies outside the grid.
    pub fn count_live_neighbors(&self, x: usize, y: usize, neighborhood: Neighborhood) -> u8 {
        assert!(
            x < self.width && y < self.height,
            "({x}, {y}) outside {}x{}",
            self.width,
            self.height
        );

        neighborhood
            .offsets()
            .iter()
            .map(|&(dx, dy)| {
                let nx = wrap(x, dx, self.width);
                let ny = wrap(y, dy, self.height);
                self.cells[self.get_index(nx, ny)]
            })
            .filter(|cell| cell.is_alive())
            .count() as u8
    }

    /// Compute row `y` of the successor generation into `out`.
    /// Returns how many cells of the row differ from this generation.
    fn evolve_row(&self, y: usize, out: &mut [Cell], neighborhood: Neighborhood) -> usize {
        debug_assert_eq!(out.len(), self.width);

        let mut changed = 0;
        for (x, (next, &cell)) in out.iter_mut().zip(self.row(y)).enumerate() {
            *next = cell.evolve(self.count_live_neighbors(x, y, neighborhood));
            if *next != cell {
                changed += 1;
            }
        }
        changed
    }

    /// Serial evolution into a pre-allocated buffer of the same shape.
    /// Returns the number of cells that changed.
    pub fn evolve_into(&self, dest: &mut Grid, neighborhood: Neighborhood) -> usize {
        assert_eq!(self.dimensions(), dest.dimensions());

        dest.cells
            .chunks_mut(self.width)
            .enumerate()
            .map(|(y, row)| self.evolve_row(y, row, neighborhood))
            .sum()
    }

    /// Parallel evolution using rayon; each worker owns a disjoint row of `dest`
    /// and only reads `self`. Returns the number of cells that changed.
    pub fn evolve_into_parallel(&self, dest: &mut Grid, neighborhood: Neighborhood) -> usize {
        assert_eq!(self.dimensions(), dest.dimensions());

        dest.cells
            .par_chunks_mut(self.width)
            .enumerate()
            .map(|(y, row)| self.evolve_row(y, row, neighborhood))
            .sum()
    }

    /// Clear all cells to dead state
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = Cell::Dead);
    }

    /// Randomize grid, each cell alive with probability `density`.
    /// Cells are drawn in row-major order so a seeded `rng` is reproducible.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) {
        self.cells.iter_mut().for_each(|cell| {
            *cell = Cell::from(rng.random_bool(density));
        });
    }

    /// Overwrite with the opposite state of every cell in `source`
    pub(crate) fn fill_inverse_of(&mut self, source: &Grid) {
        debug_assert_eq!(self.dimensions(), source.dimensions());
        self.cells
            .iter_mut()
            .zip(&source.cells)
            .for_each(|(cell, src)| *cell = src.toggle());
    }

    /// Count alive cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Iterate over all cells with their positions, row-major
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &cell)| (Coord::new(i % self.width, i / self.width), cell))
    }

    /// Coordinates of every live cell, row-major
    pub fn alive_coords(&self) -> Vec<Coord> {
        self.iter_cells()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(coord, _)| coord)
            .collect()
    }
}
