use crate::domain::Coord;

/// Viewport is the visible top-left window of the simulated grid.
/// The engine knows nothing about it; the renderer uses it to drop
/// change records that fall outside the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Shrink to fit a grid smaller than the requested window
    pub fn clamped_to(self, (grid_width, grid_height): (usize, usize)) -> Self {
        Self {
            width: self.width.min(grid_width),
            height: self.height.min(grid_height),
        }
    }

    /// Whether a grid coordinate is on screen
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Number of visible cells
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Convert grid coordinates to screen coordinates
    pub fn grid_to_screen(&self, coord: Coord, cell_size: f32) -> (f32, f32) {
        (coord.x as f32 * cell_size, coord.y as f32 * cell_size)
    }

    /// Pixel size of the whole window
    pub fn screen_size(&self, cell_size: f32) -> (f32, f32) {
        (self.width as f32 * cell_size, self.height as f32 * cell_size)
    }
}
