//! Cell storage for the automaton.

use rand::Rng;

use super::rules::{live_neighbors, next_state};
use crate::ease::approach;

/// Display opacity below which a cell is not painted.
pub const DRAW_THRESHOLD: f32 = 0.01;

/// The simulation grid together with each cell's display opacity.
///
/// Both arrays are row-major and always share the same dimensions; the
/// opacity only smooths rendering and never feeds back into the rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    alive: Vec<bool>,
    opacity: Vec<f32>,
}

impl Grid {
    /// Rows and columns needed to cover a `width` x `height` viewport.
    pub fn dimensions(width: u32, height: u32, cell_size: u32) -> (usize, usize) {
        let cell = cell_size.max(1);
        (height.div_ceil(cell) as usize, width.div_ceil(cell) as usize)
    }

    /// A grid where each cell is independently alive with probability
    /// `density`. Display opacity starts settled on each cell's state.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, density: f64, rng: &mut R) -> Self {
        let alive: Vec<bool> = (0..rows * cols).map(|_| rng.random_bool(density)).collect();
        Self::from_cells(rows, cols, alive)
    }

    /// A grid with the given row-major cell states.
    ///
    /// # Panics
    ///
    /// Panics if `alive.len() != rows * cols`.
    pub fn from_cells(rows: usize, cols: usize, alive: Vec<bool>) -> Self {
        assert_eq!(alive.len(), rows * cols, "cell count must match dimensions");
        let opacity = alive.iter().map(|&a| if a { 1.0 } else { 0.0 }).collect();
        Self {
            rows,
            cols,
            alive,
            opacity,
        }
    }

    /// An empty grid with no cells.
    pub fn empty() -> Self {
        Self::from_cells(0, 0, Vec::new())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.alive[row * self.cols + col]
    }

    pub fn opacity(&self, row: usize, col: usize) -> f32 {
        self.opacity[row * self.cols + col]
    }

    /// Number of display opacity entries; always `rows * cols`.
    pub fn opacity_len(&self) -> usize {
        self.opacity.len()
    }

    pub fn live_count(&self) -> usize {
        self.alive.iter().filter(|&&a| a).count()
    }

    pub fn neighbors(&self, row: usize, col: usize) -> u8 {
        live_neighbors(&self.alive, self.rows, self.cols, row, col)
    }

    /// Compute the next generation from the current one without touching it.
    pub fn next_generation(&self) -> Vec<bool> {
        (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| (row, col)))
            .map(|(row, col)| next_state(self.is_alive(row, col), self.neighbors(row, col)))
            .collect()
    }

    /// Replace the cell states, keeping display opacities so cells fade
    /// toward their new states.
    pub fn adopt(&mut self, alive: Vec<bool>) {
        debug_assert_eq!(alive.len(), self.alive.len());
        self.alive = alive;
    }

    /// Move every cell's display opacity one `step` toward its state.
    pub fn fade(&mut self, step: f32) {
        for (opacity, &alive) in self.opacity.iter_mut().zip(&self.alive) {
            let target = if alive { 1.0 } else { 0.0 };
            *opacity = approach(*opacity, target, step);
        }
    }

    /// Cells bright enough to paint, as `(row, col, opacity)`.
    pub fn visible_cells(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        self.opacity
            .iter()
            .enumerate()
            .filter(|&(_, &o)| o > DRAW_THRESHOLD)
            .map(|(i, &o)| (i / self.cols, i % self.cols, o))
    }
}
