//! Cellular automaton background (stateful).
//!
//! The simulation advances on its own tick interval while display opacity
//! crossfades on the faster frame interval, so cells dissolve in and out
//! instead of blinking.

mod grid;
mod rules;

pub use grid::{DRAW_THRESHOLD, Grid};
pub use rules::{live_neighbors, next_state};

use backdrop_core::schedule::IntervalGate;
use backdrop_core::{Backdrop, LifeConfig, Point, Rect, Rgba, Surface, Viewport};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Conway's Game of Life on a torus, drawn as a faint pulsing grid.
#[derive(Debug)]
pub struct GameOfLife<R = StdRng> {
    config: LifeConfig,
    rng: R,
    grid: Grid,
    sim_gate: IntervalGate,
    frame_gate: IntervalGate,
    viewport: Viewport,
    active: bool,
}

impl GameOfLife<StdRng> {
    /// Create an engine seeded from OS entropy.
    pub fn new(config: LifeConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }
}

impl<R: Rng> GameOfLife<R> {
    /// Create an engine drawing randomness from `rng`.
    pub fn with_rng(config: LifeConfig, rng: R) -> Self {
        let config = config.validated();
        Self {
            sim_gate: IntervalGate::new(config.tick_interval_ms),
            frame_gate: IntervalGate::new(config.frame_interval_ms),
            config,
            rng,
            grid: Grid::empty(),
            viewport: Viewport::default(),
            active: false,
        }
    }

    pub fn config(&self) -> &LifeConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Seed a fresh random grid sized for the current viewport.
    fn reseed(&mut self) {
        let Viewport { width, height, .. } = self.viewport;
        let (rows, cols) = Grid::dimensions(width, height, self.config.cell_size);
        self.grid = Grid::random(rows, cols, self.config.seed_density, &mut self.rng);
    }

    /// Advance one generation, reseeding instead of adopting an all-dead one.
    fn advance_generation(&mut self) {
        if self.grid.is_empty() {
            return;
        }
        let next = self.grid.next_generation();
        if next.iter().any(|&alive| alive) {
            self.grid.adopt(next);
        } else {
            debug!("automaton died out, reseeding");
            self.reseed();
        }
    }

    fn draw_grid_lines(&self, surface: &mut dyn Surface) {
        let color = Rgba::WHITE.with_alpha(self.config.grid_opacity);
        let (width, height) = self.viewport.size();
        let step = self.config.cell_size as usize;

        // Lines sit on pixel centers so each one stays a single pixel wide.
        for x in (0..=self.viewport.width).step_by(step) {
            let x = x as f32 + 0.5;
            surface.stroke_line(Point::new(x, 0.0), Point::new(x, height), 1.0, color);
        }
        for y in (0..=self.viewport.height).step_by(step) {
            let y = y as f32 + 0.5;
            surface.stroke_line(Point::new(0.0, y), Point::new(width, y), 1.0, color);
        }
    }
}

impl<R: Rng> Backdrop for GameOfLife<R> {
    fn initialize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
        self.sim_gate.reset();
        self.frame_gate.reset();
        self.active = true;
        self.reseed();
        debug!(
            "life grid initialized at {}x{} cells",
            self.grid.cols(),
            self.grid.rows()
        );
    }

    fn step(&mut self, now_ms: u64) {
        if !self.active {
            return;
        }
        if self.sim_gate.ready(now_ms) {
            self.advance_generation();
        }
        if self.frame_gate.ready(now_ms) {
            self.grid.fade(self.config.fade_speed);
        }
    }

    fn render(&mut self, surface: &mut dyn Surface) {
        if !self.active {
            return;
        }
        surface.clear();
        self.draw_grid_lines(surface);

        let cell = self.config.cell_size as f32;
        for (row, col, opacity) in self.grid.visible_cells() {
            let rect = Rect::new(col as f32 * cell, row as f32 * cell, cell, cell).inset(1.0);
            let alpha = opacity * self.config.fill_opacity;
            surface.fill_rect(rect, Rgba::WHITE.with_alpha(alpha));
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if !self.active {
            return;
        }
        self.viewport.resize(width, height);
        self.reseed();
    }

    fn dispose(&mut self) {
        self.active = false;
        self.grid = Grid::empty();
        self.sim_gate.reset();
        self.frame_gate.reset();
    }
}
