//! Mount-time settings for each engine.
//!
//! Settings are static for an engine's lifetime; changing them means
//! mounting a new engine.

use serde::{Deserialize, Serialize};

/// Settings for the cellular automaton background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
    /// Edge length of one cell in pixels.
    pub cell_size: u32,
    /// Milliseconds between simulation generations.
    pub tick_interval_ms: u64,
    /// Peak alpha of a fully alive cell.
    pub fill_opacity: f32,
    /// Alpha of the grid separator lines.
    pub grid_opacity: f32,
    /// Display opacity change per rendered frame.
    pub fade_speed: f32,
    /// Minimum milliseconds between rendered frames.
    pub frame_interval_ms: u64,
    /// Probability that a cell starts alive when the grid is seeded.
    pub seed_density: f64,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            cell_size: 20,
            tick_interval_ms: 200,
            fill_opacity: 0.08,
            grid_opacity: 0.08,
            fade_speed: 0.05,
            frame_interval_ms: 16,
            seed_density: 0.15,
        }
    }
}

impl LifeConfig {
    /// Clamp every field into its usable range.
    ///
    /// Non-finite values (TOML accepts `nan` and `inf`) fall back to the
    /// field's default.
    pub fn validated(self) -> Self {
        let defaults = Self::default();
        Self {
            cell_size: self.cell_size.max(1),
            tick_interval_ms: self.tick_interval_ms.max(1),
            fill_opacity: clamp_f32(self.fill_opacity, defaults.fill_opacity, 0.0, 1.0),
            grid_opacity: clamp_f32(self.grid_opacity, defaults.grid_opacity, 0.0, 1.0),
            fade_speed: clamp_f32(self.fade_speed, defaults.fade_speed, f32::EPSILON, 1.0),
            frame_interval_ms: self.frame_interval_ms,
            seed_density: clamp_f64(self.seed_density, defaults.seed_density, 0.0, 1.0),
        }
    }
}

/// Settings for the parallax starfield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    /// Stars generated per viewport.
    pub star_count: usize,
    /// Milliseconds between global opacity fade ticks.
    pub fade_interval_ms: u64,
    /// Global opacity change per fade tick.
    pub fade_step: f32,
    /// Per-frame chance of spawning a shooting star.
    pub shooting_star_chance: f64,
    /// Maximum concurrent shooting stars.
    pub max_shooting_stars: usize,
    /// Shooting star opacity lost per frame.
    pub shooting_star_decay: f32,
    /// Per-frame chance of spawning a planet.
    pub planet_chance: f64,
    /// Maximum concurrent planets.
    pub max_planets: usize,
    /// Fraction of planets drawn with a ring.
    pub ring_chance: f64,
    /// Distance outside the viewport at which planets despawn, in pixels.
    pub despawn_margin: f32,
    /// Multiplier applied to shooting star and planet sizes and speeds.
    ///
    /// Small surfaces such as a terminal look better with a scale below 1.
    pub scale: f32,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            star_count: 800,
            fade_interval_ms: 50,
            fade_step: 0.05,
            shooting_star_chance: 0.001,
            max_shooting_stars: 1,
            shooting_star_decay: 0.02,
            planet_chance: 0.0008,
            max_planets: 2,
            ring_chance: 0.2,
            despawn_margin: 100.0,
            scale: 1.0,
        }
    }
}

impl StarfieldConfig {
    /// Clamp every field into its usable range.
    ///
    /// Non-finite values fall back to the field's default.
    pub fn validated(self) -> Self {
        let defaults = Self::default();
        Self {
            fade_interval_ms: self.fade_interval_ms.max(1),
            fade_step: clamp_f32(self.fade_step, defaults.fade_step, f32::EPSILON, 1.0),
            shooting_star_chance: clamp_f64(
                self.shooting_star_chance,
                defaults.shooting_star_chance,
                0.0,
                1.0,
            ),
            shooting_star_decay: clamp_f32(
                self.shooting_star_decay,
                defaults.shooting_star_decay,
                f32::EPSILON,
                1.0,
            ),
            planet_chance: clamp_f64(self.planet_chance, defaults.planet_chance, 0.0, 1.0),
            ring_chance: clamp_f64(self.ring_chance, defaults.ring_chance, 0.0, 1.0),
            despawn_margin: clamp_f32(self.despawn_margin, defaults.despawn_margin, 0.0, f32::MAX),
            scale: if self.scale.is_finite() && self.scale > 0.0 {
                self.scale
            } else {
                defaults.scale
            },
            ..self
        }
    }
}

fn clamp_f32(value: f32, default: f32, min: f32, max: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        default
    }
}

fn clamp_f64(value: f64, default: f64, min: f64, max: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        default
    }
}
