//! Background stars with twinkle and scroll parallax.

use std::f32::consts::TAU;

use backdrop_core::{Point, Rgba, Surface, Viewport};
use rand::Rng;

use crate::palette::STAR_COLORS;

/// A single background star. Stars never move; parallax and twinkle are
/// computed at draw time.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// Horizontal position in pixels.
    pub x: f32,
    /// Vertical position in pixels before parallax.
    pub y: f32,
    /// Dot radius in pixels.
    pub radius: f32,
    /// Peak opacity of the twinkle.
    pub opacity: f32,
    /// Twinkle angular frequency in radians per millisecond.
    pub flicker_speed: f32,
    /// Twinkle phase offset in radians.
    pub phase: f32,
    pub color: Rgba,
    /// Fraction of the page scroll offset this star moves by.
    pub scroll_speed: f32,
}

impl Star {
    /// A star with parallax and size derived from `depth` in `0.0..1.0`.
    ///
    /// Deeper values are closer: they scroll faster and draw larger.
    pub fn with_depth<R: Rng + ?Sized>(depth: f32, width: f32, height: f32, rng: &mut R) -> Self {
        Self {
            x: rng.random::<f32>() * width,
            y: rng.random::<f32>() * height,
            radius: depth * 1.5 + 0.5,
            opacity: 0.5 + rng.random::<f32>() * 0.5,
            flicker_speed: 0.001 + rng.random::<f32>() * 0.002,
            phase: rng.random::<f32>() * TAU,
            color: STAR_COLORS[rng.random_range(0..STAR_COLORS.len())],
            scroll_speed: depth * 0.12 + 0.02,
        }
    }

    /// Current brightness: a sine twinkle scaled by the star's peak opacity
    /// and the field's global opacity.
    pub fn brightness(&self, elapsed_ms: u64, global_opacity: f32) -> f32 {
        let angle = (elapsed_ms as f64 * self.flicker_speed as f64 + self.phase as f64).sin();
        ((angle as f32 + 1.0) / 2.0) * self.opacity * global_opacity
    }

    /// Vertical draw position after parallax, wrapped into `0.0..height`.
    pub fn visual_y(&self, scroll_offset: f32, height: f32) -> f32 {
        if height <= 0.0 {
            return self.y;
        }
        (self.y - scroll_offset * self.scroll_speed).rem_euclid(height)
    }
}

/// Generate `count` stars with independently random depths.
pub fn init_stars<R: Rng + ?Sized>(count: usize, viewport: &Viewport, rng: &mut R) -> Vec<Star> {
    let (width, height) = viewport.size();
    (0..count)
        .map(|_| {
            let depth = rng.random::<f32>();
            Star::with_depth(depth, width, height, rng)
        })
        .collect()
}

/// Paint every star.
pub fn draw(
    stars: &[Star],
    surface: &mut dyn Surface,
    elapsed_ms: u64,
    scroll_offset: f32,
    global_opacity: f32,
) {
    let height = surface.height() as f32;
    for star in stars {
        let alpha = star.brightness(elapsed_ms, global_opacity);
        let center = Point::new(star.x, star.visual_y(scroll_offset, height));
        surface.fill_circle(center, star.radius, star.color.with_alpha(alpha));
    }
}
