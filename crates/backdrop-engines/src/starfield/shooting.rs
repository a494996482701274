//! Shooting stars: short-lived streaks that fade as they travel.

use std::f32::consts::FRAC_PI_4;

use backdrop_core::{Point, Rgba, Surface, Viewport};
use rand::Rng;

/// Fraction of the scroll offset shooting stars move by.
pub const SHOOTING_STAR_PARALLAX: f32 = 0.1;

/// Streak width in pixels.
const STREAK_WIDTH: f32 = 2.0;

/// A streak moving along `angle`. Opacity only ever decreases.
#[derive(Debug, Clone, PartialEq)]
pub struct ShootingStar {
    /// Tail position in pixels.
    pub x: f32,
    pub y: f32,
    /// Streak length in pixels.
    pub length: f32,
    /// Distance travelled per frame in pixels.
    pub speed: f32,
    pub opacity: f32,
    /// Travel direction in radians.
    pub angle: f32,
}

impl ShootingStar {
    /// Spawn somewhere in the upper half of the viewport, heading
    /// down-right at roughly 45 degrees.
    pub fn spawn<R: Rng + ?Sized>(viewport: &Viewport, scale: f32, rng: &mut R) -> Self {
        let (width, height) = viewport.size();
        Self {
            x: rng.random::<f32>() * width,
            y: rng.random::<f32>() * height * 0.5
                + viewport.scroll_offset * SHOOTING_STAR_PARALLAX,
            length: (100.0 + rng.random::<f32>() * 80.0) * scale,
            speed: (25.0 + rng.random::<f32>() * 20.0) * scale,
            opacity: 1.0,
            angle: FRAC_PI_4 + (rng.random::<f32>() - 0.5) * 0.2,
        }
    }

    /// Move one frame along the heading and lose `decay` opacity.
    pub fn advance(&mut self, decay: f32) {
        let (sin, cos) = self.angle.sin_cos();
        self.x += cos * self.speed;
        self.y += sin * self.speed;
        self.opacity -= decay;
    }

    pub fn is_spent(&self) -> bool {
        self.opacity <= 0.0
    }

    /// Paint as a line fading from a transparent tail to a bright head.
    pub fn draw(&self, surface: &mut dyn Surface, scroll_offset: f32, global_opacity: f32) {
        let parallax = scroll_offset * SHOOTING_STAR_PARALLAX;
        let (sin, cos) = self.angle.sin_cos();
        let tail = Point::new(self.x, self.y - parallax);
        let head = Point::new(
            self.x + cos * self.length,
            self.y + sin * self.length - parallax,
        );
        surface.stroke_gradient_line(
            tail,
            head,
            STREAK_WIDTH,
            Rgba::WHITE.with_alpha(0.0),
            Rgba::WHITE.with_alpha(self.opacity * global_opacity),
        );
    }
}

/// Advance every shooting star one frame and drop the spent ones.
pub fn update(stars: &mut Vec<ShootingStar>, decay: f32) {
    for star in stars.iter_mut() {
        star.advance(decay);
    }
    stars.retain(|s| !s.is_spent());
}
