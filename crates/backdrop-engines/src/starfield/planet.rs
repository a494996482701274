//! Planets: rare decorative bodies drifting across the viewport.

use std::f32::consts::{FRAC_PI_2, PI};

use backdrop_core::{Point, Rgba, Surface, Viewport};
use rand::Rng;

use crate::palette::PLANET_COLORS;

/// Viewport edge a planet enters from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Heading in radians that points into the viewport from this edge.
    pub fn inward_heading(self) -> f32 {
        match self {
            Edge::Top => FRAC_PI_2,
            Edge::Right => PI,
            Edge::Bottom => -FRAC_PI_2,
            Edge::Left => 0.0,
        }
    }
}

/// A drifting planet with an optional ring.
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub x: f32,
    /// Vertical position before parallax.
    pub y: f32,
    pub radius: f32,
    pub color: Rgba,
    pub ring: Option<Ring>,
    /// Distance travelled per frame in pixels.
    pub speed: f32,
    /// Current heading in radians.
    pub angle: f32,
    /// Heading change per frame in radians.
    pub curve_speed: f32,
    /// Fraction of the scroll offset this planet moves by.
    pub depth: f32,
}

/// A thin elliptical ring drawn behind the planet body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    /// Tilt in radians.
    pub angle: f32,
}

impl Planet {
    /// Spawn just outside a random edge, heading inward at a shallow angle.
    pub fn spawn<R: Rng + ?Sized>(
        viewport: &Viewport,
        scale: f32,
        ring_chance: f64,
        rng: &mut R,
    ) -> Self {
        let radius = (2.0 + rng.random::<f32>() * 4.0) * scale;
        let depth = 0.05 + rng.random::<f32>() * 0.15;
        let color = PLANET_COLORS[rng.random_range(0..PLANET_COLORS.len())];
        let ring = rng.random_bool(ring_chance).then(|| Ring {
            angle: rng.random::<f32>() * PI,
        });

        let (width, height) = viewport.size();
        let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
        let offset = radius * 4.0;
        let parallax = viewport.scroll_offset * depth;
        let (x, y) = match edge {
            Edge::Top => (rng.random::<f32>() * width, -offset + parallax),
            Edge::Right => (width + offset, rng.random::<f32>() * height + parallax),
            Edge::Bottom => (rng.random::<f32>() * width, height + offset + parallax),
            Edge::Left => (-offset, rng.random::<f32>() * height + parallax),
        };
        let angle = edge.inward_heading() + (rng.random::<f32>() - 0.5) * 0.5;

        Self {
            x,
            y,
            radius,
            color,
            ring,
            speed: (0.1 + rng.random::<f32>() * 0.3) * scale,
            angle,
            curve_speed: (rng.random::<f32>() - 0.5) * 0.002,
            depth,
        }
    }

    /// Curve the heading slightly and drift one frame.
    pub fn advance(&mut self) {
        self.angle += self.curve_speed;
        let (sin, cos) = self.angle.sin_cos();
        self.x += cos * self.speed;
        self.y += sin * self.speed;
    }

    /// Vertical draw position after parallax.
    pub fn visual_y(&self, scroll_offset: f32) -> f32 {
        self.y - scroll_offset * self.depth
    }

    /// Whether the planet is inside the viewport grown by `margin` on every side.
    pub fn in_bounds(&self, viewport: &Viewport, margin: f32) -> bool {
        let position = Point::new(self.x, self.visual_y(viewport.scroll_offset));
        viewport.contains_expanded(position, margin)
    }

    /// Paint the ring, then the body, then a diagonal shading overlay.
    pub fn draw(&self, surface: &mut dyn Surface, scroll_offset: f32, global_opacity: f32) {
        let center = Point::new(self.x, self.visual_y(scroll_offset));
        if let Some(ring) = self.ring {
            surface.stroke_ellipse(
                center,
                self.radius * 2.5,
                self.radius * 0.6,
                ring.angle,
                1.0,
                Rgba::WHITE.with_alpha(0.3 * global_opacity),
            );
        }
        surface.fill_circle(center, self.radius, self.color.with_alpha(global_opacity));
        surface.fill_circle_gradient(
            center,
            self.radius,
            Rgba::WHITE.with_alpha(0.2 * global_opacity),
            Rgba::BLACK.with_alpha(0.5 * global_opacity),
        );
    }
}

/// Drop planets that drifted out of bounds, then advance the rest.
pub fn update(planets: &mut Vec<Planet>, viewport: &Viewport, margin: f32) {
    planets.retain(|p| p.in_bounds(viewport, margin));
    for planet in planets.iter_mut() {
        planet.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_core::PixelCanvas;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const VIEW: Viewport = Viewport::new(800, 600);

    fn scrolled(scroll_offset: f32) -> Viewport {
        Viewport {
            scroll_offset,
            ..VIEW
        }
    }

    fn planet_at(x: f32, y: f32) -> Planet {
        Planet {
            x,
            y,
            radius: 4.0,
            color: PLANET_COLORS[0],
            ring: None,
            speed: 0.0,
            angle: 0.0,
            curve_speed: 0.0,
            depth: 0.1,
        }
    }

    #[test]
    fn test_spawns_just_outside_an_edge_heading_inward() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..500 {
            let p = Planet::spawn(&VIEW, 1.0, 0.2, &mut rng);
            assert!((2.0..=6.0).contains(&p.radius));
            assert!((0.05..=0.2).contains(&p.depth));
            let outside = p.x < 0.0 || p.x > 800.0 || p.y < 0.0 || p.y > 600.0;
            assert!(outside, "spawned inside at ({}, {})", p.x, p.y);
            assert!(p.in_bounds(&VIEW, 100.0));

            // Drifting a little must bring it closer to the viewport center.
            let before = (p.x - 400.0).hypot(p.y - 300.0);
            let mut moved = p.clone();
            moved.speed = 10.0;
            moved.advance();
            let after = (moved.x - 400.0).hypot(moved.y - 300.0);
            assert!(after < before);
        }
    }

    #[test]
    fn test_spawn_accounts_for_scroll_parallax() {
        let mut rng = StdRng::seed_from_u64(22);
        let viewport = scrolled(5_000.0);
        for _ in 0..100 {
            let p = Planet::spawn(&viewport, 1.0, 0.0, &mut rng);
            assert!(p.in_bounds(&viewport, 100.0));
            assert!(p.ring.is_none());
        }
    }

    #[test]
    fn test_ring_chance_is_respected() {
        let mut rng = StdRng::seed_from_u64(23);
        let ringed = (0..2_000)
            .filter(|_| Planet::spawn(&VIEW, 1.0, 0.2, &mut rng).ring.is_some())
            .count();
        let ratio = ringed as f64 / 2_000.0;
        assert!((ratio - 0.2).abs() < 0.03, "ratio was {ratio}");
    }

    #[test]
    fn test_curve_bends_heading() {
        let mut p = planet_at(0.0, 0.0);
        p.speed = 1.0;
        p.curve_speed = 0.001;
        for _ in 0..10 {
            p.advance();
        }
        assert!((p.angle - 0.01).abs() < 1e-6);
        assert!(p.y > 0.0);
    }

    #[test]
    fn test_out_of_bounds_planet_is_removed_for_good() {
        let mut planets = vec![planet_at(400.0, 300.0), planet_at(-150.0, 300.0)];
        update(&mut planets, &VIEW, 100.0);
        assert_eq!(planets.len(), 1);
        assert_eq!(planets[0].x, 400.0);

        // The parallax-shifted position is what gets tested.
        planets.push(planet_at(400.0, 300.0));
        update(&mut planets, &scrolled(10_000.0), 100.0);
        assert!(planets.is_empty());
        for _ in 0..10 {
            update(&mut planets, &VIEW, 100.0);
            assert!(planets.is_empty());
        }
    }

    #[test]
    fn test_draw_paints_ring_behind_a_shaded_body() {
        let mut planet = planet_at(20.0, 30.0);
        planet.color = Rgba::rgb(200, 40, 40);
        planet.ring = Some(Ring { angle: 0.0 });
        // Visual y is 30 - 100 * 0.1 = 20.
        let mut canvas = PixelCanvas::new(40, 40, Rgba::BLACK);
        planet.draw(&mut canvas, 100.0, 1.0);

        // Body center: red dominates, shading keeps it below the raw color.
        let [r, g, b] = canvas.pixel(20, 20).map(|c| [c.r, c.g, c.b]).unwrap_or_default();
        assert!(r > 60 && r < 200, "body red was {r}");
        assert!(r > g && r > b);

        // The ring crosses the horizontal axis 2.5r = 10 px from the center,
        // well outside the body.
        let ring = canvas.pixel(29, 20).unwrap_or(Rgba::BLACK);
        assert!(ring.r > 0 && ring.r == ring.g && ring.g == ring.b, "ring was {ring:?}");
        // Above the body, inside neither ring nor body.
        assert_eq!(canvas.pixel(20, 12), Some(Rgba::BLACK));
    }

    #[test]
    fn test_draw_follows_global_opacity() {
        let mut planet = planet_at(20.0, 20.0);
        planet.ring = Some(Ring { angle: 0.0 });
        let mut bright = PixelCanvas::new(40, 40, Rgba::BLACK);
        planet.draw(&mut bright, 0.0, 1.0);
        let mut dim = PixelCanvas::new(40, 40, Rgba::BLACK);
        planet.draw(&mut dim, 0.0, 0.3);
        let mut hidden = PixelCanvas::new(40, 40, Rgba::BLACK);
        planet.draw(&mut hidden, 0.0, 0.0);

        let red = |canvas: &PixelCanvas, x, y| canvas.pixel(x, y).map_or(0, |c| c.r);
        assert!(red(&dim, 20, 20) < red(&bright, 20, 20));
        assert!(red(&dim, 29, 20) < red(&bright, 29, 20));
        assert!(hidden.is_blank());
    }
}
