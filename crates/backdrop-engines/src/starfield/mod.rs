//! Parallax starfield (stateful).
//!
//! Stars are generated once per viewport and never move; their draw
//! position shifts with the page scroll offset by a per-star parallax
//! factor and wraps around vertically. Shooting stars and planets are
//! spawned at random, advance once per frame and are dropped when spent
//! or out of bounds. The whole field fades in and out on a slower tick
//! following an external [`ActivitySignal`].

mod fade;
mod planet;
mod shooting;
mod star;

pub use fade::GlobalFade;
pub use planet::{Edge, Planet, Ring};
pub use shooting::{SHOOTING_STAR_PARALLAX, ShootingStar};
pub use star::{Star, init_stars};

use backdrop_core::schedule::IntervalGate;
use backdrop_core::{ActivitySignal, Backdrop, StarfieldConfig, Surface, Viewport};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Ambient starfield whose visibility follows an activity signal.
#[derive(Debug)]
pub struct StarField<R = StdRng> {
    config: StarfieldConfig,
    rng: R,
    activity: ActivitySignal,
    fade: GlobalFade,
    fade_gate: IntervalGate,
    stars: Vec<Star>,
    shooting_stars: Vec<ShootingStar>,
    planets: Vec<Planet>,
    viewport: Viewport,
    elapsed_ms: u64,
    active: bool,
}

impl StarField<StdRng> {
    /// Create a starfield seeded from OS entropy.
    pub fn new(config: StarfieldConfig, activity: ActivitySignal) -> Self {
        Self::with_rng(config, activity, StdRng::from_os_rng())
    }
}

impl<R: Rng> StarField<R> {
    /// Create a starfield drawing randomness from `rng`.
    pub fn with_rng(config: StarfieldConfig, activity: ActivitySignal, rng: R) -> Self {
        let config = config.validated();
        Self {
            fade: GlobalFade::new(config.fade_step),
            fade_gate: IntervalGate::new(config.fade_interval_ms),
            config,
            rng,
            activity,
            stars: Vec::new(),
            shooting_stars: Vec::new(),
            planets: Vec::new(),
            viewport: Viewport::default(),
            elapsed_ms: 0,
            active: false,
        }
    }

    /// Set the vertical page scroll offset in pixels used for parallax.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        self.viewport.scroll_offset = offset;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn global_opacity(&self) -> f32 {
        self.fade.value()
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn shooting_stars(&self) -> &[ShootingStar] {
        &self.shooting_stars
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    fn maybe_spawn(&mut self) {
        if self.shooting_stars.len() < self.config.max_shooting_stars
            && self.rng.random_bool(self.config.shooting_star_chance)
        {
            let star = ShootingStar::spawn(&self.viewport, self.config.scale, &mut self.rng);
            trace!("shooting star spawned at ({:.0}, {:.0})", star.x, star.y);
            self.shooting_stars.push(star);
        }
        if self.planets.len() < self.config.max_planets
            && self.rng.random_bool(self.config.planet_chance)
        {
            let planet = Planet::spawn(
                &self.viewport,
                self.config.scale,
                self.config.ring_chance,
                &mut self.rng,
            );
            trace!("planet spawned at ({:.0}, {:.0})", planet.x, planet.y);
            self.planets.push(planet);
        }
    }
}

impl<R: Rng> Backdrop for StarField<R> {
    fn initialize(&mut self, width: u32, height: u32) {
        self.viewport.resize(width, height);
        self.active = true;
        self.fade_gate.reset();
        self.stars = init_stars(self.config.star_count, &self.viewport, &mut self.rng);
        debug!("starfield initialized with {} stars", self.stars.len());
    }

    fn step(&mut self, now_ms: u64) {
        if !self.active {
            return;
        }
        self.elapsed_ms = now_ms;
        if self.fade_gate.ready(now_ms) {
            self.fade.tick(self.activity.get());
        }
        if !self.fade.is_visible() {
            return;
        }

        // Spawn checks see the collections before this frame's removals.
        self.maybe_spawn();
        shooting::update(&mut self.shooting_stars, self.config.shooting_star_decay);
        planet::update(
            &mut self.planets,
            &self.viewport,
            self.config.despawn_margin * self.config.scale,
        );
    }

    fn render(&mut self, surface: &mut dyn Surface) {
        if !self.active {
            return;
        }
        surface.clear();
        let opacity = self.fade.value();
        if opacity <= 0.0 {
            return;
        }

        let scroll_offset = self.viewport.scroll_offset;
        star::draw(&self.stars, surface, self.elapsed_ms, scroll_offset, opacity);
        for shooting_star in &self.shooting_stars {
            shooting_star.draw(surface, scroll_offset, opacity);
        }
        for planet in &self.planets {
            planet.draw(surface, scroll_offset, opacity);
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if !self.active {
            return;
        }
        self.viewport.resize(width, height);
        self.stars = init_stars(self.config.star_count, &self.viewport, &mut self.rng);
    }

    fn dispose(&mut self) {
        self.active = false;
        self.fade_gate.reset();
        self.stars.clear();
        self.shooting_stars.clear();
        self.planets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_core::schedule::{FixedStepDriver, FrameDriver, FrameLoop};
    use backdrop_core::{PixelCanvas, Rgba};

    fn quiet_config() -> StarfieldConfig {
        StarfieldConfig {
            star_count: 50,
            shooting_star_chance: 0.0,
            planet_chance: 0.0,
            ..Default::default()
        }
    }

    fn field(config: StarfieldConfig, activity: &ActivitySignal, seed: u64) -> StarField {
        StarField::with_rng(config, activity.clone(), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_initialize_and_resize_regenerate_stars() {
        let activity = ActivitySignal::new(true);
        let mut stars = field(quiet_config(), &activity, 1);
        stars.initialize(200, 100);
        assert_eq!(stars.stars().len(), 50);
        assert!(stars.stars().iter().all(|s| s.x < 200.0 && s.y < 100.0));

        let before = stars.stars().to_vec();
        stars.resize(40, 30);
        assert_eq!(stars.stars().len(), 50);
        assert_ne!(stars.stars(), before.as_slice());
        assert!(stars.stars().iter().all(|s| s.x < 40.0 && s.y < 30.0));
    }

    #[test]
    fn test_global_opacity_follows_activity() {
        let activity = ActivitySignal::new(true);
        let mut stars = field(quiet_config(), &activity, 2);
        stars.initialize(100, 100);
        assert_eq!(stars.global_opacity(), 0.0);

        // One fade tick per 50 ms; 20 ticks for a full fade.
        for tick in 0..20u64 {
            stars.step(tick * 50);
            assert!((0.0..=1.0).contains(&stars.global_opacity()));
        }
        assert_eq!(stars.global_opacity(), 1.0);

        // Frames between fade ticks leave the opacity alone.
        activity.set(false);
        stars.step(960);
        assert_eq!(stars.global_opacity(), 1.0);

        for tick in 0..20u64 {
            stars.step(1_000 + tick * 50);
        }
        assert_eq!(stars.global_opacity(), 0.0);
    }

    #[test]
    fn test_opacity_bounded_over_long_runs() {
        let activity = ActivitySignal::new(false);
        let mut stars = field(quiet_config(), &activity, 3);
        stars.initialize(100, 100);
        let mut driver = FixedStepDriver::new(0, 16, 2_000);
        let mut frame = 0;
        while let Some(now) = driver.next_frame() {
            activity.set((frame / 150) % 2 == 1);
            stars.step(now);
            assert!((0.0..=1.0).contains(&stars.global_opacity()));
            frame += 1;
        }
    }

    #[test]
    fn test_invisible_field_skips_all_work() {
        let activity = ActivitySignal::new(false);
        let config = StarfieldConfig {
            shooting_star_chance: 1.0,
            planet_chance: 1.0,
            ..quiet_config()
        };
        let mut stars = field(config, &activity, 4);
        stars.initialize(100, 100);
        for now in (0..1_000).step_by(16) {
            stars.step(now);
        }
        assert!(stars.shooting_stars().is_empty());
        assert!(stars.planets().is_empty());

        let mut canvas = PixelCanvas::new(100, 100, Rgba::BLACK);
        stars.render(&mut canvas);
        assert!(canvas.is_blank());
    }

    #[test]
    fn test_forced_spawns_respect_caps() {
        let activity = ActivitySignal::new(true);
        let config = StarfieldConfig {
            shooting_star_chance: 1.0,
            planet_chance: 1.0,
            ..quiet_config()
        };
        let mut stars = field(config, &activity, 5);
        stars.initialize(800, 600);
        for now in (0..2_000).step_by(16) {
            stars.step(now);
            assert!(stars.shooting_stars().len() <= 1);
            assert!(stars.planets().len() <= 2);
        }
        assert_eq!(stars.planets().len(), 2);
    }

    #[test]
    fn test_suppressed_spawns_never_happen() {
        let activity = ActivitySignal::new(true);
        let mut stars = field(quiet_config(), &activity, 6);
        stars.initialize(800, 600);
        for now in (0..5_000).step_by(16) {
            stars.step(now);
        }
        assert!(stars.shooting_stars().is_empty());
        assert!(stars.planets().is_empty());
    }

    #[test]
    fn test_shooting_star_removed_when_spent() {
        let activity = ActivitySignal::new(true);
        let mut stars = field(quiet_config(), &activity, 7);
        stars.initialize(800, 600);
        // Fade fully in first so frames below are visible.
        for tick in 0..20u64 {
            stars.step(tick * 50);
        }
        stars.shooting_stars.push(ShootingStar {
            x: 10.0,
            y: 10.0,
            length: 100.0,
            speed: 1.0,
            opacity: 0.05,
            angle: 0.0,
        });

        stars.step(1_000);
        assert_eq!(stars.shooting_stars().len(), 1);
        assert!((stars.shooting_stars()[0].opacity - 0.03).abs() < 1e-6);
        stars.step(1_016);
        assert_eq!(stars.shooting_stars().len(), 1);
        stars.step(1_032);
        assert!(stars.shooting_stars().is_empty());
    }

    #[test]
    fn test_spawn_check_sees_a_star_spent_this_frame() {
        let activity = ActivitySignal::new(true);
        let mut stars = field(quiet_config(), &activity, 11);
        stars.initialize(800, 600);
        for tick in 0..20u64 {
            stars.step(tick * 50);
        }
        stars.config.shooting_star_chance = 1.0;
        stars.shooting_stars.push(ShootingStar {
            x: 10.0,
            y: 10.0,
            length: 100.0,
            speed: 1.0,
            opacity: 0.01,
            angle: 0.0,
        });

        // The dying star still fills the cap when the spawn check runs.
        stars.step(1_000);
        assert!(stars.shooting_stars().is_empty());

        stars.step(1_016);
        assert_eq!(stars.shooting_stars().len(), 1);
        assert!((stars.shooting_stars()[0].opacity - 0.98).abs() < 1e-6);
    }

    #[test]
    fn test_resize_keeps_scroll_offset() {
        let activity = ActivitySignal::new(true);
        let mut stars = field(quiet_config(), &activity, 12);
        stars.initialize(800, 600);
        stars.set_scroll_offset(40.0);
        stars.resize(400, 300);
        assert_eq!(
            stars.viewport(),
            Viewport {
                width: 400,
                height: 300,
                scroll_offset: 40.0,
            }
        );
    }

    #[test]
    fn test_planet_scrolled_out_of_view_despawns() {
        let activity = ActivitySignal::new(true);
        let mut stars = field(quiet_config(), &activity, 8);
        stars.initialize(800, 600);
        stars.step(0);
        stars.planets.push(Planet {
            x: 400.0,
            y: 300.0,
            radius: 4.0,
            color: Rgba::WHITE,
            ring: Some(Ring { angle: 0.3 }),
            speed: 0.2,
            angle: 0.0,
            curve_speed: 0.0,
            depth: 0.1,
        });
        stars.step(16);
        assert_eq!(stars.planets().len(), 1);

        stars.set_scroll_offset(5_000.0);
        stars.step(32);
        assert!(stars.planets().is_empty());
        stars.set_scroll_offset(0.0);
        stars.step(48);
        assert!(stars.planets().is_empty());
    }

    #[test]
    fn test_render_paints_when_visible() {
        let activity = ActivitySignal::new(true);
        let config = StarfieldConfig {
            star_count: 400,
            ..quiet_config()
        };
        let canvas = PixelCanvas::new(120, 80, Rgba::BLACK);
        let mut frame_loop = FrameLoop::mount(field(config, &activity, 9), Some(canvas));
        frame_loop.run(&mut FixedStepDriver::new(0, 50, 25));
        assert_eq!(frame_loop.engine().global_opacity(), 1.0);
        assert!(frame_loop.surface().is_some_and(|c| !c.is_blank()));
    }

    #[test]
    fn test_dispose_clears_everything() {
        let activity = ActivitySignal::new(true);
        let config = StarfieldConfig {
            shooting_star_chance: 1.0,
            planet_chance: 1.0,
            ..quiet_config()
        };
        let canvas = PixelCanvas::new(200, 200, Rgba::BLACK);
        let mut frame_loop = FrameLoop::mount(field(config, &activity, 10), Some(canvas));
        frame_loop.run(&mut FixedStepDriver::new(0, 16, 10));
        assert!(!frame_loop.engine().planets().is_empty());

        frame_loop.cancel();
        let engine = frame_loop.engine();
        assert!(engine.stars().is_empty());
        assert!(engine.shooting_stars().is_empty());
        assert!(engine.planets().is_empty());
        assert_eq!(frame_loop.run(&mut FixedStepDriver::new(160, 16, 10)), 0);
    }
}
