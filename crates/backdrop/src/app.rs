//! The terminal viewer: owns the mounted backdrop and the event loop.

use std::time::{Duration, Instant};

use backdrop_config::{Config, EngineKind};
use backdrop_core::schedule::FrameLoop;
use backdrop_core::{ActivitySignal, PixelCanvas, Rgba};
use backdrop_engines::{GameOfLife, StarField};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
};

use crate::widget::{HalfBlockCanvas, pixel_size};

/// Background used when the configured color does not parse.
const FALLBACK_BACKGROUND: Rgba = Rgba::rgb(11, 13, 23);

/// Scroll offset change per line and per page, in pixels.
const LINE_SCROLL: f32 = 2.0;
const PAGE_SCROLL: f32 = 20.0;

/// The one engine currently on screen.
#[derive(Debug)]
enum Mounted {
    Life(FrameLoop<GameOfLife, PixelCanvas>),
    Starfield(FrameLoop<StarField, PixelCanvas>),
}

impl Mounted {
    fn frame(&mut self, now_ms: u64, scroll_offset: f32) {
        match self {
            Mounted::Life(frame_loop) => {
                frame_loop.frame(now_ms);
            }
            Mounted::Starfield(frame_loop) => {
                frame_loop.engine_mut().set_scroll_offset(scroll_offset);
                frame_loop.frame(now_ms);
            }
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        match self {
            Mounted::Life(frame_loop) => frame_loop.resize(width, height),
            Mounted::Starfield(frame_loop) => frame_loop.resize(width, height),
        }
    }

    fn cancel(&mut self) {
        match self {
            Mounted::Life(frame_loop) => frame_loop.cancel(),
            Mounted::Starfield(frame_loop) => frame_loop.cancel(),
        }
    }

    fn canvas(&self) -> Option<&PixelCanvas> {
        match self {
            Mounted::Life(frame_loop) => frame_loop.surface(),
            Mounted::Starfield(frame_loop) => frame_loop.surface(),
        }
    }

    fn kind(&self) -> EngineKind {
        match self {
            Mounted::Life(_) => EngineKind::Life,
            Mounted::Starfield(_) => EngineKind::Starfield,
        }
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    /// Engine to show; the mounted one follows it.
    engine: EngineKind,
    /// Activity flag the starfield fades toward.
    activity: ActivitySignal,
    mounted: Option<Mounted>,
    /// Virtual page scroll offset in pixels, fed into the parallax.
    scroll_offset: f32,
    /// Pixel size of the last mount or resize.
    viewport: (u32, u32),
    /// Mounts so far, mixed into a configured seed so reseeds differ.
    mounts: u64,
    background: Rgba,
    started: Instant,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let background = Rgba::parse(&config.background).unwrap_or_else(|| {
            warn!("invalid background color {:?}, using default", config.background);
            FALLBACK_BACKGROUND
        });
        Self {
            running: false,
            engine: config.engine,
            activity: ActivitySignal::new(config.start_active),
            mounted: None,
            scroll_offset: 0.0,
            viewport: (0, 0),
            mounts: 0,
            background,
            started: Instant::now(),
            config,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        let size = terminal.size()?;
        let (width, height) = pixel_size(size.width, size.height);
        self.mount(width, height);

        let frame_interval = Duration::from_millis(self.config.frame_interval_ms);
        let mut next_frame = Instant::now();
        while self.running {
            if Instant::now() >= next_frame {
                self.advance(self.elapsed_ms());
                terminal.draw(|frame| self.render(frame))?;
                next_frame = Instant::now() + frame_interval;
            }
            self.handle_crossterm_events(next_frame.saturating_duration_since(Instant::now()))?;
        }

        self.unmount();
        Ok(())
    }

    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Mount the selected engine on a fresh canvas, replacing any other.
    fn mount(&mut self, width: u32, height: u32) {
        self.unmount();
        self.viewport = (width, height);
        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(self.mounts)),
            None => StdRng::from_os_rng(),
        };
        self.mounts += 1;

        let canvas = Some(PixelCanvas::new(width, height, self.background));
        let mounted = match self.engine {
            EngineKind::Life => {
                let engine = GameOfLife::with_rng(self.config.life.clone(), rng);
                Mounted::Life(FrameLoop::mount(engine, canvas))
            }
            EngineKind::Starfield => {
                let engine = StarField::with_rng(
                    self.config.starfield.clone(),
                    self.activity.clone(),
                    rng,
                );
                Mounted::Starfield(FrameLoop::mount(engine, canvas))
            }
        };
        debug!("mounted {} at {width}x{height}", self.engine.name());
        self.mounted = Some(mounted);
    }

    fn unmount(&mut self) {
        if let Some(mut mounted) = self.mounted.take() {
            mounted.cancel();
        }
    }

    /// Run one backdrop frame at `now_ms`.
    fn advance(&mut self, now_ms: u64) {
        if let Some(mounted) = self.mounted.as_mut() {
            mounted.frame(now_ms, self.scroll_offset);
        }
    }

    fn resize(&mut self, columns: u16, rows: u16) {
        let (width, height) = pixel_size(columns, rows);
        self.viewport = (width, height);
        if let Some(mounted) = self.mounted.as_mut() {
            mounted.resize(width, height);
        }
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        if let Some(canvas) = self.mounted.as_ref().and_then(Mounted::canvas) {
            frame.render_widget(HalfBlockCanvas::new(canvas), area);
        }

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Backdrop
            Constraint::Length(1), // Help text
        ])
        .split(area);

        let activity = if self.activity.get() { "on" } else { "off" };
        let help = Line::from(vec![
            "q".bold().white(),
            " quit  ".dark_gray(),
            "space".bold().white(),
            format!(" activity: {activity}  ").dark_gray(),
            "tab".bold().white(),
            format!(" engine: {}  ", self.engine.name()).dark_gray(),
            "j/k".bold().white(),
            format!(" scroll: {:.0}  ", self.scroll_offset).dark_gray(),
            "r".bold().white(),
            " reseed".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most `timeout` so the next frame is not delayed.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(columns, rows) => self.resize(columns, rows),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char(' ')) => self.toggle_activity(),
            (_, KeyCode::Tab) => self.switch_engine(),
            (_, KeyCode::Char('r')) => self.remount(),
            (_, KeyCode::Char('j') | KeyCode::Down) => self.scroll(LINE_SCROLL),
            (_, KeyCode::Char('k') | KeyCode::Up) => self.scroll(-LINE_SCROLL),
            (_, KeyCode::PageDown) => self.scroll(PAGE_SCROLL),
            (_, KeyCode::PageUp) => self.scroll(-PAGE_SCROLL),
            _ => {}
        }
    }

    fn toggle_activity(&mut self) {
        let active = self.activity.toggle();
        debug!("activity {}", if active { "on" } else { "off" });
    }

    /// Swap to the other engine. Only one is ever mounted.
    fn switch_engine(&mut self) {
        self.engine = self.engine.next();
        self.remount();
    }

    fn remount(&mut self) {
        if self.mounted.is_some() {
            let (width, height) = self.viewport;
            self.mount(width, height);
        }
    }

    /// Move the virtual page; it cannot scroll above the top.
    fn scroll(&mut self, delta: f32) {
        self.scroll_offset = (self.scroll_offset + delta).max(0.0);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
