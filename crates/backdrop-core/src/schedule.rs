//! Frame scheduling independent of any platform timing primitive.
//!
//! Two timing domains drive every engine:
//!
//! - the frame domain, where a [`FrameDriver`] yields one timestamp per
//!   repaint and a [`FrameLoop`] runs `step` then `render` for it;
//! - the logical tick domain, where an [`IntervalGate`] decides from
//!   elapsed time whether a slower update (a simulation generation, a fade
//!   tick) is due on this frame.
//!
//! Cancellation goes through a shared [`CancelToken`]. Once cancelled, a
//! loop never calls into its engine again.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;

use crate::{Backdrop, Surface};

/// Shared, idempotent cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Fires at most once per `interval_ms` of elapsed time.
#[derive(Debug, Clone)]
pub struct IntervalGate {
    interval_ms: u64,
    last_ms: Option<u64>,
}

impl IntervalGate {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    /// Whether a tick is due at `now_ms`. The first call is always due.
    /// A due tick records `now_ms` as the last tick time.
    pub fn ready(&mut self, now_ms: u64) -> bool {
        let due = match self.last_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.interval_ms,
            None => true,
        };
        if due {
            self.last_ms = Some(now_ms);
        }
        due
    }

    /// Forget the last tick so the next call is due again.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Source of frame timestamps.
pub trait FrameDriver {
    /// Timestamp in milliseconds of the next frame, or `None` when the
    /// driver has no more frames.
    fn next_frame(&mut self) -> Option<u64>;
}

/// Deterministic driver yielding `frames` timestamps spaced `step_ms` apart.
#[derive(Debug, Clone)]
pub struct FixedStepDriver {
    next_ms: u64,
    step_ms: u64,
    remaining: usize,
}

impl FixedStepDriver {
    pub fn new(start_ms: u64, step_ms: u64, frames: usize) -> Self {
        Self {
            next_ms: start_ms,
            step_ms,
            remaining: frames,
        }
    }
}

impl FrameDriver for FixedStepDriver {
    fn next_frame(&mut self) -> Option<u64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let now = self.next_ms;
        self.next_ms += self.step_ms;
        Some(now)
    }
}

/// Outcome of a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    /// The frame ran and the loop wants another.
    Continue,
    /// The loop is cancelled; nothing ran.
    Stopped,
}

/// A mounted engine together with the surface it paints on.
#[derive(Debug)]
pub struct FrameLoop<B, S> {
    engine: B,
    surface: Option<S>,
    token: CancelToken,
    disposed: bool,
}

impl<B: Backdrop, S: Surface> FrameLoop<B, S> {
    /// Mount `engine` on `surface`.
    ///
    /// Without a surface nothing can be drawn, so the loop starts out
    /// cancelled and every frame is a no-op.
    pub fn mount(mut engine: B, surface: Option<S>) -> Self {
        let token = CancelToken::new();
        match &surface {
            Some(surface) => {
                debug!(
                    "mounting backdrop on {}x{} surface",
                    surface.width(),
                    surface.height()
                );
                engine.initialize(surface.width(), surface.height());
            }
            None => {
                debug!("no drawable surface, backdrop stays idle");
                token.cancel();
            }
        }
        Self {
            engine,
            surface,
            token,
            disposed: false,
        }
    }

    /// Run one frame at `now_ms`.
    pub fn frame(&mut self, now_ms: u64) -> LoopStatus {
        if self.token.is_cancelled() {
            self.teardown();
            return LoopStatus::Stopped;
        }
        let Some(surface) = self.surface.as_mut() else {
            return LoopStatus::Stopped;
        };
        self.engine.step(now_ms);
        self.engine.render(surface);
        LoopStatus::Continue
    }

    /// Drive frames from `driver` until it runs dry or the loop is
    /// cancelled. Returns the number of frames that ran.
    pub fn run<D: FrameDriver>(&mut self, driver: &mut D) -> usize {
        let mut frames = 0;
        while let Some(now_ms) = driver.next_frame() {
            if self.frame(now_ms) == LoopStatus::Stopped {
                break;
            }
            frames += 1;
        }
        frames
    }

    /// Resize the surface and the engine together. Ignored once cancelled.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.token.is_cancelled() {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            debug!("resizing backdrop to {width}x{height}");
            surface.resize(width, height);
            self.engine.resize(width, height);
        }
    }

    /// Cancel the loop and dispose the engine.
    pub fn cancel(&mut self) {
        self.token.cancel();
        self.teardown();
    }

    /// A handle that cancels this loop from elsewhere.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn engine(&self) -> &B {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut B {
        &mut self.engine
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    fn teardown(&mut self) {
        if !self.disposed {
            self.engine.dispose();
            self.disposed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PixelCanvas, Rect, Rgba};

    /// Engine that records every call it receives.
    #[derive(Debug, Default)]
    struct Recorder {
        initialized: Option<(u32, u32)>,
        steps: Vec<u64>,
        renders: usize,
        resized: Option<(u32, u32)>,
        disposals: usize,
    }

    impl Backdrop for Recorder {
        fn initialize(&mut self, width: u32, height: u32) {
            self.initialized = Some((width, height));
        }

        fn step(&mut self, now_ms: u64) {
            self.steps.push(now_ms);
        }

        fn render(&mut self, surface: &mut dyn Surface) {
            surface.clear();
            surface.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Rgba::WHITE);
            self.renders += 1;
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.resized = Some((width, height));
        }

        fn dispose(&mut self) {
            self.disposals += 1;
        }
    }

    fn canvas(width: u32, height: u32) -> PixelCanvas {
        PixelCanvas::new(width, height, Rgba::BLACK)
    }

    #[test]
    fn test_interval_gate() {
        let mut gate = IntervalGate::new(200);
        assert!(gate.ready(0));
        assert!(!gate.ready(199));
        assert!(gate.ready(200));
        assert!(!gate.ready(350));
        assert!(gate.ready(400));
        gate.reset();
        assert!(gate.ready(401));
    }

    #[test]
    fn test_interval_gate_ignores_clock_going_backwards() {
        let mut gate = IntervalGate::new(50);
        assert!(gate.ready(1_000));
        assert!(!gate.ready(10));
    }

    #[test]
    fn test_fixed_step_driver() {
        let mut driver = FixedStepDriver::new(100, 16, 3);
        assert_eq!(driver.next_frame(), Some(100));
        assert_eq!(driver.next_frame(), Some(116));
        assert_eq!(driver.next_frame(), Some(132));
        assert_eq!(driver.next_frame(), None);
    }

    #[test]
    fn test_mount_initializes_at_surface_size() {
        let mut frame_loop = FrameLoop::mount(Recorder::default(), Some(canvas(40, 20)));
        assert_eq!(frame_loop.engine().initialized, Some((40, 20)));

        let frames = frame_loop.run(&mut FixedStepDriver::new(0, 16, 5));
        assert_eq!(frames, 5);
        assert_eq!(frame_loop.engine().steps, vec![0, 16, 32, 48, 64]);
        assert_eq!(frame_loop.engine().renders, 5);
        assert!(frame_loop.surface().is_some_and(|s| !s.is_blank()));
    }

    #[test]
    fn test_missing_surface_is_a_silent_no_op() {
        let mut frame_loop: FrameLoop<Recorder, PixelCanvas> =
            FrameLoop::mount(Recorder::default(), None);
        assert!(frame_loop.is_cancelled());
        assert_eq!(frame_loop.frame(0), LoopStatus::Stopped);
        frame_loop.resize(10, 10);
        assert_eq!(frame_loop.engine().initialized, None);
        assert!(frame_loop.engine().steps.is_empty());
        assert_eq!(frame_loop.engine().resized, None);
    }

    #[test]
    fn test_resize_reaches_surface_and_engine() {
        let mut frame_loop = FrameLoop::mount(Recorder::default(), Some(canvas(4, 4)));
        frame_loop.resize(8, 6);
        assert_eq!(frame_loop.engine().resized, Some((8, 6)));
        assert_eq!(frame_loop.surface().map(|s| (s.width(), s.height())), Some((8, 6)));
    }

    #[test]
    fn test_cancel_stops_all_callbacks() {
        let mut frame_loop = FrameLoop::mount(Recorder::default(), Some(canvas(4, 4)));
        frame_loop.frame(0);
        frame_loop.cancel();
        frame_loop.cancel();
        assert_eq!(frame_loop.engine().disposals, 1);

        assert_eq!(frame_loop.frame(16), LoopStatus::Stopped);
        frame_loop.resize(2, 2);
        assert_eq!(frame_loop.engine().steps, vec![0]);
        assert_eq!(frame_loop.engine().resized, None);
    }

    #[test]
    fn test_external_token_cancels_between_frames() {
        let mut frame_loop = FrameLoop::mount(Recorder::default(), Some(canvas(4, 4)));
        let token = frame_loop.token();
        assert_eq!(frame_loop.frame(0), LoopStatus::Continue);
        token.cancel();

        let frames = frame_loop.run(&mut FixedStepDriver::new(16, 16, 10));
        assert_eq!(frames, 0);
        assert_eq!(frame_loop.engine().steps, vec![0]);
        assert_eq!(frame_loop.engine().disposals, 1);
    }
}
