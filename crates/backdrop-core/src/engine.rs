//! The contract every animated backdrop implements.

use crate::Surface;

/// An animated background engine.
///
/// Engines own all of their simulation state. Time is injected through
/// [`Backdrop::step`] so the same engine runs identically under a real
/// display clock or a fixed-step test harness.
pub trait Backdrop {
    /// Build fresh state for a `width` x `height` pixel viewport.
    fn initialize(&mut self, width: u32, height: u32);

    /// Advance time-gated logic to `now_ms` on a monotonic clock.
    fn step(&mut self, now_ms: u64);

    /// Paint the current state. The surface is cleared first.
    fn render(&mut self, surface: &mut dyn Surface);

    /// Replace size-dependent state for a new viewport.
    fn resize(&mut self, width: u32, height: u32);

    /// Drop owned state and timers. Later calls to `step` and `render` do
    /// nothing until the engine is initialized again.
    fn dispose(&mut self);
}
