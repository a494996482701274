//! Fixed-step easing shared by the crossfades.

/// Remaining distance below which a value snaps onto its target.
const SNAP_EPSILON: f32 = 1e-4;

/// Move `current` toward `target` by at most `step`, never overshooting.
///
/// Values that land within float noise of the target snap to it exactly so
/// a fade always finishes on `0.0` or `1.0`.
pub fn approach(current: f32, target: f32, step: f32) -> f32 {
    let next = if current < target {
        (current + step).min(target)
    } else if current > target {
        (current - step).max(target)
    } else {
        current
    };
    if (next - target).abs() < SNAP_EPSILON {
        target
    } else {
        next
    }
}
