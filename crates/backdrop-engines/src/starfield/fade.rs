//! Global opacity that eases toward the activity signal.

use crate::ease::approach;

/// Smoothed visibility of the whole starfield in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalFade {
    value: f32,
    step: f32,
}

impl GlobalFade {
    /// Start fully transparent.
    pub fn new(step: f32) -> Self {
        Self { value: 0.0, step }
    }

    /// Apply one fade tick toward 1 when `active`, toward 0 otherwise.
    pub fn tick(&mut self, active: bool) {
        let target = if active { 1.0 } else { 0.0 };
        self.value = approach(self.value, target, self.step);
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Whether anything would be visible at the current opacity.
    pub fn is_visible(&self) -> bool {
        self.value > 0.0
    }
}
