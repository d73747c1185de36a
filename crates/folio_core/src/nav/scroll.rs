//! Header show/hide from scroll direction.
//!
//! # Invariants
//! - Hidden iff the latest sample is strictly greater than the previous one
//!   AND strictly greater than the threshold.
//! - Every sample re-evaluates both conditions; there is no hysteresis.
//! - The first sample compares against position `0`.

use log::debug;

/// Scroll offset (pixels) below which the header never hides.
pub const DEFAULT_SCROLL_THRESHOLD_PX: f64 = 80.0;

/// Reducer state for header visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    pub last_position: f64,
    pub hidden: bool,
}

impl ScrollState {
    /// Folds one scroll sample into the state.
    pub fn reduce(self, current_position: f64, threshold_px: f64) -> Self {
        let current = sanitize_position(current_position);
        Self {
            last_position: current,
            hidden: current > self.last_position && current > threshold_px,
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.hidden
    }
}

/// Per-page holder feeding scroll samples into [`ScrollState`].
#[derive(Debug, Clone)]
pub struct ScrollVisibility {
    state: ScrollState,
    threshold_px: f64,
}

impl Default for ScrollVisibility {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_THRESHOLD_PX)
    }
}

impl ScrollVisibility {
    pub fn new(threshold_px: f64) -> Self {
        Self {
            state: ScrollState::default(),
            threshold_px: sanitize_position(threshold_px),
        }
    }

    /// Applies one sample and returns whether the header is visible.
    pub fn update(&mut self, current_position: f64) -> bool {
        let next = self.state.reduce(current_position, self.threshold_px);
        if next.hidden != self.state.hidden {
            debug!(
                "event=header_visibility module=nav status=ok hidden={} position={}",
                next.hidden, next.last_position
            );
        }
        self.state = next;
        self.state.is_visible()
    }

    pub fn is_visible(&self) -> bool {
        self.state.is_visible()
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn threshold_px(&self) -> f64 {
        self.threshold_px
    }
}

// Negative offsets (overscroll bounce) and NaN collapse to the page top.
fn sanitize_position(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}
