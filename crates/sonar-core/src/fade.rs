//! Fade-in/fade-out highlight advanced explicitly once per tick.

use serde::{Deserialize, Serialize};

/// A one-shot highlight pulse.
///
/// Alpha ramps linearly from 0 to 1 over `fade_in`, then back to 0 over
/// `fade_out`. After that the highlight is finished and reports 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub elapsed: f32,
    pub fade_in: f32,
    pub fade_out: f32,
}

impl Highlight {
    pub fn new(fade_in: f32, fade_out: f32) -> Self {
        Self {
            elapsed: 0.0,
            fade_in: fade_in.max(0.0),
            fade_out: fade_out.max(0.0),
        }
    }

    pub fn total(&self) -> f32 {
        self.fade_in + self.fade_out
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.total()
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt).min(self.total());
    }

    /// Current opacity in `[0, 1]`.
    pub fn alpha(&self) -> f32 {
        if self.is_finished() {
            return 0.0;
        }
        if self.elapsed < self.fade_in {
            return self.elapsed / self.fade_in;
        }
        if self.fade_out <= 0.0 {
            return 0.0;
        }
        1.0 - (self.elapsed - self.fade_in) / self.fade_out
    }
}
