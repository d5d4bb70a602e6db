//! Render snapshot: the read-only view handed to drawing stages.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::SensorMode;
use crate::types::{Blip, SonarTime};

/// Radius pair of one wavefront, in display units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveView {
    pub radius: f32,
    pub prev_radius: f32,
}

/// Complete sensor state for a drawing stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderView {
    pub time: SonarTime,
    pub mode: SensorMode,
    /// Sensor world position the blips are relative to.
    pub origin: Vec2,
    pub display_radius: f32,
    /// Display units per world unit.
    pub display_scale: f32,
    pub active: WaveView,
    /// Passive oscillation value (unitless, scaled per emitter).
    pub passive: WaveView,
    /// Opacity of the toggle indicator highlight.
    pub toggle_highlight: f32,
    pub blips: Vec<Blip>,
}

impl RenderView {
    /// Blip position relative to the display centre, y flipped for screen space.
    pub fn to_display(&self, world: Vec2) -> Vec2 {
        let rel = (world - self.origin) * self.display_scale;
        Vec2::new(rel.x, -rel.y)
    }
}
