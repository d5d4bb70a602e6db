//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Segments shorter than this are treated as degenerate and never sampled.
pub const MIN_EDGE_LENGTH: f32 = 1e-4;

/// A transient sonar marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Blip {
    /// World-space position.
    pub position: Vec2,
    /// Remaining strength. The blip is removed once this reaches zero.
    pub intensity: f32,
    /// Size multiplier for the drawing stage.
    pub visual_scale: f32,
}

impl Blip {
    /// Create a blip. Negative intensities are clamped to zero.
    pub fn new(position: Vec2, intensity: f32, visual_scale: f32) -> Self {
        Self {
            position,
            intensity: intensity.max(0.0),
            visual_scale,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.intensity <= 0.0
    }
}

/// A line segment of world geometry with a solid/non-solid flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryEdge {
    pub a: Vec2,
    pub b: Vec2,
    pub is_solid: bool,
}

impl GeometryEdge {
    pub fn new(a: Vec2, b: Vec2, is_solid: bool) -> Self {
        Self { a, b, is_solid }
    }

    /// Shorthand for a solid edge.
    pub fn solid(a: Vec2, b: Vec2) -> Self {
        Self::new(a, b, true)
    }

    pub fn length(&self) -> f32 {
        self.a.distance(self.b)
    }

    pub fn midpoint(&self) -> Vec2 {
        (self.a + self.b) * 0.5
    }

    /// Zero-length edges cannot be walked.
    pub fn is_degenerate(&self) -> bool {
        self.length() < MIN_EDGE_LENGTH
    }

    /// Same edge moved by `offset`.
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            a: self.a + offset,
            b: self.b + offset,
            is_solid: self.is_solid,
        }
    }
}

/// Axis-aligned rectangle in world space (y up).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Build from any two opposite corners.
    pub fn from_corners(p: Vec2, q: Vec2) -> Self {
        Self {
            min: p.min(q),
            max: p.max(q),
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Whether a circle overlaps this rectangle.
    pub fn intersects_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = center.clamp(self.min, self.max);
        closest.distance_squared(center) <= radius * radius
    }

    /// The four boundary edges: top, bottom, left, right.
    pub fn boundary_edges(&self) -> [GeometryEdge; 4] {
        let top_left = Vec2::new(self.min.x, self.max.y);
        let bottom_right = Vec2::new(self.max.x, self.min.y);
        [
            GeometryEdge::solid(top_left, self.max),
            GeometryEdge::solid(self.min, bottom_right),
            GeometryEdge::solid(top_left, self.min),
            GeometryEdge::solid(self.max, bottom_right),
        ]
    }
}

/// Identifier of a loaded vessel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VesselId(pub u32);

/// What the sensor needs to know about a vessel to decide whether to sample it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselInfo {
    pub id: VesselId,
    pub position: Vec2,
    /// Vessels currently docked to this one.
    pub docked_to: Vec<VesselId>,
}

/// A solid terrain edge together with the centre of the cell that owns it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainEdge {
    pub edge: GeometryEdge,
    pub cell_center: Vec2,
}

/// A ruin wall together with the centre of its enclosing shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuinWall {
    pub edge: GeometryEdge,
    pub shape_center: Vec2,
}

/// External emitter read by passive sonar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientSource {
    pub position: Vec2,
    /// Distance over which the emitter can be heard. Non-positive = silent.
    pub emission_range: f32,
}

/// How a point entity reflects the sonar ping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Detectable {
    /// A free-floating item with a radar size.
    Item { size: f32 },
    /// A creature limb, detected by mass.
    Limb { mass: f32 },
}

/// A point-like entity the sonar can see.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectableEntity {
    pub position: Vec2,
    pub detectable: Detectable,
    /// Entities inside a hull are shielded from the sonar.
    pub inside_hull: bool,
    /// Disabled creatures are not drawn.
    pub enabled: bool,
}

/// Where the sensor is this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorContext {
    pub position: Vec2,
    /// Vessel carrying the sensor, if any.
    pub vessel: Option<VesselId>,
}

impl SensorContext {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            vessel: None,
        }
    }

    pub fn aboard(position: Vec2, vessel: VesselId) -> Self {
        Self {
            position,
            vessel: Some(vessel),
        }
    }
}

/// Simulation time tracking for one sensor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SonarTime {
    /// Number of completed ticks.
    pub tick: u64,
    /// Accumulated simulated seconds.
    pub elapsed_secs: f64,
}

impl SonarTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += dt as f64;
    }
}
