//! ECS components for hecs entities the sonar can detect.
//!
//! Components are plain data structs with no methods.
//! Detection logic lives in the sim crate, not here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// World-space position of an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPosition(pub Vec2);

/// Free-floating item visible on sonar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RadarSignature {
    /// Larger = brighter and bigger blip. Zero or less = invisible.
    pub size: f32,
}

/// Creature limb, detected by mass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Limb {
    pub mass: f32,
    /// Owning creature, for despawning whole bodies.
    pub creature: u32,
}

/// Something that makes noise passive sonar can hear.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SoundEmitter {
    pub range: f32,
}

/// Marks an entity as inside a hull (shielded from sonar).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InsideHull;

/// Marks a disabled entity (not simulated, not detected).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Disabled;
