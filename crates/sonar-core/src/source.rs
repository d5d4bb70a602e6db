//! The read-only geometry boundary consumed by the sonar.

use glam::Vec2;

use crate::types::{
    AmbientSource, DetectableEntity, GeometryEdge, Rect, RuinWall, TerrainEdge, VesselId,
    VesselInfo,
};

/// Everything the sonar reads from the world.
///
/// Implementations must not be mutated by the sonar; every method is called
/// at most once per tick per source. Empty results are always valid.
pub trait GeometrySource {
    /// Loaded vessels.
    fn vessels(&self) -> Vec<VesselInfo>;

    /// Closed hull loop of a vessel as world-space edges.
    fn hull_edges(&self, vessel: VesselId) -> Vec<GeometryEdge>;

    /// Solid terrain edges in cells within `ring_depth` buckets of `point`.
    fn terrain_edges_near(&self, point: Vec2, ring_depth: u32) -> Vec<TerrainEdge>;

    /// Walls of every ruin whose area overlaps the circle.
    fn ruin_walls(&self, center: Vec2, range: f32) -> Vec<RuinWall>;

    /// Point entities within `range` of `center`.
    fn detectable_entities(&self, center: Vec2, range: f32) -> Vec<DetectableEntity>;

    /// Ambient emitters for passive sonar.
    fn ambient_sources(&self) -> Vec<AmbientSource>;

    /// Height of the level's horizontal boundary, if the level has one.
    fn level_boundary(&self) -> Option<f32>;

    /// The compartment enclosing `point`, if any.
    fn enclosing_compartment(&self, point: Vec2) -> Option<Rect>;
}
