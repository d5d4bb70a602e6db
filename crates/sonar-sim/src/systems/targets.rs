//! Target collection: every geometry source normalized to edges and points.
//!
//! Source-specific rules (facing tests, docking, own-hull jitter, per-kind
//! step sizes) are applied here so the sampler only ever sees
//! `SampleTarget`s.

use glam::Vec2;
use rand_chacha::ChaCha8Rng;

use sonar_core::config::{SamplingProfile, SonarConfig};
use sonar_core::constants::{ITEM_MAX_SCALE, LIMB_MAX_SCALE, POINT_MIN_INTENSITY, POINT_MIN_SCALE};
use sonar_core::enums::SourceKind;
use sonar_core::source::GeometrySource;
use sonar_core::types::{
    AmbientSource, Blip, Detectable, DetectableEntity, GeometryEdge, SensorContext, VesselId,
};

use crate::systems::sampler::{random_offset, Band};

/// A segment to walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeTarget {
    pub edge: GeometryEdge,
    /// World units between sample points.
    pub line_step: f32,
    /// Initial outward step in display units.
    pub depth_step: f32,
    /// World distance over which intensity falls to zero.
    pub source_range: f32,
    pub strength: f32,
}

impl EdgeTarget {
    fn from_profile(edge: GeometryEdge, profile: &SamplingProfile, range: f32, strength: f32) -> Self {
        Self {
            edge,
            line_step: profile.line_step,
            depth_step: profile.depth_step,
            source_range: range,
            strength: profile.strength_or(strength),
        }
    }
}

/// A single blip candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointTarget {
    pub position: Vec2,
    /// Maximum positional jitter (world units).
    pub jitter: f32,
    pub intensity: f32,
    pub visual_scale: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleTarget {
    Edge(EdgeTarget),
    Point(PointTarget),
}

/// Targets sampled against one band.
#[derive(Debug, Clone, Default)]
pub struct TargetBatch {
    pub band: Band,
    pub targets: Vec<(SourceKind, SampleTarget)>,
}

impl TargetBatch {
    fn new(band: Band) -> Self {
        Self {
            band,
            targets: Vec::new(),
        }
    }

    fn push_edge(&mut self, kind: SourceKind, target: EdgeTarget) {
        self.targets.push((kind, SampleTarget::Edge(target)));
    }

    fn push_point(&mut self, kind: SourceKind, target: PointTarget) {
        self.targets.push((kind, SampleTarget::Point(target)));
    }

    pub fn count(&self, kind: SourceKind) -> usize {
        self.targets.iter().filter(|(k, _)| *k == kind).count()
    }
}

/// `clamp` that tolerates `max < min` (the lower bound wins).
fn lenient_clamp(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

/// Point target for an entity, or `None` when it cannot be seen.
pub fn point_for_entity(entity: &DetectableEntity, strength: f32) -> Option<(SourceKind, PointTarget)> {
    if entity.inside_hull || !entity.enabled {
        return None;
    }
    match entity.detectable {
        Detectable::Item { size } if size > 0.0 => Some((
            SourceKind::Item,
            PointTarget {
                position: entity.position,
                jitter: size,
                intensity: lenient_clamp(size, POINT_MIN_INTENSITY, strength),
                visual_scale: lenient_clamp(size * 0.1, POINT_MIN_SCALE, ITEM_MAX_SCALE),
            },
        )),
        Detectable::Limb { mass } => Some((
            SourceKind::Limb,
            PointTarget {
                position: entity.position,
                jitter: mass / 10.0,
                intensity: lenient_clamp(mass, POINT_MIN_INTENSITY, strength),
                visual_scale: lenient_clamp(mass * 0.1, POINT_MIN_SCALE, LIMB_MAX_SCALE),
            },
        )),
        Detectable::Item { .. } => None,
    }
}

/// Everything the active sweep samples this tick.
pub fn collect_active(
    ctx: &SensorContext,
    source: &dyn GeometrySource,
    config: &SonarConfig,
    band: Band,
    rng: &mut ChaCha8Rng,
) -> TargetBatch {
    let mut batch = TargetBatch::new(band);
    let strength = config.active_strength;
    let range = config.range;
    let src = ctx.position;

    if !config.wall_penetration {
        if let Some(rect) = source.enclosing_compartment(src) {
            for edge in rect.boundary_edges() {
                batch.push_edge(
                    SourceKind::Compartment,
                    EdgeTarget::from_profile(edge, &config.profiles.compartment, range, strength),
                );
            }
            return batch;
        }
    }

    collect_hulls(ctx, source, config, rng, &mut batch);

    if let Some(boundary_y) = source.level_boundary() {
        if let Some(edge) = boundary_edge(src, boundary_y, range) {
            batch.push_edge(
                SourceKind::LevelBoundary,
                EdgeTarget::from_profile(edge, &config.profiles.level_boundary, range, strength),
            );
        }
    }

    let terrain = &config.profiles.terrain;
    for t in source.terrain_edges_near(src, config.terrain_ring_depth) {
        let to_cell = t.cell_center - src;
        // Edges on the far side of their cell are hidden behind it.
        if to_cell.dot(t.edge.midpoint() - t.cell_center) > 0.0 {
            continue;
        }
        let facing = (t.edge.a - t.edge.b)
            .normalize_or_zero()
            .dot(to_cell.normalize_or_zero());
        let mut target = EdgeTarget::from_profile(t.edge, terrain, range, strength);
        target.depth_step = terrain.depth_step * (facing.abs() + 1.0);
        batch.push_edge(SourceKind::Terrain, target);
    }

    for wall in source.ruin_walls(src, range) {
        let facing = (wall.shape_center - src)
            .normalize_or_zero()
            .dot((wall.edge.midpoint() - wall.shape_center).normalize_or_zero());
        if facing > 0.0 {
            continue;
        }
        batch.push_edge(
            SourceKind::Ruin,
            EdgeTarget::from_profile(wall.edge, &config.profiles.ruin, range, strength),
        );
    }

    for entity in source.detectable_entities(src, range) {
        if let Some((kind, target)) = point_for_entity(&entity, strength) {
            batch.push_point(kind, target);
        }
    }

    batch
}

fn collect_hulls(
    ctx: &SensorContext,
    source: &dyn GeometrySource,
    config: &SonarConfig,
    rng: &mut ChaCha8Rng,
    batch: &mut TargetBatch,
) {
    let vessels = source.vessels();
    let docked: &[VesselId] = ctx
        .vessel
        .and_then(|own| vessels.iter().find(|v| v.id == own))
        .map(|v| v.docked_to.as_slice())
        .unwrap_or_default();

    for vessel in &vessels {
        let is_own = ctx.vessel == Some(vessel.id);
        if is_own && config.wall_penetration {
            continue;
        }
        if docked.contains(&vessel.id) {
            continue;
        }
        for mut edge in source.hull_edges(vessel.id) {
            if is_own {
                edge.a += random_offset(rng, config.own_hull_jitter);
                edge.b += random_offset(rng, config.own_hull_jitter);
            }
            batch.push_edge(
                SourceKind::Hull,
                EdgeTarget::from_profile(
                    edge,
                    &config.profiles.hull,
                    config.range,
                    config.active_strength,
                ),
            );
        }
    }
}

/// Horizontal boundary edge centred under `src`, if the boundary is within `range`.
fn boundary_edge(src: Vec2, boundary_y: f32, range: f32) -> Option<GeometryEdge> {
    if boundary_y - src.y >= range {
        return None;
    }
    Some(GeometryEdge::solid(
        Vec2::new(src.x - range, boundary_y),
        Vec2::new(src.x + range, boundary_y),
    ))
}

/// What one audible emitter contributes this tick.
#[derive(Debug, Clone, Default)]
pub struct PassiveTargets {
    /// Geometry lit by the emitter's ring.
    pub batch: TargetBatch,
    /// The emitter itself, heard directly while the oscillation is positive.
    pub direct: Option<Blip>,
}

/// Targets heard from one ambient emitter this tick.
///
/// Returns `None` when the emitter is silent or out of earshot.
pub fn collect_passive(
    sensor: Vec2,
    emitter: &AmbientSource,
    source: &dyn GeometrySource,
    config: &SonarConfig,
    oscillation: Band,
) -> Option<PassiveTargets> {
    let range = emitter.emission_range;
    if range <= 0.0 || emitter.position.distance(sensor) >= range {
        return None;
    }

    let mut batch = TargetBatch::new(oscillation.scaled(range * config.passive_band_scale));

    if let Some(boundary_y) = source.level_boundary() {
        if let Some(edge) = boundary_edge(emitter.position, boundary_y, range) {
            batch.push_edge(
                SourceKind::LevelBoundary,
                EdgeTarget::from_profile(
                    edge,
                    &config.profiles.level_boundary,
                    range,
                    config.passive_strength,
                ),
            );
        }
    }

    let direct = (oscillation.radius > 0.0).then(|| Blip::new(emitter.position, 1.0, 1.0));

    Some(PassiveTargets { batch, direct })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(detectable: Detectable) -> DetectableEntity {
        DetectableEntity {
            position: Vec2::new(10.0, 0.0),
            detectable,
            inside_hull: false,
            enabled: true,
        }
    }

    #[test]
    fn test_item_point_derivation() {
        let (kind, p) = point_for_entity(&entity(Detectable::Item { size: 50.0 }), 2.0).unwrap();
        assert_eq!(kind, SourceKind::Item);
        assert_eq!(p.jitter, 50.0);
        assert_eq!(p.intensity, 2.0);
        assert_eq!(p.visual_scale, 5.0);

        let (_, tiny) = point_for_entity(&entity(Detectable::Item { size: 0.05 }), 2.0).unwrap();
        assert_eq!(tiny.intensity, 0.1);
        assert_eq!(tiny.visual_scale, 0.1);

        assert!(point_for_entity(&entity(Detectable::Item { size: 0.0 }), 2.0).is_none());
    }

    #[test]
    fn test_limb_point_derivation() {
        let (kind, p) = point_for_entity(&entity(Detectable::Limb { mass: 40.0 }), 2.0).unwrap();
        assert_eq!(kind, SourceKind::Limb);
        assert_eq!(p.jitter, 4.0);
        assert_eq!(p.intensity, 2.0);
        assert_eq!(p.visual_scale, 2.0);
    }

    #[test]
    fn test_weak_ping_clamp_does_not_panic() {
        let (_, p) = point_for_entity(&entity(Detectable::Limb { mass: 5.0 }), 0.05).unwrap();
        assert_eq!(p.intensity, 0.1);
    }

    #[test]
    fn test_shielded_entities_skipped() {
        let mut inside = entity(Detectable::Item { size: 10.0 });
        inside.inside_hull = true;
        assert!(point_for_entity(&inside, 2.0).is_none());

        let mut disabled = entity(Detectable::Limb { mass: 10.0 });
        disabled.enabled = false;
        assert!(point_for_entity(&disabled, 2.0).is_none());
    }

    #[test]
    fn test_boundary_edge_only_within_range() {
        assert!(boundary_edge(Vec2::new(0.0, 0.0), 20_000.0, 10_000.0).is_none());
        let edge = boundary_edge(Vec2::new(500.0, 0.0), 8_000.0, 10_000.0).unwrap();
        assert_eq!(edge.a, Vec2::new(-9_500.0, 8_000.0));
        assert_eq!(edge.b, Vec2::new(10_500.0, 8_000.0));
    }
}
