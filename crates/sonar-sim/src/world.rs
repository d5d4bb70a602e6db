//! SonarWorld: static level geometry plus the hecs world of mobile entities.
//!
//! Implements `GeometrySource`, so a sensor can be stepped against it
//! directly.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use sonar_core::components::*;
use sonar_core::source::GeometrySource;
use sonar_core::types::{
    AmbientSource, Detectable, DetectableEntity, GeometryEdge, Rect, RuinWall, TerrainEdge,
    VesselId, VesselInfo,
};
use sonar_geometry::LevelGeometry;

pub struct SonarWorld {
    pub level: LevelGeometry,
    pub entities: World,
    next_creature: u32,
    despawn_buffer: Vec<Entity>,
}

impl SonarWorld {
    pub fn new(level: LevelGeometry) -> Self {
        Self {
            level,
            entities: World::new(),
            next_creature: 0,
            despawn_buffer: Vec::new(),
        }
    }

    /// Spawn a free-floating item.
    pub fn spawn_item(&mut self, position: Vec2, size: f32) -> Entity {
        self.entities
            .spawn((WorldPosition(position), RadarSignature { size }))
    }

    /// Spawn a creature made of limbs given as `(offset, mass)` pairs.
    /// Returns the creature id shared by its limbs.
    pub fn spawn_creature(&mut self, position: Vec2, limbs: &[(Vec2, f32)]) -> u32 {
        let creature = self.next_creature;
        self.next_creature += 1;
        for &(offset, mass) in limbs {
            self.entities
                .spawn((WorldPosition(position + offset), Limb { mass, creature }));
        }
        creature
    }

    /// Spawn `count` small creatures scattered within `radius` of `center`.
    pub fn spawn_school(
        &mut self,
        rng: &mut ChaCha8Rng,
        center: Vec2,
        radius: f32,
        count: usize,
    ) -> Vec<u32> {
        (0..count)
            .map(|_| {
                let angle = rng.gen_range(0.0..std::f32::consts::TAU);
                let dist = rng.gen_range(0.0..=radius);
                let body = center + Vec2::from_angle(angle) * dist;
                let limbs: Vec<(Vec2, f32)> = (0..rng.gen_range(2..=5))
                    .map(|i| (Vec2::new(i as f32 * 40.0, 0.0), rng.gen_range(5.0..30.0)))
                    .collect();
                self.spawn_creature(body, &limbs)
            })
            .collect()
    }

    /// Spawn a noise emitter heard by passive sonar.
    pub fn spawn_emitter(&mut self, position: Vec2, range: f32) -> Entity {
        self.entities
            .spawn((WorldPosition(position), SoundEmitter { range }))
    }

    pub fn set_inside_hull(&mut self, entity: Entity, inside: bool) {
        if !self.entities.contains(entity) {
            log::warn!("set_inside_hull on missing entity {entity:?}");
            return;
        }
        if inside {
            let _ = self.entities.insert_one(entity, InsideHull);
        } else {
            let _ = self.entities.remove_one::<InsideHull>(entity);
        }
    }

    /// Enable or disable every limb of a creature.
    pub fn set_creature_enabled(&mut self, creature: u32, enabled: bool) {
        let limbs = self.creature_limbs(creature);
        for entity in limbs {
            if enabled {
                let _ = self.entities.remove_one::<Disabled>(entity);
            } else {
                let _ = self.entities.insert_one(entity, Disabled);
            }
        }
    }

    /// Remove every limb of a creature.
    pub fn despawn_creature(&mut self, creature: u32) {
        self.despawn_buffer.clear();
        for (entity, limb) in self.entities.query_mut::<&Limb>() {
            if limb.creature == creature {
                self.despawn_buffer.push(entity);
            }
        }
        for entity in self.despawn_buffer.drain(..) {
            let _ = self.entities.despawn(entity);
        }
    }

    fn creature_limbs(&self, creature: u32) -> Vec<Entity> {
        self.entities
            .query::<&Limb>()
            .iter()
            .filter(|(_, limb)| limb.creature == creature)
            .map(|(entity, _)| entity)
            .collect()
    }
}

impl GeometrySource for SonarWorld {
    fn vessels(&self) -> Vec<VesselInfo> {
        self.level.vessel_infos()
    }

    fn hull_edges(&self, vessel: VesselId) -> Vec<GeometryEdge> {
        self.level.hull_edges(vessel)
    }

    fn terrain_edges_near(&self, point: Vec2, ring_depth: u32) -> Vec<TerrainEdge> {
        self.level.terrain_edges_near(point, ring_depth)
    }

    fn ruin_walls(&self, center: Vec2, range: f32) -> Vec<RuinWall> {
        self.level.ruin_walls(center, range)
    }

    /// Items and placed limbs within `range`. Limbs without a world position
    /// have not been placed yet and are never reported.
    fn detectable_entities(&self, center: Vec2, range: f32) -> Vec<DetectableEntity> {
        let range_sq = range * range;
        let mut found = Vec::new();

        let mut items = self
            .entities
            .query::<(&WorldPosition, &RadarSignature, Option<&InsideHull>)>();
        for (_, (pos, sig, inside)) in items.iter() {
            if pos.0.distance_squared(center) <= range_sq {
                found.push(DetectableEntity {
                    position: pos.0,
                    detectable: Detectable::Item { size: sig.size },
                    inside_hull: inside.is_some(),
                    enabled: true,
                });
            }
        }

        let mut limbs = self.entities.query::<(
            &WorldPosition,
            &Limb,
            Option<&InsideHull>,
            Option<&Disabled>,
        )>();
        for (_, (pos, limb, inside, disabled)) in limbs.iter() {
            if pos.0.distance_squared(center) <= range_sq {
                found.push(DetectableEntity {
                    position: pos.0,
                    detectable: Detectable::Limb { mass: limb.mass },
                    inside_hull: inside.is_some(),
                    enabled: disabled.is_none(),
                });
            }
        }

        found
    }

    fn ambient_sources(&self) -> Vec<AmbientSource> {
        self.entities
            .query::<(&WorldPosition, &SoundEmitter)>()
            .iter()
            .map(|(_, (pos, emitter))| AmbientSource {
                position: pos.0,
                emission_range: emitter.range,
            })
            .collect()
    }

    fn level_boundary(&self) -> Option<f32> {
        self.level.boundary_y
    }

    fn enclosing_compartment(&self, point: Vec2) -> Option<Rect> {
        self.level.enclosing_compartment(point)
    }
}
