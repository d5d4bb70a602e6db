//! Built-in scenarios: a synthetic level with every kind of sonar target.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use sonar_core::types::{Rect, SensorContext, VesselId};
use sonar_geometry::{
    CaveParams, GeometryError, LevelGeometry, Ruin, RuinShape, TerrainMap, VesselHull,
};

use crate::world::SonarWorld;

/// A ready-to-step world and the sensor placed in it.
pub struct Scenario {
    pub world: SonarWorld,
    pub sensor: SensorContext,
}

pub const OWN_VESSEL: VesselId = VesselId(1);
pub const SHUTTLE: VesselId = VesselId(2);
pub const STRANGER: VesselId = VesselId(3);

/// Submarine at the centre of a random cave, with a docked shuttle, a
/// second vessel, a ruin, wildlife, drifting items and noise emitters.
pub fn build_synthetic(seed: u64) -> Result<Scenario, GeometryError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let terrain = TerrainMap::synthetic_cave(&CaveParams {
        seed,
        ..CaveParams::default()
    })?;

    let mut own = VesselHull::new(OWN_VESSEL, Vec2::ZERO, sub_outline(600.0, 200.0));
    own.docked_to.push(SHUTTLE);
    let mut shuttle = VesselHull::new(SHUTTLE, Vec2::new(0.0, 320.0), sub_outline(150.0, 60.0));
    shuttle.docked_to.push(OWN_VESSEL);
    let stranger = VesselHull::new(STRANGER, Vec2::new(4_500.0, 1_200.0), sub_outline(450.0, 150.0));

    let ruin_area = Rect::from_corners(Vec2::new(-6_000.0, 2_500.0), Vec2::new(-4_000.0, 4_000.0));
    let ruin = Ruin {
        area: ruin_area,
        shapes: vec![
            RuinShape::boxed(Rect::from_corners(
                Vec2::new(-6_000.0, 2_500.0),
                Vec2::new(-5_000.0, 4_000.0),
            )),
            RuinShape::boxed(Rect::from_corners(
                Vec2::new(-5_000.0, 2_500.0),
                Vec2::new(-4_000.0, 3_200.0),
            )),
        ],
    };

    let level = LevelGeometry {
        hulls: vec![own, shuttle, stranger],
        terrain: Some(terrain),
        ruins: vec![ruin],
        compartments: vec![
            Rect::from_corners(Vec2::new(-300.0, -100.0), Vec2::new(0.0, 100.0)),
            Rect::from_corners(Vec2::new(0.0, -100.0), Vec2::new(300.0, 100.0)),
        ],
        boundary_y: Some(9_000.0),
    };
    level.validate()?;

    let mut world = SonarWorld::new(level);
    for _ in 0..12 {
        let pos = Vec2::new(rng.gen_range(-8_000.0..8_000.0), rng.gen_range(-8_000.0..8_000.0));
        world.spawn_item(pos, rng.gen_range(10.0..120.0));
    }
    world.spawn_school(&mut rng, Vec2::new(2_500.0, -2_000.0), 800.0, 6);
    world.spawn_school(&mut rng, Vec2::new(-3_000.0, -4_000.0), 1_500.0, 4);
    world.spawn_emitter(Vec2::new(2_500.0, -2_000.0), 5_000.0);
    world.spawn_emitter(Vec2::new(4_500.0, 1_200.0), 8_000.0);

    Ok(Scenario {
        world,
        sensor: SensorContext::aboard(Vec2::new(150.0, 0.0), OWN_VESSEL),
    })
}

/// Elongated hexagonal hull outline.
fn sub_outline(half_length: f32, half_height: f32) -> Vec<Vec2> {
    vec![
        Vec2::new(-half_length, 0.0),
        Vec2::new(-half_length * 0.7, -half_height),
        Vec2::new(half_length * 0.7, -half_height),
        Vec2::new(half_length, 0.0),
        Vec2::new(half_length * 0.7, half_height),
        Vec2::new(-half_length * 0.7, half_height),
    ]
}
