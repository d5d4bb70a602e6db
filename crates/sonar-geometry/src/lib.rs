//! Level geometry for the sonar simulation.
//!
//! Vessel hulls, terrain cells, ruins and compartments, plus loading from
//! JSON and a synthetic cave generator.

pub use sonar_core as core;

pub mod error;
pub mod hull;
pub mod level;
pub mod ruins;
pub mod terrain;

// Re-export key types for convenience.
pub use error::GeometryError;
pub use hull::VesselHull;
pub use level::LevelGeometry;
pub use ruins::{Ruin, RuinShape};
pub use terrain::{CaveParams, TerrainCell, TerrainMap};
