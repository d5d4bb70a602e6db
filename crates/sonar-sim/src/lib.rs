//! Sonar simulation.
//!
//! `SensorStepper` advances one sensor per tick: it moves the active and
//! passive wavefronts, samples the geometry they cross into blips, and ages
//! the blips it already has. `SonarWorld` is a ready-made geometry source
//! backed by a hecs world.

pub mod blips;
pub mod ping;
pub mod scenario;
pub mod stepper;
pub mod systems;
pub mod toggle;
pub mod world;

pub use sonar_core as core;

pub use blips::BlipStore;
pub use stepper::{SensorStepper, TickReport};
pub use world::SonarWorld;
