//! Core types and definitions for the sonar simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! blips, geometry edges, the geometry-source boundary, configuration,
//! commands, events, snapshots and constants. It has no dependency on
//! any rendering or networking framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod fade;
pub mod source;
pub mod state;
pub mod types;

pub use config::{ConfigError, SonarConfig};
pub use source::GeometrySource;
pub use types::{Blip, GeometryEdge, Rect};

#[cfg(test)]
mod tests;
