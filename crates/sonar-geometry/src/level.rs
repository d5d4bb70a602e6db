//! LevelGeometry: every static shape the sonar can bounce off.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use sonar_core::types::{GeometryEdge, Rect, RuinWall, TerrainEdge, VesselId, VesselInfo};

use crate::error::GeometryError;
use crate::hull::VesselHull;
use crate::ruins::Ruin;
use crate::terrain::TerrainMap;

/// Static level geometry, loadable from JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelGeometry {
    pub hulls: Vec<VesselHull>,
    pub terrain: Option<TerrainMap>,
    pub ruins: Vec<Ruin>,
    /// Enclosed rooms a sensor can sit in.
    pub compartments: Vec<Rect>,
    /// Height of the horizontal level boundary.
    pub boundary_y: Option<f32>,
}

impl LevelGeometry {
    /// Load and validate a level from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GeometryError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GeometryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let level = Self::from_json(&text)?;
        log::info!(
            "Loaded level {}: {} hulls, {} terrain cells, {} ruins, {} compartments",
            path.display(),
            level.hulls.len(),
            level.terrain.as_ref().map_or(0, |t| t.cells().len()),
            level.ruins.len(),
            level.compartments.len()
        );
        Ok(level)
    }

    pub fn from_json(text: &str) -> Result<Self, GeometryError> {
        let level: LevelGeometry = serde_json::from_str(text)?;
        level.validate()?;
        Ok(level)
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        self.hulls.iter().try_for_each(VesselHull::validate)
    }

    pub fn hull(&self, id: VesselId) -> Option<&VesselHull> {
        self.hulls.iter().find(|h| h.id == id)
    }

    pub fn vessel_infos(&self) -> Vec<VesselInfo> {
        self.hulls.iter().map(VesselHull::info).collect()
    }

    /// World-space hull edges of one vessel; empty for unknown ids.
    pub fn hull_edges(&self, id: VesselId) -> Vec<GeometryEdge> {
        self.hull(id).map(VesselHull::edges).unwrap_or_default()
    }

    pub fn terrain_edges_near(&self, point: Vec2, ring_depth: u32) -> Vec<TerrainEdge> {
        self.terrain
            .as_ref()
            .map(|t| t.solid_edges_near(point, ring_depth))
            .unwrap_or_default()
    }

    /// Walls of ruins whose area overlaps the circle.
    pub fn ruin_walls(&self, center: Vec2, range: f32) -> Vec<RuinWall> {
        self.ruins
            .iter()
            .filter(|r| r.in_range(center, range))
            .flat_map(Ruin::walls)
            .collect()
    }

    /// First compartment containing `point`.
    pub fn enclosing_compartment(&self, point: Vec2) -> Option<Rect> {
        self.compartments.iter().copied().find(|r| r.contains(point))
    }
}
