//! Vessel hulls: closed vertex loops relative to the vessel position.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use sonar_core::types::{GeometryEdge, VesselId, VesselInfo};

use crate::error::GeometryError;

/// Outline of one vessel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselHull {
    pub id: VesselId,
    /// World position of the vessel origin.
    pub position: Vec2,
    /// Closed loop in vessel-local coordinates. The last vertex connects back to the first.
    pub vertices: Vec<Vec2>,
    #[serde(default)]
    pub docked_to: Vec<VesselId>,
}

impl VesselHull {
    pub fn new(id: VesselId, position: Vec2, vertices: Vec<Vec2>) -> Self {
        Self {
            id,
            position,
            vertices,
            docked_to: Vec::new(),
        }
    }

    pub fn info(&self) -> VesselInfo {
        VesselInfo {
            id: self.id,
            position: self.position,
            docked_to: self.docked_to.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.vertices.len() < 3 {
            return Err(GeometryError::DegenerateHull(self.id.0));
        }
        Ok(())
    }

    /// World-space edges of the closed loop. Zero-length edges are dropped.
    pub fn edges(&self) -> Vec<GeometryEdge> {
        let n = self.vertices.len();
        if n < 2 {
            return Vec::new();
        }
        let mut edges = Vec::with_capacity(n);
        for i in 0..n {
            let a = self.vertices[i] + self.position;
            let b = self.vertices[(i + 1) % n] + self.position;
            let edge = GeometryEdge::solid(a, b);
            if edge.is_degenerate() {
                log::warn!("Skipping zero-length hull edge {i} of vessel {}", self.id.0);
                continue;
            }
            edges.push(edge);
        }
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_hull() -> VesselHull {
        VesselHull::new(
            VesselId(1),
            Vec2::new(1000.0, 0.0),
            vec![
                Vec2::new(-10.0, -10.0),
                Vec2::new(10.0, -10.0),
                Vec2::new(10.0, 10.0),
                Vec2::new(-10.0, 10.0),
            ],
        )
    }

    #[test]
    fn test_edges_close_the_loop_in_world_space() {
        let hull = square_hull();
        let edges = hull.edges();
        assert_eq!(edges.len(), 4);
        // Last edge returns to the first vertex.
        assert_eq!(edges[3].b, edges[0].a);
        assert_eq!(edges[0].a, Vec2::new(990.0, -10.0));
        assert!(edges.iter().all(|e| e.is_solid));
    }

    #[test]
    fn test_duplicate_vertex_edge_is_skipped() {
        let mut hull = square_hull();
        hull.vertices.insert(1, Vec2::new(-10.0, -10.0));
        assert_eq!(hull.edges().len(), 4);
    }

    #[test]
    fn test_validate_rejects_degenerate_hull() {
        let hull = VesselHull::new(VesselId(7), Vec2::ZERO, vec![Vec2::ZERO, Vec2::X]);
        assert!(matches!(
            hull.validate(),
            Err(GeometryError::DegenerateHull(7))
        ));
        assert!(square_hull().validate().is_ok());
    }

    #[test]
    fn test_info_carries_docking() {
        let mut hull = square_hull();
        hull.docked_to.push(VesselId(2));
        let info = hull.info();
        assert_eq!(info.id, VesselId(1));
        assert_eq!(info.docked_to, vec![VesselId(2)]);
    }
}
