//! Ruins: groups of wall segments inside a bounding area.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use sonar_core::types::{GeometryEdge, Rect, RuinWall};

/// One room-like shape of a ruin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuinShape {
    pub center: Vec2,
    /// Wall segments as endpoint pairs.
    pub walls: Vec<[Vec2; 2]>,
}

impl RuinShape {
    /// Axis-aligned box room with four walls.
    pub fn boxed(rect: Rect) -> Self {
        Self {
            center: rect.center(),
            walls: rect.boundary_edges().iter().map(|e| [e.a, e.b]).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ruin {
    pub area: Rect,
    pub shapes: Vec<RuinShape>,
}

impl Ruin {
    /// Whether any part of the ruin lies within `range` of `center`.
    pub fn in_range(&self, center: Vec2, range: f32) -> bool {
        self.area.intersects_circle(center, range)
    }

    pub fn walls(&self) -> impl Iterator<Item = RuinWall> + '_ {
        self.shapes.iter().flat_map(|shape| {
            shape.walls.iter().map(move |[a, b]| RuinWall {
                edge: GeometryEdge::solid(*a, *b),
                shape_center: shape.center,
            })
        })
    }
}
