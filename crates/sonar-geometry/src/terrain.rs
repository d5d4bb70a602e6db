//! Terrain: a planar subdivision into cells bounded by solid/non-solid edges.
//!
//! Cells are bucketed in a uniform grid so the sonar can ask for the cells
//! within a few buckets of the sensor without walking the whole level.

use std::collections::HashMap;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use sonar_core::constants::MAX_TERRAIN_RING_DEPTH;
use sonar_core::types::{GeometryEdge, TerrainEdge};

use crate::error::GeometryError;

/// One boundary edge of a cell, in cell-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellEdge {
    pub a: Vec2,
    pub b: Vec2,
    pub solid: bool,
}

/// A terrain cell. `center` is world-space; edges are offset by `translation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainCell {
    pub center: Vec2,
    #[serde(default)]
    pub translation: Vec2,
    pub edges: Vec<CellEdge>,
}

impl TerrainCell {
    /// Solid edges moved into world space.
    pub fn solid_edges(&self) -> impl Iterator<Item = TerrainEdge> + '_ {
        self.edges.iter().filter(|e| e.solid).map(move |e| TerrainEdge {
            edge: GeometryEdge::solid(e.a + self.translation, e.b + self.translation),
            cell_center: self.center,
        })
    }
}

/// On-disk form of a terrain map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainFile {
    pub bucket_size: f32,
    pub cells: Vec<TerrainCell>,
}

/// Terrain cells with a bucket index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TerrainFile", into = "TerrainFile")]
pub struct TerrainMap {
    bucket_size: f32,
    cells: Vec<TerrainCell>,
    buckets: HashMap<(i32, i32), Vec<usize>>,
}

impl TryFrom<TerrainFile> for TerrainMap {
    type Error = GeometryError;

    fn try_from(file: TerrainFile) -> Result<Self, Self::Error> {
        TerrainMap::new(file.cells, file.bucket_size)
    }
}

impl From<TerrainMap> for TerrainFile {
    fn from(map: TerrainMap) -> Self {
        TerrainFile {
            bucket_size: map.bucket_size,
            cells: map.cells,
        }
    }
}

impl TerrainMap {
    /// Index `cells` into buckets of `bucket_size` world units.
    pub fn new(cells: Vec<TerrainCell>, bucket_size: f32) -> Result<Self, GeometryError> {
        if !(bucket_size.is_finite() && bucket_size > 0.0) {
            return Err(GeometryError::InvalidBucketSize(bucket_size));
        }
        let mut buckets: HashMap<(i32, i32), Vec<usize>> = HashMap::new();
        for (i, cell) in cells.iter().enumerate() {
            buckets
                .entry(bucket_key(cell.center, bucket_size))
                .or_default()
                .push(i);
        }
        Ok(Self {
            bucket_size,
            cells,
            buckets,
        })
    }

    pub fn cells(&self) -> &[TerrainCell] {
        &self.cells
    }

    pub fn bucket_size(&self) -> f32 {
        self.bucket_size
    }

    /// Cells whose bucket is within `ring_depth` buckets of the bucket containing `point`.
    ///
    /// Order is deterministic: bucket rows bottom to top, then insertion order.
    /// `ring_depth` is capped at `MAX_TERRAIN_RING_DEPTH`.
    pub fn cells_near(&self, point: Vec2, ring_depth: u32) -> Vec<&TerrainCell> {
        let (bx, by) = bucket_key(point, self.bucket_size);
        let depth = ring_depth.min(MAX_TERRAIN_RING_DEPTH) as i32;
        let mut found = Vec::new();
        for y in by.saturating_sub(depth)..=by.saturating_add(depth) {
            for x in bx.saturating_sub(depth)..=bx.saturating_add(depth) {
                if let Some(indices) = self.buckets.get(&(x, y)) {
                    found.extend(indices.iter().map(|&i| &self.cells[i]));
                }
            }
        }
        found
    }

    /// World-space solid edges of the cells near `point`.
    pub fn solid_edges_near(&self, point: Vec2, ring_depth: u32) -> Vec<TerrainEdge> {
        self.cells_near(point, ring_depth)
            .into_iter()
            .flat_map(|cell| cell.solid_edges())
            .collect()
    }

    /// Generate a random cave: a rock/open occupancy grid whose rock/open
    /// boundaries become solid cell edges.
    pub fn synthetic_cave(params: &CaveParams) -> Result<Self, GeometryError> {
        let rock = cave_occupancy(params);
        let cells = extract_boundary_cells(&rock, params);
        log::info!(
            "Synthetic cave: {}x{} grid, {} boundary cells",
            params.cols,
            params.rows,
            cells.len()
        );
        Self::new(cells, params.cell_size)
    }
}

fn bucket_key(point: Vec2, bucket_size: f32) -> (i32, i32) {
    (
        (point.x / bucket_size).floor() as i32,
        (point.y / bucket_size).floor() as i32,
    )
}

/// Parameters for [`TerrainMap::synthetic_cave`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveParams {
    pub seed: u64,
    pub cols: u32,
    pub rows: u32,
    /// Side length of one grid cell in world units.
    pub cell_size: f32,
    /// Initial probability of a cell being rock.
    pub fill: f64,
    /// Cells within this distance of `origin` are forced open.
    pub clear_radius: f32,
    /// World position of the grid centre.
    pub origin: Vec2,
}

impl Default for CaveParams {
    fn default() -> Self {
        Self {
            seed: 7,
            cols: 48,
            rows: 48,
            cell_size: 500.0,
            fill: 0.45,
            clear_radius: 2_000.0,
            origin: Vec2::ZERO,
        }
    }
}

impl CaveParams {
    /// World-space centre of grid cell (row 0 = north edge).
    fn cell_center(&self, row: usize, col: usize) -> Vec2 {
        let x = (col as f32 + 0.5 - self.cols as f32 / 2.0) * self.cell_size;
        let y = (self.rows as f32 / 2.0 - row as f32 - 0.5) * self.cell_size;
        self.origin + Vec2::new(x, y)
    }
}

/// Row-major rock mask after one smoothing pass.
fn cave_occupancy(params: &CaveParams) -> Vec<bool> {
    let w = params.cols as usize;
    let h = params.rows as usize;
    let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
    let fill = params.fill.clamp(0.0, 1.0);

    let mut rock = vec![false; w * h];
    for r in 0..h {
        for c in 0..w {
            let border = r == 0 || c == 0 || r + 1 == h || c + 1 == w;
            rock[r * w + c] = border || rng.gen_bool(fill);
        }
    }

    // Smooth: majority of the 8 neighbours wins, out-of-grid counts as rock.
    let snapshot = rock.clone();
    for r in 0..h {
        for c in 0..w {
            let mut neighbours = 0;
            for dr in -1i32..=1 {
                for dc in -1i32..=1 {
                    if dr == 0 && dc == 0 {
                        continue;
                    }
                    let nr = r as i32 + dr;
                    let nc = c as i32 + dc;
                    let outside = nr < 0 || nc < 0 || nr >= h as i32 || nc >= w as i32;
                    if outside || snapshot[nr as usize * w + nc as usize] {
                        neighbours += 1;
                    }
                }
            }
            if neighbours >= 5 {
                rock[r * w + c] = true;
            } else if neighbours <= 3 {
                rock[r * w + c] = false;
            }
        }
    }

    for r in 0..h {
        for c in 0..w {
            if params.cell_center(r, c).distance(params.origin) < params.clear_radius {
                rock[r * w + c] = false;
            }
        }
    }

    rock
}

/// Walk the grid and emit one cell per rock square that borders open water.
fn extract_boundary_cells(rock: &[bool], params: &CaveParams) -> Vec<TerrainCell> {
    let w = params.cols as usize;
    let h = params.rows as usize;
    let half = params.cell_size / 2.0;
    let is_open = |r: i32, c: i32| -> bool {
        // Outside the grid counts as rock, so the map border is never solid.
        r >= 0 && c >= 0 && r < h as i32 && c < w as i32 && !rock[r as usize * w + c as usize]
    };

    let mut cells = Vec::new();
    for r in 0..h {
        for c in 0..w {
            if !rock[r * w + c] {
                continue;
            }
            let center = params.cell_center(r, c);
            let nw = center + Vec2::new(-half, half);
            let ne = center + Vec2::new(half, half);
            let se = center + Vec2::new(half, -half);
            let sw = center + Vec2::new(-half, -half);
            let (ri, ci) = (r as i32, c as i32);

            let edges = vec![
                CellEdge { a: nw, b: ne, solid: is_open(ri - 1, ci) },
                CellEdge { a: ne, b: se, solid: is_open(ri, ci + 1) },
                CellEdge { a: se, b: sw, solid: is_open(ri + 1, ci) },
                CellEdge { a: sw, b: nw, solid: is_open(ri, ci - 1) },
            ];
            if edges.iter().any(|e| e.solid) {
                cells.push(TerrainCell {
                    center,
                    translation: Vec2::ZERO,
                    edges,
                });
            }
        }
    }
    cells
}
