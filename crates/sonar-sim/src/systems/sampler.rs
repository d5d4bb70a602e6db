//! AnnulusSampler: turns geometry crossed by the current wave band into blips.
//!
//! Every target is tested against the band between last tick's radius and
//! this tick's, so each piece of geometry lights up once per sweep instead
//! of every frame.
//!
//! Edge walk:
//! 1. Step along the segment by `line_step` jittered multiplicatively.
//! 2. Keep sample points whose scaled distance falls in `(prev, radius]`.
//! 3. From each kept point walk outward in growing depth steps, inserting a
//!    jittered blip per step with a decaying alpha.
//! 4. Each insertion first evicts weaker blips in its neighbourhood.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use sonar_core::config::SamplerTuning;
use sonar_core::types::{Blip, GeometryEdge};

use crate::blips::{BlipStore, DisplayBounds};
use crate::systems::targets::{EdgeTarget, PointTarget, SampleTarget};

/// The annulus between two radii, in display units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Band {
    pub prev_radius: f32,
    pub radius: f32,
}

impl Band {
    pub fn new(prev_radius: f32, radius: f32) -> Self {
        Self {
            prev_radius,
            radius,
        }
    }

    /// Whether any distance can fall inside the band.
    pub fn is_open(&self) -> bool {
        self.radius > self.prev_radius && self.radius > 0.0
    }

    pub fn contains(&self, distance: f32) -> bool {
        distance > self.prev_radius && distance <= self.radius
    }

    pub fn scaled(&self, factor: f32) -> Self {
        Self::new(self.prev_radius * factor, self.radius * factor)
    }
}

/// Random vector with uniform direction and length in `[0, max_len]`.
pub fn random_offset(rng: &mut ChaCha8Rng, max_len: f32) -> Vec2 {
    if max_len <= 0.0 {
        return Vec2::ZERO;
    }
    let angle = rng.gen_range(0.0..TAU);
    let len = rng.gen_range(0.0..=max_len);
    Vec2::from_angle(angle) * len
}

/// Samples one target at a time into a `BlipStore`.
pub struct AnnulusSampler<'a> {
    tuning: &'a SamplerTuning,
    bounds: DisplayBounds,
}

impl<'a> AnnulusSampler<'a> {
    pub fn new(tuning: &'a SamplerTuning, bounds: DisplayBounds) -> Self {
        Self { tuning, bounds }
    }

    pub fn bounds(&self) -> &DisplayBounds {
        &self.bounds
    }

    /// Sample any target. Returns the number of blips inserted.
    pub fn sample(
        &self,
        target: &SampleTarget,
        band: Band,
        rng: &mut ChaCha8Rng,
        store: &mut BlipStore,
    ) -> usize {
        match target {
            SampleTarget::Edge(edge) => self.sample_edge(edge, band, rng, store),
            SampleTarget::Point(point) => usize::from(self.sample_point(point, band, rng, store)),
        }
    }

    /// Walk an edge and its outward shadow. Non-solid and zero-length edges
    /// produce nothing.
    pub fn sample_edge(
        &self,
        target: &EdgeTarget,
        band: Band,
        rng: &mut ChaCha8Rng,
        store: &mut BlipStore,
    ) -> usize {
        let GeometryEdge { a, b, is_solid } = target.edge;
        if !is_solid || target.edge.is_degenerate() || !band.is_open() {
            return 0;
        }

        let length = target.edge.length();
        let dir = (b - a) / length;
        // Falloff distance in display units.
        let source_range = target.source_range * self.bounds.display_scale;

        let mut inserted = 0;
        let mut x = 0.0;
        while x < length {
            let point = a + dir * x;
            x += target.line_step
                * rng.gen_range(self.tuning.line_jitter_min..=self.tuning.line_jitter_max);

            let dist = self.bounds.scaled_distance(point);
            if dist > self.bounds.display_radius || !band.contains(dist) {
                continue;
            }
            inserted += self.walk_depth(point, dist, source_range, target, rng, store);
        }
        inserted
    }

    /// Blips trailing outward behind one sample point.
    fn walk_depth(
        &self,
        point: Vec2,
        dist: f32,
        source_range: f32,
        target: &EdgeTarget,
        rng: &mut ChaCha8Rng,
        store: &mut BlipStore,
    ) -> usize {
        let t = self.tuning;
        let outward = (point - self.bounds.origin).normalize_or_zero();
        let falloff = 1.0 - dist / source_range;
        let max_depth = self.bounds.display_radius - dist;

        let mut alpha = target.strength * rng.gen_range(t.alpha_min..=t.alpha_max);
        let mut step = target.depth_step;
        let mut z = 0.0;
        let mut first = true;
        let mut inserted = 0;

        while z < max_depth {
            let intensity = alpha * falloff;
            if intensity <= 0.0 {
                break;
            }

            let pos = point
                + random_offset(rng, t.blip_jitter)
                + outward * z / self.bounds.display_scale;
            if self.bounds.contains(pos) {
                let scale = 1.0 + (dist + z) / self.bounds.display_radius;
                store.insert_with_overwrite(Blip::new(pos, intensity, scale), t.eviction_window);
                inserted += 1;
            }

            z += step;
            step += t.depth_step_growth;
            if first {
                alpha = (alpha - t.first_step_alpha_drop).min(t.first_step_alpha_cap);
                first = false;
            } else {
                alpha -= t.alpha_step_decay;
            }
            if alpha <= 0.0 {
                break;
            }
        }
        inserted
    }

    /// Insert a single blip for a point target. Returns whether it was inserted.
    pub fn sample_point(
        &self,
        target: &PointTarget,
        band: Band,
        rng: &mut ChaCha8Rng,
        store: &mut BlipStore,
    ) -> bool {
        let dist = self.bounds.scaled_distance(target.position);
        if dist > self.bounds.display_radius {
            return false;
        }
        if !band.contains(dist) {
            return false;
        }
        let pos = target.position + random_offset(rng, target.jitter);
        if !self.bounds.contains(pos) {
            return false;
        }
        store.insert(Blip::new(pos, target.intensity, target.visual_scale));
        true
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn tuning() -> SamplerTuning {
        SamplerTuning::default()
    }

    fn edge(a: Vec2, b: Vec2) -> EdgeTarget {
        EdgeTarget {
            edge: GeometryEdge::solid(a, b),
            line_step: 50.0,
            depth_step: 2.0,
            source_range: 10_000.0,
            strength: 2.0,
        }
    }

    #[test]
    fn test_band_contains_is_half_open() {
        let band = Band::new(90.0, 110.0);
        assert!(!band.contains(90.0));
        assert!(band.contains(90.1));
        assert!(band.contains(110.0));
        assert!(!band.contains(110.1));
        assert!(!Band::new(50.0, 50.0).is_open());
        assert_eq!(Band::new(0.25, 0.5).scaled(80.0), Band::new(20.0, 40.0));
    }

    #[test]
    fn test_random_offset_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            assert!(random_offset(&mut rng, 150.0).length() <= 150.0 + 1e-3);
        }
        assert_eq!(random_offset(&mut rng, 0.0), Vec2::ZERO);
    }

    #[test]
    fn test_non_solid_and_degenerate_edges_produce_nothing() {
        let t = tuning();
        let sampler = AnnulusSampler::new(&t, DisplayBounds::new(Vec2::ZERO, 1.0, 200.0));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut store = BlipStore::new();

        let mut open = edge(Vec2::new(100.0, 0.0), Vec2::new(100.0, 50.0));
        open.edge.is_solid = false;
        let point = edge(Vec2::new(100.0, 0.0), Vec2::new(100.0, 0.0));
        let band = Band::new(0.0, 200.0);

        assert_eq!(sampler.sample_edge(&open, band, &mut rng, &mut store), 0);
        assert_eq!(sampler.sample_edge(&point, band, &mut rng, &mut store), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_out_of_band_point_rejected() {
        let t = tuning();
        let sampler = AnnulusSampler::new(&t, DisplayBounds::new(Vec2::ZERO, 1.0, 200.0));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut store = BlipStore::new();
        let target = PointTarget {
            position: Vec2::new(50.0, 0.0),
            jitter: 0.0,
            intensity: 1.0,
            visual_scale: 1.0,
        };
        assert!(!sampler.sample_point(&target, Band::new(60.0, 80.0), &mut rng, &mut store));
        assert!(sampler.sample_point(&target, Band::new(40.0, 80.0), &mut rng, &mut store));
        assert_eq!(store.len(), 1);

        assert!(!sampler.sample_point(&target, Band::new(50.0, 50.0), &mut rng, &mut store));
        assert!(!sampler.sample_point(&target, Band::default(), &mut rng, &mut store));
        assert_eq!(store.len(), 1);
    }
}
