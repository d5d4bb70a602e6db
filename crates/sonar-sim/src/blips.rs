//! BlipStore: the live blips of one sensor.
//!
//! The store is the only place blip state changes. Drawing stages read it
//! through `iter`/`blips` and never mutate.

use glam::Vec2;

use sonar_core::types::Blip;

/// Display-space circle every live blip must stay inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayBounds {
    /// Sensor world position.
    pub origin: Vec2,
    /// Display units per world unit.
    pub display_scale: f32,
    pub display_radius: f32,
}

impl DisplayBounds {
    pub fn new(origin: Vec2, display_scale: f32, display_radius: f32) -> Self {
        Self {
            origin,
            display_scale,
            display_radius,
        }
    }

    /// Distance from the sensor in display units.
    pub fn scaled_distance(&self, point: Vec2) -> f32 {
        self.origin.distance(point) * self.display_scale
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.scaled_distance(point) <= self.display_radius
    }
}

/// Unordered collection of live blips.
#[derive(Debug, Clone, Default)]
pub struct BlipStore {
    blips: Vec<Blip>,
}

impl BlipStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, blip: Blip) {
        self.blips.push(blip);
    }

    /// Insert `blip` after removing every weaker blip within `window` of it
    /// on both axes. Returns the number of blips removed.
    pub fn insert_with_overwrite(&mut self, blip: Blip, window: f32) -> usize {
        let before = self.blips.len();
        self.blips.retain(|b| {
            let delta = (b.position - blip.position).abs();
            !(b.intensity < blip.intensity && delta.x < window && delta.y < window)
        });
        let evicted = before - self.blips.len();
        self.blips.push(blip);
        evicted
    }

    /// Fade every blip by `dt * decay_rate` and drop the ones that are spent
    /// or lie outside `bounds`. Returns the number removed.
    pub fn age_and_evict(&mut self, dt: f32, decay_rate: f32, bounds: &DisplayBounds) -> usize {
        let fade = dt * decay_rate;
        let before = self.blips.len();
        self.blips.retain_mut(|b| {
            b.intensity -= fade;
            !b.is_expired() && bounds.contains(b.position)
        });
        before - self.blips.len()
    }

    /// Blip at `index`. Out-of-range indices assert in debug builds and
    /// return `None` otherwise.
    pub fn get(&self, index: usize) -> Option<&Blip> {
        debug_assert!(
            index < self.blips.len(),
            "blip index {index} out of range ({})",
            self.blips.len()
        );
        self.blips.get(index)
    }

    pub fn len(&self) -> usize {
        self.blips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blips.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Blip> {
        self.blips.iter()
    }

    pub fn blips(&self) -> &[Blip] {
        &self.blips
    }

    pub fn clear(&mut self) {
        self.blips.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> DisplayBounds {
        DisplayBounds::new(Vec2::ZERO, 1.0, 1000.0)
    }

    #[test]
    fn test_stronger_blip_overwrites_weaker_neighbour() {
        let mut store = BlipStore::new();
        store.insert(Blip::new(Vec2::new(100.0, 100.0), 0.5, 1.0));
        let evicted = store.insert_with_overwrite(Blip::new(Vec2::new(150.0, 80.0), 0.9, 1.0), 200.0);
        assert_eq!(evicted, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.blips()[0].intensity, 0.9);
    }

    #[test]
    fn test_weaker_or_distant_blips_survive_overwrite() {
        let mut store = BlipStore::new();
        store.insert(Blip::new(Vec2::new(0.0, 0.0), 1.5, 1.0));
        // Close on x but outside the window on y.
        store.insert(Blip::new(Vec2::new(10.0, 300.0), 0.1, 1.0));
        let evicted = store.insert_with_overwrite(Blip::new(Vec2::new(5.0, 5.0), 1.0, 1.0), 200.0);
        assert_eq!(evicted, 0);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_equal_intensity_is_not_evicted() {
        let mut store = BlipStore::new();
        store.insert(Blip::new(Vec2::ZERO, 1.0, 1.0));
        assert_eq!(store.insert_with_overwrite(Blip::new(Vec2::ONE, 1.0, 1.0), 200.0), 0);
    }

    #[test]
    fn test_aging_removes_exactly_when_spent() {
        let mut store = BlipStore::new();
        store.insert(Blip::new(Vec2::new(10.0, 0.0), 1.0, 1.0));
        store.insert(Blip::new(Vec2::new(20.0, 0.0), 0.25, 1.0));

        assert_eq!(store.age_and_evict(0.25, 0.5, &bounds()), 0);
        assert_eq!(store.len(), 2);
        // 0.25 - 0.125 - 0.125 = 0 -> gone.
        assert_eq!(store.age_and_evict(0.25, 0.5, &bounds()), 1);
        assert_eq!(store.len(), 1);
        assert!((store.blips()[0].intensity - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_aging_drops_blips_outside_display() {
        let mut store = BlipStore::new();
        store.insert(Blip::new(Vec2::new(999.0, 0.0), 1.0, 1.0));
        store.insert(Blip::new(Vec2::new(0.0, 1001.0), 1.0, 1.0));
        assert_eq!(store.age_and_evict(0.0, 0.5, &bounds()), 1);
        assert_eq!(store.blips()[0].position.x, 999.0);
    }

    #[test]
    fn test_scaled_distance() {
        let b = DisplayBounds::new(Vec2::new(100.0, 0.0), 0.02, 200.0);
        assert!((b.scaled_distance(Vec2::new(600.0, 0.0)) - 10.0).abs() < 1e-5);
        assert!(b.contains(Vec2::new(10_000.0, 0.0)));
        assert!(!b.contains(Vec2::new(10_200.0, 0.0)));
    }

    #[test]
    fn test_clear_and_get() {
        let mut store = BlipStore::new();
        store.insert(Blip::new(Vec2::ZERO, 1.0, 2.0));
        assert_eq!(store.get(0).map(|b| b.visual_scale), Some(2.0));
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn test_get_out_of_range_asserts_in_debug() {
        let store = BlipStore::new();
        let _ = store.get(3);
    }
}
