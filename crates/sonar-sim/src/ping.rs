//! PingState: current and previous radius of the active and passive waves.

use sonar_core::enums::WaveKind;
use sonar_core::state::WaveView;

use crate::systems::sampler::Band;

/// Radius pair of one wavefront. The pair forms the band sampled this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WaveSlot {
    pub radius: f32,
    pub prev_radius: f32,
}

impl WaveSlot {
    pub fn band(&self) -> Band {
        Band::new(self.prev_radius, self.radius)
    }

    pub fn view(&self) -> WaveView {
        WaveView {
            radius: self.radius,
            prev_radius: self.prev_radius,
        }
    }
}

/// Per-sensor wave state.
///
/// The active slot holds display-unit radii. The passive slot holds the raw
/// oscillation value, scaled per emitter when sampled.
#[derive(Debug, Clone, Default)]
pub struct PingState {
    slots: [WaveSlot; WaveKind::COUNT],
    /// Fraction of the current sweep in `[0, 1)`.
    sweep_phase: f32,
}

impl PingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wave(&self, kind: WaveKind) -> &WaveSlot {
        &self.slots[kind.index()]
    }

    /// Slot by raw index. Out-of-range indices assert in debug builds and
    /// return `None` otherwise.
    pub fn slot(&self, index: usize) -> Option<&WaveSlot> {
        debug_assert!(index < WaveKind::COUNT, "wave slot {index} out of range");
        self.slots.get(index)
    }

    pub fn active_radius(&self) -> f32 {
        self.wave(WaveKind::Active).radius
    }

    pub fn prev_active_radius(&self) -> f32 {
        self.wave(WaveKind::Active).prev_radius
    }

    pub fn passive_radius(&self) -> f32 {
        self.wave(WaveKind::Passive).radius
    }

    pub fn prev_passive_radius(&self) -> f32 {
        self.wave(WaveKind::Passive).prev_radius
    }

    pub fn sweep_phase(&self) -> f32 {
        self.sweep_phase
    }

    /// Move the active ring forward by `dt`.
    ///
    /// When the sweep wraps back to the centre this tick, returns the tail
    /// band between the last radius and the display edge, which the new
    /// band starting at zero no longer covers.
    pub fn advance_sweep(&mut self, dt: f32, sweep_duration: f32, display_radius: f32) -> Option<Band> {
        self.sweep_phase += dt / sweep_duration;
        let slot = &mut self.slots[WaveKind::Active.index()];
        let tail = if self.sweep_phase >= 1.0 {
            self.sweep_phase = self.sweep_phase.fract();
            let tail = Band::new(slot.prev_radius, display_radius);
            slot.prev_radius = 0.0;
            Some(tail)
        } else {
            None
        };
        slot.radius = display_radius * self.sweep_phase;
        tail
    }

    /// Start a fresh sweep from the centre.
    pub fn restart_sweep(&mut self) {
        self.sweep_phase = 0.0;
        self.slots[WaveKind::Active.index()] = WaveSlot::default();
    }

    /// Sensor switched off: the active ring disappears.
    pub fn stop_sweep(&mut self) {
        self.restart_sweep();
    }

    pub fn set_passive(&mut self, value: f32) {
        self.slots[WaveKind::Passive.index()].radius = value;
    }

    /// Remember this tick's radii as the next tick's previous radii.
    pub fn commit(&mut self) {
        for slot in &mut self.slots {
            slot.prev_radius = slot.radius;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sweep_advances_and_commits() {
        let mut ping = PingState::new();
        assert!(ping.advance_sweep(0.5, 2.0, 200.0).is_none());
        assert_relative_eq!(ping.active_radius(), 50.0);
        assert_eq!(ping.prev_active_radius(), 0.0);
        ping.commit();
        ping.advance_sweep(0.5, 2.0, 200.0);
        assert_relative_eq!(ping.prev_active_radius(), 50.0);
        assert_relative_eq!(ping.active_radius(), 100.0);
    }

    #[test]
    fn test_wrap_resets_previous_radius() {
        let mut ping = PingState::new();
        ping.advance_sweep(1.5, 2.0, 200.0);
        ping.commit();
        let tail = ping.advance_sweep(1.0, 2.0, 200.0).unwrap();
        assert_relative_eq!(tail.prev_radius, 150.0);
        assert_eq!(tail.radius, 200.0);
        assert_eq!(ping.prev_active_radius(), 0.0);
        assert_relative_eq!(ping.sweep_phase(), 0.25);
        assert_relative_eq!(ping.active_radius(), 50.0);
    }

    #[test]
    fn test_stop_zeroes_active_radii() {
        let mut ping = PingState::new();
        ping.advance_sweep(0.7, 2.0, 200.0);
        ping.commit();
        ping.stop_sweep();
        assert_eq!(ping.active_radius(), 0.0);
        assert_eq!(ping.prev_active_radius(), 0.0);
        assert_eq!(ping.sweep_phase(), 0.0);
    }

    #[test]
    fn test_passive_slot_is_independent() {
        let mut ping = PingState::new();
        ping.set_passive(0.3);
        ping.commit();
        ping.set_passive(0.5);
        assert_eq!(ping.prev_passive_radius(), 0.3);
        assert_eq!(ping.passive_radius(), 0.5);
        assert_eq!(ping.active_radius(), 0.0);
        assert_eq!(ping.slot(WaveKind::Passive.index()).map(|s| s.radius), Some(0.5));
    }
}
