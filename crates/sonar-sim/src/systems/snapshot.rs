//! Snapshot builder: reads sensor state and produces a `RenderView`.
//!
//! Read-only; nothing here mutates the store or the ping state.

use glam::Vec2;

use sonar_core::config::SonarConfig;
use sonar_core::enums::{SensorMode, WaveKind};
use sonar_core::state::RenderView;
use sonar_core::types::SonarTime;

use crate::blips::BlipStore;
use crate::ping::PingState;

/// Build a complete render view.
pub fn build_render_view(
    config: &SonarConfig,
    time: SonarTime,
    mode: SensorMode,
    origin: Vec2,
    ping: &PingState,
    store: &BlipStore,
    toggle_highlight: f32,
) -> RenderView {
    RenderView {
        time,
        mode,
        origin,
        display_radius: config.display_radius,
        display_scale: config.display_scale(),
        active: ping.wave(WaveKind::Active).view(),
        passive: ping.wave(WaveKind::Passive).view(),
        toggle_highlight,
        blips: store.blips().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonar_core::types::Blip;

    #[test]
    fn test_view_copies_state() {
        let config = SonarConfig::default();
        let mut ping = PingState::new();
        ping.advance_sweep(1.0, 2.0, config.display_radius);
        let mut store = BlipStore::new();
        store.insert(Blip::new(Vec2::new(5.0, 5.0), 1.0, 1.0));

        let view = build_render_view(
            &config,
            SonarTime::default(),
            SensorMode::ActiveSweep,
            Vec2::ZERO,
            &ping,
            &store,
            0.5,
        );
        assert_eq!(view.active.radius, 100.0);
        assert_eq!(view.blips.len(), 1);
        assert_eq!(view.toggle_highlight, 0.5);
        assert_eq!(view.display_scale, config.display_scale());
    }
}
