#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::Vec2;

    use crate::commands::SonarCommand;
    use crate::config::{ConfigError, SonarConfig};
    use crate::enums::*;
    use crate::events::{SonarEvent, ToggleMessage};
    use crate::fade::Highlight;
    use crate::state::RenderView;
    use crate::types::{Blip, GeometryEdge, Rect, SonarTime};

    #[test]
    fn test_default_config_is_valid() {
        let config = SonarConfig::default();
        config.validate().unwrap();
        assert_relative_eq!(config.display_scale(), 200.0 / 10_000.0);
    }

    #[test]
    fn test_partial_toml_overrides_only_named_fields() {
        let text = r#"
            range = 5000.0
            wall_penetration = false

            [sampler]
            eviction_window = 50.0

            [profiles.hull]
            line_step = 80.0
            depth_step = 4.0

            [toggle]
            role = "Observer"
        "#;
        let config = SonarConfig::from_toml_str(text).unwrap();
        assert_eq!(config.range, 5000.0);
        assert!(!config.wall_penetration);
        assert_eq!(config.sampler.eviction_window, 50.0);
        // Untouched sampler fields keep their defaults.
        assert_eq!(config.sampler.blip_jitter, 150.0);
        assert_eq!(config.profiles.hull.line_step, 80.0);
        // Omitted strength inherits the ping's.
        assert_eq!(config.profiles.hull.strength, None);
        assert_eq!(config.profiles.terrain.line_step, 350.0);
        assert_eq!(config.toggle.role, PeerRole::Observer);
        assert_eq!(config.display_radius, 200.0);
    }

    #[test]
    fn test_demo_config_loads() {
        let config = SonarConfig::from_toml_str(include_str!("../../../demos/sonar.toml")).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.range, 8000.0);
        assert_eq!(config.profiles.terrain.line_step, 300.0);
        assert_eq!(config.toggle.role, PeerRole::Authority);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = SonarConfig::from_toml_str("display_radius = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "got {err}");

        let err = SonarConfig::from_toml_str(
            "[sampler]\nline_jitter_min = 1.5\nline_jitter_max = 1.0",
        )
        .unwrap_err();
        assert!(err.to_string().contains("inverted"), "got {err}");

        let err = SonarConfig::from_toml_str(
            "[profiles.ruin]\nline_step = 0.0\ndepth_step = 1.0",
        )
        .unwrap_err();
        assert!(err.to_string().contains("profiles.ruin.line_step"));
    }

    #[test]
    fn test_terrain_ring_depth_is_bounded() {
        let ok = format!("terrain_ring_depth = {}", crate::constants::MAX_TERRAIN_RING_DEPTH);
        assert!(SonarConfig::from_toml_str(&ok).is_ok());

        let err = SonarConfig::from_toml_str("terrain_ring_depth = 100000").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "got {err}");
        assert!(err.to_string().contains("terrain_ring_depth"));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = SonarConfig::from_toml_str("range = = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let err = SonarConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = SonarConfig::default();
        let text = toml::to_string(&config).unwrap();
        let back = SonarConfig::from_toml_str(&text).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_blip_clamps_negative_intensity() {
        let blip = Blip::new(Vec2::ZERO, -3.0, 1.0);
        assert_eq!(blip.intensity, 0.0);
        assert!(blip.is_expired());
        assert!(!Blip::new(Vec2::ZERO, 0.2, 1.0).is_expired());
    }

    #[test]
    fn test_edge_geometry() {
        let edge = GeometryEdge::solid(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0));
        assert_relative_eq!(edge.length(), 5.0);
        assert_eq!(edge.midpoint(), Vec2::new(1.5, 2.0));
        assert!(!edge.is_degenerate());
        assert!(GeometryEdge::solid(Vec2::ONE, Vec2::ONE).is_degenerate());

        let moved = edge.translated(Vec2::new(10.0, 0.0));
        assert_eq!(moved.a, Vec2::new(10.0, 0.0));
        assert!(moved.is_solid);
    }

    #[test]
    fn test_rect_boundary_edges_form_the_outline() {
        let rect = Rect::from_corners(Vec2::new(10.0, 5.0), Vec2::new(-10.0, -5.0));
        assert_eq!(rect.min, Vec2::new(-10.0, -5.0));
        assert_eq!(rect.center(), Vec2::ZERO);

        let edges = rect.boundary_edges();
        let perimeter: f32 = edges.iter().map(|e| e.length()).sum();
        assert_relative_eq!(perimeter, 60.0);
        assert!(edges.iter().all(|e| e.is_solid));
        for e in &edges {
            assert!(rect.contains(e.a) && rect.contains(e.b));
        }
    }

    #[test]
    fn test_rect_circle_intersection() {
        let rect = Rect::from_corners(Vec2::new(100.0, 100.0), Vec2::new(200.0, 200.0));
        assert!(rect.intersects_circle(Vec2::ZERO, 150.0));
        assert!(!rect.intersects_circle(Vec2::ZERO, 100.0));
        assert!(rect.intersects_circle(Vec2::new(150.0, 150.0), 1.0));
    }

    #[test]
    fn test_toggle_message_is_one_bit() {
        assert_eq!(ToggleMessage::new(true).to_bits(), 1);
        assert_eq!(ToggleMessage::new(false).to_bits(), 0);
        assert!(ToggleMessage::from_bits(0b1111_1111).active);
        assert!(!ToggleMessage::from_bits(0b1111_1110).active);
    }

    #[test]
    fn test_highlight_fades_in_then_out() {
        let mut h = Highlight::new(0.1, 0.4);
        assert_eq!(h.alpha(), 0.0);
        h.advance(0.05);
        assert_relative_eq!(h.alpha(), 0.5, epsilon = 1e-5);
        h.advance(0.05);
        assert_relative_eq!(h.alpha(), 1.0, epsilon = 1e-5);
        h.advance(0.2);
        assert_relative_eq!(h.alpha(), 0.5, epsilon = 1e-5);
        h.advance(10.0);
        assert!(h.is_finished());
        assert_eq!(h.alpha(), 0.0);
    }

    #[test]
    fn test_finished_default_highlight_is_invisible() {
        let h = Highlight::default();
        assert!(h.is_finished());
        assert_eq!(h.alpha(), 0.0);
    }

    #[test]
    fn test_sensor_mode_helpers() {
        assert_eq!(SensorMode::from_active(true), SensorMode::ActiveSweep);
        assert!(!SensorMode::from_active(false).is_active());
        assert_ne!(WaveKind::Active.index(), WaveKind::Passive.index());
        assert!(WaveKind::Passive.index() < WaveKind::COUNT);
    }

    #[test]
    fn test_sonar_time_advance() {
        let mut t = SonarTime::default();
        t.advance(0.5);
        t.advance(0.25);
        assert_eq!(t.tick, 2);
        assert_relative_eq!(t.elapsed_secs, 0.75);
    }

    /// Verify the tagged unions round-trip through serde.
    #[test]
    fn test_command_and_event_serde() {
        let commands = vec![
            SonarCommand::SetActive { active: true },
            SonarCommand::ReceiveToggle {
                bits: 1,
                sending_time: 3.5,
            },
            SonarCommand::ClearBlips,
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: SonarCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }

        let event = SonarEvent::CorrectionApplied {
            active: false,
            overrode_prediction: true,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"CorrectionApplied\""));
        let back: SonarEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_render_view_display_transform() {
        let view = RenderView {
            origin: Vec2::new(100.0, 100.0),
            display_scale: 0.5,
            ..Default::default()
        };
        assert_eq!(view.to_display(Vec2::new(120.0, 140.0)), Vec2::new(10.0, -20.0));

        let json = serde_json::to_string(&view).unwrap();
        let back: RenderView = serde_json::from_str(&json).unwrap();
        assert_eq!(view, back);
    }
}
