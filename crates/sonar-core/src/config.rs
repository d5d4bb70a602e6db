//! Sensor configuration, loadable from TOML.
//!
//! Every section defaults field-by-field, so a config file only needs the
//! values it overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::PeerRole;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level sensor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SonarConfig {
    /// RNG seed. Same seed and inputs = same blips.
    pub seed: u64,
    /// World-space sensing range.
    pub range: f32,
    /// Display radius in display units.
    pub display_radius: f32,
    /// Seconds for one active sweep.
    pub sweep_duration: f32,
    /// Intensity lost per second.
    pub decay_rate: f32,
    pub active_strength: f32,
    pub passive_strength: f32,
    /// Angular frequency of the passive oscillation (rad/s).
    pub passive_frequency: f32,
    /// Emitter range fraction covered by a passive ring at full swing.
    pub passive_band_scale: f32,
    /// When false, a sensor inside a compartment only sees that compartment's walls.
    pub wall_penetration: bool,
    /// Terrain buckets searched around the sensor, at most `MAX_TERRAIN_RING_DEPTH`.
    pub terrain_ring_depth: u32,
    /// Vertex jitter when the sensor samples its own hull.
    pub own_hull_jitter: f32,
    pub sampler: SamplerTuning,
    pub profiles: SamplingProfiles,
    pub toggle: ToggleConfig,
}

impl Default for SonarConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            range: DEFAULT_RANGE,
            display_radius: DEFAULT_DISPLAY_RADIUS,
            sweep_duration: DEFAULT_SWEEP_DURATION,
            decay_rate: DEFAULT_DECAY_RATE,
            active_strength: ACTIVE_PING_STRENGTH,
            passive_strength: PASSIVE_PING_STRENGTH,
            passive_frequency: PASSIVE_FREQUENCY,
            passive_band_scale: PASSIVE_BAND_SCALE,
            wall_penetration: true,
            terrain_ring_depth: TERRAIN_RING_DEPTH,
            own_hull_jitter: OWN_HULL_JITTER,
            sampler: SamplerTuning::default(),
            profiles: SamplingProfiles::default(),
            toggle: ToggleConfig::default(),
        }
    }
}

impl SonarConfig {
    /// Load and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded sonar config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SonarConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Display units per world unit.
    pub fn display_scale(&self) -> f32 {
        self.display_radius / self.range
    }

    /// Reject values that would stall or panic the tick.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("range", self.range)?;
        positive("display_radius", self.display_radius)?;
        positive("sweep_duration", self.sweep_duration)?;
        non_negative("decay_rate", self.decay_rate)?;
        non_negative("passive_band_scale", self.passive_band_scale)?;
        non_negative("own_hull_jitter", self.own_hull_jitter)?;
        non_negative("toggle.correction_delay", self.toggle.correction_delay)?;
        if self.terrain_ring_depth > MAX_TERRAIN_RING_DEPTH {
            return Err(ConfigError::Invalid(format!(
                "terrain_ring_depth must be at most {MAX_TERRAIN_RING_DEPTH}, got {}",
                self.terrain_ring_depth
            )));
        }
        self.sampler.validate()?;
        self.profiles.validate()
    }
}

/// Hand-tuned constants of the annulus sampler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerTuning {
    pub line_jitter_min: f32,
    pub line_jitter_max: f32,
    pub depth_step_growth: f32,
    /// Per-axis overwrite window in world units.
    pub eviction_window: f32,
    /// Maximum positional jitter of a depth blip.
    pub blip_jitter: f32,
    pub alpha_min: f32,
    pub alpha_max: f32,
    pub first_step_alpha_drop: f32,
    pub first_step_alpha_cap: f32,
    pub alpha_step_decay: f32,
}

impl Default for SamplerTuning {
    fn default() -> Self {
        Self {
            line_jitter_min: LINE_STEP_JITTER_MIN,
            line_jitter_max: LINE_STEP_JITTER_MAX,
            depth_step_growth: DEPTH_STEP_GROWTH,
            eviction_window: EVICTION_WINDOW,
            blip_jitter: BLIP_JITTER,
            alpha_min: ALPHA_MIN,
            alpha_max: ALPHA_MAX,
            first_step_alpha_drop: FIRST_STEP_ALPHA_DROP,
            first_step_alpha_cap: FIRST_STEP_ALPHA_CAP,
            alpha_step_decay: ALPHA_STEP_DECAY,
        }
    }
}

impl SamplerTuning {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("sampler.line_jitter_min", self.line_jitter_min)?;
        ordered(
            "sampler.line_jitter",
            self.line_jitter_min,
            self.line_jitter_max,
        )?;
        ordered("sampler.alpha", self.alpha_min, self.alpha_max)?;
        non_negative("sampler.depth_step_growth", self.depth_step_growth)?;
        non_negative("sampler.eviction_window", self.eviction_window)?;
        non_negative("sampler.blip_jitter", self.blip_jitter)?;
        // A non-decaying alpha would walk all the way to the display edge.
        positive("sampler.alpha_step_decay", self.alpha_step_decay)
    }
}

/// Walk parameters for one kind of edge source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingProfile {
    /// Distance between sample points along the edge (world units).
    pub line_step: f32,
    /// Initial outward depth step (display units).
    pub depth_step: f32,
    /// Fixed strength; `None` inherits the ping's strength.
    #[serde(default)]
    pub strength: Option<f32>,
}

impl SamplingProfile {
    pub const fn new(line_step: f32, depth_step: f32, strength: Option<f32>) -> Self {
        Self {
            line_step,
            depth_step,
            strength,
        }
    }

    pub fn strength_or(&self, ping_strength: f32) -> f32 {
        self.strength.unwrap_or(ping_strength)
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        positive(&format!("profiles.{name}.line_step"), self.line_step)?;
        positive(&format!("profiles.{name}.depth_step"), self.depth_step)
    }
}

/// Per-source sampling profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingProfiles {
    pub hull: SamplingProfile,
    pub compartment: SamplingProfile,
    /// Depth step is scaled per edge by how squarely it faces the sensor.
    pub terrain: SamplingProfile,
    pub ruin: SamplingProfile,
    pub level_boundary: SamplingProfile,
}

impl Default for SamplingProfiles {
    fn default() -> Self {
        Self {
            hull: SamplingProfile::new(HULL_LINE_STEP, HULL_DEPTH_STEP, Some(HULL_STRENGTH)),
            compartment: SamplingProfile::new(
                COMPARTMENT_LINE_STEP,
                COMPARTMENT_DEPTH_STEP,
                Some(COMPARTMENT_STRENGTH),
            ),
            terrain: SamplingProfile::new(TERRAIN_LINE_STEP, TERRAIN_DEPTH_STEP, None),
            ruin: SamplingProfile::new(RUIN_LINE_STEP, RUIN_DEPTH_STEP, None),
            level_boundary: SamplingProfile::new(
                LEVEL_BOUNDARY_LINE_STEP,
                LEVEL_BOUNDARY_DEPTH_STEP,
                None,
            ),
        }
    }
}

impl SamplingProfiles {
    fn validate(&self) -> Result<(), ConfigError> {
        self.hull.validate("hull")?;
        self.compartment.validate("compartment")?;
        self.terrain.validate("terrain")?;
        self.ruin.validate("ruin")?;
        self.level_boundary.validate("level_boundary")
    }
}

/// Toggle synchronisation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleConfig {
    pub role: PeerRole,
    /// Seconds during which authoritative toggles are deferred after a local change.
    pub correction_delay: f32,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            role: PeerRole::default(),
            correction_delay: CORRECTION_DELAY,
        }
    }
}

fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must be positive, got {value}"
        )))
    }
}

fn non_negative(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must be non-negative, got {value}"
        )))
    }
}

fn ordered(name: &str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} range is inverted ({min} > {max})"
        )))
    }
}
