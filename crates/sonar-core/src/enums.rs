//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Sonar operating mode. Passive listening runs in both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorMode {
    /// Sensor off; only ambient emitters are picked up.
    #[default]
    Idle,
    /// The active ring sweeps outward and loops.
    ActiveSweep,
}

impl SensorMode {
    pub fn from_active(active: bool) -> Self {
        if active {
            SensorMode::ActiveSweep
        } else {
            SensorMode::Idle
        }
    }

    pub fn is_active(self) -> bool {
        self == SensorMode::ActiveSweep
    }
}

/// The two independent wavefronts tracked per sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaveKind {
    Active,
    Passive,
}

impl WaveKind {
    pub const COUNT: usize = 2;

    /// Slot index in per-wave storage.
    pub fn index(self) -> usize {
        match self {
            WaveKind::Active => 0,
            WaveKind::Passive => 1,
        }
    }
}

/// Where a sample target came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    Hull,
    Compartment,
    Terrain,
    Ruin,
    LevelBoundary,
    Item,
    Limb,
}

/// Which side of the toggle synchronisation this sensor is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeerRole {
    /// Owns the truth; applies and rebroadcasts every toggle.
    #[default]
    Authority,
    /// Predicts its own toggles and accepts corrections from the authority.
    Observer,
}
