//! Events emitted by a sensor tick for the host (UI, audio, network).

use serde::{Deserialize, Serialize};

/// Something observable happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SonarEvent {
    /// Sensor switched between idle and active sweep.
    ModeChanged { active: bool },
    /// The active ring wrapped back to the centre.
    SweepRestarted,
    /// An authoritative toggle arrived while a local change was pending.
    CorrectionQueued { active: bool },
    /// A deferred correction was applied.
    CorrectionApplied {
        active: bool,
        /// The correction contradicted the local prediction.
        overrode_prediction: bool,
    },
}

/// One-bit toggle message exchanged between peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleMessage {
    pub active: bool,
}

impl ToggleMessage {
    pub fn new(active: bool) -> Self {
        Self { active }
    }

    /// Wire form: only the lowest bit is meaningful.
    pub fn to_bits(self) -> u8 {
        u8::from(self.active)
    }

    /// Decode, ignoring everything above the lowest bit.
    pub fn from_bits(bits: u8) -> Self {
        Self {
            active: bits & 1 == 1,
        }
    }
}
