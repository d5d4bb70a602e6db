//! Commands sent to a sensor from the outside.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All actions the host can request from a sensor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SonarCommand {
    /// Local user flipped the active-sonar switch.
    SetActive { active: bool },
    /// A toggle message arrived from a remote peer.
    ReceiveToggle {
        /// One-bit wire payload.
        bits: u8,
        /// Sender-side timestamp in seconds.
        sending_time: f64,
    },
    /// Drop every live blip.
    ClearBlips,
}
