//! Active/passive toggle synchronisation between peers.
//!
//! The authority applies every toggle it hears and rebroadcasts it. An
//! observer applies its own toggles immediately as a prediction and opens a
//! correction window; authoritative messages arriving inside the window are
//! held back and applied when it closes, so a round trip of the observer's
//! own message does not make the switch snap back and forth.

use sonar_core::config::ToggleConfig;
use sonar_core::constants::*;
use sonar_core::enums::PeerRole;
use sonar_core::events::ToggleMessage;
use sonar_core::fade::Highlight;

/// Authoritative state waiting for the correction window to close.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingCorrection {
    pub active: bool,
    /// Sender-side timestamp of the newest queued message.
    pub sending_time: f64,
}

/// What to do with a received toggle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReceiveOutcome {
    /// Apply now; the authority also rebroadcasts.
    Apply {
        active: bool,
        rebroadcast: Option<ToggleMessage>,
    },
    /// Held until the correction window closes.
    Queued { active: bool },
}

/// A deferred correction that took effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedCorrection {
    pub active: bool,
    pub overrode_prediction: bool,
}

#[derive(Debug, Clone)]
pub struct ToggleSync {
    role: PeerRole,
    correction_delay: f32,
    correction_timer: f32,
    predicted: Option<bool>,
    pending: Option<PendingCorrection>,
    highlight: Highlight,
}

impl ToggleSync {
    pub fn new(config: &ToggleConfig) -> Self {
        Self {
            role: config.role,
            correction_delay: config.correction_delay,
            correction_timer: 0.0,
            predicted: None,
            pending: None,
            highlight: Highlight::default(),
        }
    }

    pub fn role(&self) -> PeerRole {
        self.role
    }

    /// Whether authoritative messages are currently being deferred.
    pub fn is_correcting(&self) -> bool {
        self.correction_timer > 0.0
    }

    pub fn pending(&self) -> Option<PendingCorrection> {
        self.pending
    }

    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    /// Local user flipped the switch. Returns the message to send.
    pub fn request(&mut self, active: bool) -> ToggleMessage {
        self.highlight = Highlight::new(REQUEST_HIGHLIGHT_FADE_IN, REQUEST_HIGHLIGHT_FADE_OUT);
        if self.role == PeerRole::Observer {
            self.correction_timer = self.correction_delay;
            self.predicted = Some(active);
        }
        ToggleMessage::new(active)
    }

    /// A toggle arrived from a remote peer.
    pub fn receive(&mut self, msg: ToggleMessage, sending_time: f64) -> ReceiveOutcome {
        match self.role {
            PeerRole::Authority => ReceiveOutcome::Apply {
                active: msg.active,
                rebroadcast: Some(msg),
            },
            PeerRole::Observer if self.is_correcting() => {
                // Latest message wins.
                self.pending = Some(PendingCorrection {
                    active: msg.active,
                    sending_time,
                });
                ReceiveOutcome::Queued { active: msg.active }
            }
            PeerRole::Observer => ReceiveOutcome::Apply {
                active: msg.active,
                rebroadcast: None,
            },
        }
    }

    /// Advance timers by `dt`. Returns the queued correction if the window
    /// closed this tick.
    pub fn advance(&mut self, dt: f32) -> Option<AppliedCorrection> {
        self.highlight.advance(dt);
        if !self.is_correcting() {
            return None;
        }
        self.correction_timer -= dt;
        if self.is_correcting() {
            return None;
        }
        self.correction_timer = 0.0;
        let predicted = self.predicted.take();
        let pending = self.pending.take()?;
        let overrode_prediction = predicted.is_some_and(|p| p != pending.active);
        if overrode_prediction {
            self.highlight =
                Highlight::new(CORRECTION_HIGHLIGHT_FADE_IN, CORRECTION_HIGHLIGHT_FADE_OUT);
        }
        Some(AppliedCorrection {
            active: pending.active,
            overrode_prediction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observer() -> ToggleSync {
        ToggleSync::new(&ToggleConfig {
            role: PeerRole::Observer,
            correction_delay: 1.0,
        })
    }

    #[test]
    fn test_authority_applies_and_rebroadcasts() {
        let mut sync = ToggleSync::new(&ToggleConfig::default());
        sync.request(true);
        assert!(!sync.is_correcting());
        let msg = ToggleMessage::new(false);
        assert_eq!(
            sync.receive(msg, 0.0),
            ReceiveOutcome::Apply {
                active: false,
                rebroadcast: Some(msg)
            }
        );
    }

    #[test]
    fn test_observer_defers_inside_window() {
        let mut sync = observer();
        sync.request(true);
        assert!(sync.is_correcting());

        assert_eq!(
            sync.receive(ToggleMessage::new(true), 1.0),
            ReceiveOutcome::Queued { active: true }
        );
        assert_eq!(
            sync.receive(ToggleMessage::new(false), 2.0),
            ReceiveOutcome::Queued { active: false }
        );
        assert_eq!(sync.pending().map(|p| p.sending_time), Some(2.0));

        assert!(sync.advance(0.5).is_none());
        let applied = sync.advance(0.6).unwrap();
        assert!(!applied.active);
        assert!(applied.overrode_prediction);
        assert!(!sync.is_correcting());
        assert!(sync.pending().is_none());
    }

    #[test]
    fn test_confirming_correction_does_not_override() {
        let mut sync = observer();
        sync.request(true);
        sync.receive(ToggleMessage::new(true), 0.0);
        let applied = sync.advance(2.0).unwrap();
        assert!(applied.active);
        assert!(!applied.overrode_prediction);
    }

    #[test]
    fn test_observer_applies_outside_window() {
        let mut sync = observer();
        assert_eq!(
            sync.receive(ToggleMessage::new(true), 0.0),
            ReceiveOutcome::Apply {
                active: true,
                rebroadcast: None
            }
        );
        sync.request(false);
        assert!(sync.advance(1.5).is_none());
    }

    #[test]
    fn test_request_pulses_highlight() {
        let mut sync = observer();
        assert_eq!(sync.highlight().alpha(), 0.0);
        sync.request(true);
        sync.advance(0.1);
        assert!(sync.highlight().alpha() > 0.9);
        sync.advance(1.0);
        assert_eq!(sync.highlight().alpha(), 0.0);
    }
}
