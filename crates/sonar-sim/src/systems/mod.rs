//! Per-tick systems run by the `SensorStepper`.
//!
//! Systems are plain functions and borrowed helpers. They hold no state
//! between ticks; the stepper owns everything that persists.

pub mod sampler;
pub mod snapshot;
pub mod targets;
