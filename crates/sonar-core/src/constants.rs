//! Default tuning parameters.
//!
//! Every value here is also a field of `SonarConfig`; these are only the
//! starting points.

// --- Sensor ---

/// World-space sensing range.
pub const DEFAULT_RANGE: f32 = 10_000.0;

/// Radius of the sonar display in display units.
pub const DEFAULT_DISPLAY_RADIUS: f32 = 200.0;

/// Seconds for the active ring to travel from the centre to the display edge.
pub const DEFAULT_SWEEP_DURATION: f32 = 2.0;

/// Intensity lost per second by every blip.
pub const DEFAULT_DECAY_RATE: f32 = 0.5;

/// Ping strength of the active sweep.
pub const ACTIVE_PING_STRENGTH: f32 = 2.0;

/// Ping strength of passive detections.
pub const PASSIVE_PING_STRENGTH: f32 = 0.5;

/// Angular frequency (rad/s) of the passive oscillation.
pub const PASSIVE_FREQUENCY: f32 = 10.0;

/// Fraction of an emitter's range covered by its passive ring at full swing.
pub const PASSIVE_BAND_SCALE: f32 = 0.2;

/// Terrain cell search depth around the sensor.
pub const TERRAIN_RING_DEPTH: u32 = 7;

/// Largest accepted terrain search depth. Bounds the buckets visited per tick.
pub const MAX_TERRAIN_RING_DEPTH: u32 = 64;

/// Random offset applied to own-hull vertices when the own hull is sampled.
pub const OWN_HULL_JITTER: f32 = 500.0;

// --- Sampler ---

/// Line step jitter bounds (multiplicative).
pub const LINE_STEP_JITTER_MIN: f32 = 0.8;
pub const LINE_STEP_JITTER_MAX: f32 = 1.2;

/// Increase of the depth step after every depth blip.
pub const DEPTH_STEP_GROWTH: f32 = 0.5;

/// Per-axis distance within which weaker blips are overwritten.
pub const EVICTION_WINDOW: f32 = 200.0;

/// Maximum positional jitter of a depth blip (world units).
pub const BLIP_JITTER: f32 = 150.0;

/// Initial depth-walk alpha bounds, as multiples of the ping strength.
pub const ALPHA_MIN: f32 = 1.5;
pub const ALPHA_MAX: f32 = 2.0;

/// Alpha drop after the first depth blip, and the cap applied with it.
pub const FIRST_STEP_ALPHA_DROP: f32 = 0.5;
pub const FIRST_STEP_ALPHA_CAP: f32 = 1.5;

/// Alpha drop after every later depth blip.
pub const ALPHA_STEP_DECAY: f32 = 0.1;

// --- Per-source sampling profiles ---

pub const HULL_LINE_STEP: f32 = 200.0;
pub const HULL_DEPTH_STEP: f32 = 2.0;
pub const HULL_STRENGTH: f32 = 1.0;

pub const COMPARTMENT_LINE_STEP: f32 = 50.0;
pub const COMPARTMENT_DEPTH_STEP: f32 = 5.0;
pub const COMPARTMENT_STRENGTH: f32 = 2.0;

pub const TERRAIN_LINE_STEP: f32 = 350.0;
/// Multiplied by `(|facing| + 1)` per edge.
pub const TERRAIN_DEPTH_STEP: f32 = 3.0;

pub const RUIN_LINE_STEP: f32 = 100.0;
pub const RUIN_DEPTH_STEP: f32 = 1000.0;

pub const LEVEL_BOUNDARY_LINE_STEP: f32 = 250.0;
pub const LEVEL_BOUNDARY_DEPTH_STEP: f32 = 150.0;

// --- Point targets ---

pub const POINT_MIN_INTENSITY: f32 = 0.1;
pub const POINT_MIN_SCALE: f32 = 0.1;
pub const ITEM_MAX_SCALE: f32 = 10.0;
pub const LIMB_MAX_SCALE: f32 = 2.0;

// --- Toggle sync ---

/// Seconds during which authoritative toggles are deferred after a local change.
pub const CORRECTION_DELAY: f32 = 1.0;

/// Toggle indicator fades (seconds).
pub const REQUEST_HIGHLIGHT_FADE_IN: f32 = 0.1;
pub const REQUEST_HIGHLIGHT_FADE_OUT: f32 = 0.4;
pub const CORRECTION_HIGHLIGHT_FADE_IN: f32 = 0.1;
pub const CORRECTION_HIGHLIGHT_FADE_OUT: f32 = 0.9;

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 42;
