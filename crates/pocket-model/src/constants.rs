//! Physical constants and defaults shared by the simulator and the fit.

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f64 = 9.8;

/// Camera frame rate (frames per second).
pub const FRAME_RATE: f64 = 50.0;

/// Time between consecutive frames (s).
pub const FRAME_PERIOD: f64 = 1.0 / FRAME_RATE;

/// Fixed integration step for the forward simulator (s).
pub const DEFAULT_DT: f64 = 0.001;

/// Upper bound on simulator iterations before giving up.
pub const DEFAULT_MAX_STEPS: usize = 10_000_000;

/// Standard deviation of a single position measurement (m).
pub const MEASUREMENT_NOISE_STD: f64 = 0.0005;

/// Position of the pocket along the rolling axis (m).
pub const POCKET_POSITION: f64 = 0.0;
