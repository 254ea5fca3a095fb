//! Crude kinematic estimate from finite differences of the first and last frames.

use pocket_model::{KinematicState, ObservationSequence, PocketError, Result};

use crate::design::NUM_PARAMS;

/// Estimate (s₀, u, α) from adjacent-frame differences.
///
/// s₀ is the first sample, u the velocity between the first two frames and
/// α follows from the change between that velocity and the one between the
/// last two frames, which are N − 2 frames apart. Ignores every sample in
/// between, so it is very sensitive to measurement noise.
pub fn two_point_estimate(
    observations: &ObservationSequence,
    gravity: f64,
) -> Result<KinematicState> {
    let n = observations.len();
    if n < NUM_PARAMS {
        return Err(PocketError::InsufficientData {
            required: NUM_PARAMS,
            found: n,
        });
    }
    if !gravity.is_finite() || gravity <= 0.0 {
        return Err(PocketError::InvalidParameter(format!(
            "gravity must be positive and finite, got {}",
            gravity
        )));
    }

    let x = observations.positions();
    let period = observations.period();

    let v_first = (x[1] - x[0]) / period;
    let v_last = (x[n - 1] - x[n - 2]) / period;
    let separation = (n - 2) as f64 * period;
    let acceleration = (v_last - v_first) / separation;

    Ok(KinematicState::new(x[0], v_first, acceleration / gravity))
}
