//! Whether the ball reaches a target, with first-order uncertainty.

use pocket_model::{KinematicState, Result};
use serde::{Deserialize, Serialize};

use crate::design::NUM_PARAMS;

/// Predicted outcome of a roll toward `target`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Closed-form resting position (m).
    pub resting_position: f64,
    /// Standard deviation of the resting position, when a covariance is known.
    pub resting_std: Option<f64>,
    /// Time until the ball stops (s).
    pub time_to_rest: f64,
    /// Target position (m).
    pub target: f64,
    /// The ball rolls toward decreasing position, so it reaches the target
    /// when it stops at or below it.
    pub reaches_target: bool,
    /// (target − resting position) / σ. Positive when the ball reaches the target.
    pub margin_sigmas: Option<f64>,
}

impl Prediction {
    /// Build a prediction from a state and an optional (s₀, u, α) covariance.
    ///
    /// The resting-position variance is propagated to first order through
    /// R = s₀ − u²/(2αg), whose gradient is
    /// [1, −u/(αg), u²/(2α²g)].
    pub fn new(
        state: &KinematicState,
        covariance: Option<&[[f64; NUM_PARAMS]; NUM_PARAMS]>,
        gravity: f64,
        target: f64,
    ) -> Result<Self> {
        let resting_position = state.resting_position(gravity)?;
        let time_to_rest = state.time_to_rest(gravity)?;

        let resting_std = covariance.map(|cov| {
            let u = state.velocity;
            let alpha = state.friction;
            let grad = [
                1.0,
                -u / (alpha * gravity),
                u * u / (2.0 * alpha * alpha * gravity),
            ];
            let mut variance = 0.0_f64;
            for i in 0..NUM_PARAMS {
                for j in 0..NUM_PARAMS {
                    variance += grad[i] * cov[i][j] * grad[j];
                }
            }
            variance.max(0.0).sqrt()
        });

        let margin_sigmas = resting_std
            .filter(|s| *s > 0.0)
            .map(|s| (target - resting_position) / s);

        Ok(Self {
            resting_position,
            resting_std,
            time_to_rest,
            target,
            reaches_target: resting_position <= target,
            margin_sigmas,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pocket_model::{GRAVITY, PocketError};

    #[test]
    fn test_without_covariance() {
        let state = KinematicState::new(0.6, -0.35, 0.01);
        let p = Prediction::new(&state, None, GRAVITY, 0.0).unwrap();
        assert_relative_eq!(p.resting_position, state.resting_position(GRAVITY).unwrap());
        assert!(p.resting_std.is_none());
        assert!(p.margin_sigmas.is_none());
        assert_eq!(p.reaches_target, p.resting_position <= 0.0);
    }

    #[test]
    fn test_position_variance_passes_through() {
        // Only s₀ is uncertain, so σ_R = σ_s₀.
        let state = KinematicState::new(0.6, -0.35, 0.01);
        let mut cov = [[0.0; 3]; 3];
        cov[0][0] = 0.01 * 0.01;
        let p = Prediction::new(&state, Some(&cov), GRAVITY, 0.0).unwrap();
        assert_relative_eq!(p.resting_std.unwrap(), 0.01, epsilon = 1e-12);
        assert_relative_eq!(
            p.margin_sigmas.unwrap(),
            -p.resting_position / 0.01,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_friction_gradient_matches_finite_difference() {
        let state = KinematicState::new(0.6, -0.35, 0.01);
        let sigma = 1e-4;
        let mut cov = [[0.0; 3]; 3];
        cov[2][2] = sigma * sigma;
        let p = Prediction::new(&state, Some(&cov), GRAVITY, 0.0).unwrap();

        let h = 1e-7;
        let plus = KinematicState::new(0.6, -0.35, 0.01 + h);
        let minus = KinematicState::new(0.6, -0.35, 0.01 - h);
        let slope = (plus.resting_position(GRAVITY).unwrap()
            - minus.resting_position(GRAVITY).unwrap())
            / (2.0 * h);
        assert_relative_eq!(p.resting_std.unwrap(), slope.abs() * sigma, max_relative = 1e-5);
    }

    #[test]
    fn test_reaches_target() {
        let state = KinematicState::new(0.2, -0.5, 0.02);
        let p = Prediction::new(&state, None, GRAVITY, 0.0).unwrap();
        assert!(p.resting_position < 0.0);
        assert!(p.reaches_target);
    }

    #[test]
    fn test_domain_error_propagates() {
        let state = KinematicState::new(0.2, -0.5, 0.0);
        assert!(matches!(
            Prediction::new(&state, None, GRAVITY, 0.0),
            Err(PocketError::Domain(_))
        ));
    }
}
