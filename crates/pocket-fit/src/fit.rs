//! Least-squares fit of the constant-deceleration trajectory.

use nalgebra::DVector;
use pocket_model::constants::{FRAME_RATE, GRAVITY, MEASUREMENT_NOISE_STD};
use pocket_model::{KinematicState, ObservationSequence, PocketError, Result};
use serde::{Deserialize, Serialize};

use crate::design::{NUM_PARAMS, design_matrix, solve_least_squares};
use crate::prediction::Prediction;

/// Configuration for the kinematic fit.
#[derive(Debug, Clone)]
pub struct FitConfig {
    /// Gravitational acceleration (m/s²).
    pub gravity: f64,
    /// Frame rate used when fitting raw position slices (frames/s).
    pub frame_rate: f64,
    /// Standard deviation of a single measurement (m).
    pub noise_std: f64,
    /// Relative singular value cutoff for rank deficiency.
    pub svd_tolerance: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            frame_rate: FRAME_RATE,
            noise_std: MEASUREMENT_NOISE_STD,
            svd_tolerance: 1e-12,
        }
    }
}

impl FitConfig {
    fn validate(&self) -> Result<()> {
        if !self.gravity.is_finite() || self.gravity <= 0.0 {
            return Err(PocketError::InvalidParameter(format!(
                "gravity must be positive and finite, got {}",
                self.gravity
            )));
        }
        if !self.noise_std.is_finite() || self.noise_std < 0.0 {
            return Err(PocketError::InvalidParameter(format!(
                "noise standard deviation must be non-negative, got {}",
                self.noise_std
            )));
        }
        if !self.svd_tolerance.is_finite() || self.svd_tolerance < 0.0 {
            return Err(PocketError::InvalidParameter(format!(
                "SVD tolerance must be non-negative, got {}",
                self.svd_tolerance
            )));
        }
        Ok(())
    }
}

/// Everything the fit learned from one observation sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    /// Estimated (s₀, u, α).
    pub state: KinematicState,
    /// Gravity used in the design matrix.
    pub gravity: f64,
    /// Observed minus fitted position for every sample.
    pub residuals: Vec<f64>,
    /// Sum of squared residuals.
    pub residual_sum_of_squares: f64,
    /// Root-mean-square residual.
    pub rms_residual: f64,
    /// N − 3.
    pub degrees_of_freedom: usize,
    /// RSS / σ², absent when the measurement noise is zero.
    pub chi_square: Option<f64>,
    /// Ratio of extreme singular values of the design matrix.
    pub condition_number: f64,
    /// σ²·(AᵀA)⁻¹ in (s₀, u, α) order.
    pub covariance: [[f64; NUM_PARAMS]; NUM_PARAMS],
    /// Square roots of the covariance diagonal, (s₀, u, α) order.
    pub standard_errors: [f64; NUM_PARAMS],
}

impl FitReport {
    /// Closed-form resting position of the fitted state.
    pub fn resting_position(&self) -> Result<f64> {
        self.state.resting_position(self.gravity)
    }

    /// Predict whether the ball stops at or beyond `target`.
    pub fn predict(&self, target: f64) -> Result<Prediction> {
        Prediction::new(&self.state, Some(&self.covariance), self.gravity, target)
    }
}

/// Least-squares estimator for the quadratic rolling model.
#[derive(Debug, Clone, Default)]
pub struct KinematicFit {
    /// Configuration.
    pub config: FitConfig,
}

impl KinematicFit {
    /// Create a fit with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fit with a custom configuration.
    pub fn with_config(config: FitConfig) -> Self {
        Self { config }
    }

    /// Fit raw positions sampled at the configured frame rate.
    pub fn fit_positions(&self, positions: &[f64]) -> Result<FitReport> {
        let observations = ObservationSequence::from_frame_rate(positions, self.config.frame_rate)?;
        self.fit(&observations)
    }

    /// Fit (s₀, u, α) to `observations`.
    pub fn fit(&self, observations: &ObservationSequence) -> Result<FitReport> {
        let n = observations.len();
        if n < NUM_PARAMS {
            return Err(PocketError::InsufficientData {
                required: NUM_PARAMS,
                found: n,
            });
        }
        self.config.validate()?;

        let gravity = self.config.gravity;
        let a = design_matrix(observations, gravity);
        let y = DVector::from_column_slice(observations.positions());
        let solution = solve_least_squares(&a, &y, self.config.svd_tolerance)?;

        let c = &solution.coefficients;
        let state = KinematicState::new(c[0], c[1], c[2]);

        let residuals: Vec<f64> = (&y - &a * c).iter().copied().collect();
        let rss: f64 = residuals.iter().map(|r| r * r).sum();
        let rms_residual = (rss / n as f64).sqrt();

        let variance = self.config.noise_std * self.config.noise_std;
        let chi_square = (variance > 0.0).then(|| rss / variance);

        let mut covariance = [[0.0; NUM_PARAMS]; NUM_PARAMS];
        for (i, row) in covariance.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = variance * solution.unscaled_covariance[(i, j)];
            }
        }
        let standard_errors = [0, 1, 2].map(|i| covariance[i][i].max(0.0).sqrt());

        log::debug!(
            "fit {} samples: s0 = {:.6}, u = {:.6}, alpha = {:.6}, rms = {:.3e}",
            n,
            state.position,
            state.velocity,
            state.friction,
            rms_residual
        );

        Ok(FitReport {
            state,
            gravity,
            residuals,
            residual_sum_of_squares: rss,
            rms_residual,
            degrees_of_freedom: n - NUM_PARAMS,
            chi_square,
            condition_number: solution.condition_number(),
            covariance,
            standard_errors,
        })
    }
}

/// Fit the kinematic state with the default noise model and a given gravity.
pub fn fit_kinematics(observations: &ObservationSequence, gravity: f64) -> Result<KinematicState> {
    let fit = KinematicFit::with_config(FitConfig {
        gravity,
        ..Default::default()
    });
    Ok(fit.fit(observations)?.state)
}
