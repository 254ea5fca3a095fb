//! Design matrix and least-squares solve.
//!
//! Row n of the design matrix is [1, tₙ, ½·g·tₙ²], so the coefficient vector
//! is [s₀, u, α]. For short observation windows the quadratic column is
//! almost a multiple of the linear one, so the solve goes through the SVD of
//! the design matrix rather than the normal equations.

use nalgebra::{DMatrix, DVector, Matrix3};
use pocket_model::{ObservationSequence, PocketError, Result};

/// Number of fitted parameters (s₀, u, α).
pub const NUM_PARAMS: usize = 3;

/// Condition numbers above this are logged as a warning.
const CONDITION_WARN: f64 = 1e8;

/// Build the N×3 design matrix for `observations`.
pub fn design_matrix(observations: &ObservationSequence, gravity: f64) -> DMatrix<f64> {
    let n = observations.len();
    DMatrix::from_fn(n, NUM_PARAMS, |row, col| {
        let t = observations.time_of(row);
        match col {
            0 => 1.0,
            1 => t,
            _ => 0.5 * gravity * t * t,
        }
    })
}

/// Output of [`solve_least_squares`].
#[derive(Debug, Clone)]
pub struct LeastSquaresSolution {
    /// Coefficients minimizing ‖A·x − y‖².
    pub coefficients: DVector<f64>,
    /// Singular values of the design matrix.
    pub singular_values: DVector<f64>,
    /// Unscaled parameter covariance (AᵀA)⁻¹.
    pub unscaled_covariance: Matrix3<f64>,
}

impl LeastSquaresSolution {
    /// Ratio of largest to smallest singular value.
    pub fn condition_number(&self) -> f64 {
        let max = self.singular_values.max();
        let min = self.singular_values.min();
        if min > 0.0 { max / min } else { f64::INFINITY }
    }
}

/// Solve min ‖A·x − y‖² for a three-column design matrix using the SVD.
///
/// Singular values at or below `tolerance · σ_max` mark the system as rank
/// deficient and the solve fails with [`PocketError::IllConditioned`].
pub fn solve_least_squares(
    a: &DMatrix<f64>,
    y: &DVector<f64>,
    tolerance: f64,
) -> Result<LeastSquaresSolution> {
    if a.ncols() != NUM_PARAMS {
        return Err(PocketError::InvalidParameter(format!(
            "design matrix must have {} columns, got {}",
            NUM_PARAMS,
            a.ncols()
        )));
    }
    if a.nrows() < NUM_PARAMS {
        return Err(PocketError::InsufficientData {
            required: NUM_PARAMS,
            found: a.nrows(),
        });
    }
    if a.nrows() != y.len() {
        return Err(PocketError::InvalidParameter(format!(
            "design matrix has {} rows but {} observations",
            a.nrows(),
            y.len()
        )));
    }

    let svd = a.clone().svd(true, true);
    let singular_values = svd.singular_values.clone();
    let sv_max = singular_values.max();
    let sv_min = singular_values.min();
    let cutoff = tolerance * sv_max;

    if !(sv_max > 0.0) || sv_min <= cutoff {
        return Err(PocketError::IllConditioned(format!(
            "design matrix is rank deficient (singular values {:?})",
            singular_values.as_slice()
        )));
    }

    let coefficients = svd
        .solve(y, cutoff)
        .map_err(|e| PocketError::IllConditioned(e.to_string()))?;
    if coefficients.iter().any(|c| !c.is_finite()) {
        return Err(PocketError::IllConditioned(
            "least-squares solution is not finite".to_string(),
        ));
    }

    let v_t = svd
        .v_t
        .ok_or_else(|| PocketError::IllConditioned("SVD did not produce Vᵀ".to_string()))?;
    // (AᵀA)⁻¹ = V·Σ⁻²·Vᵀ
    let unscaled_covariance = Matrix3::from_fn(|i, j| {
        (0..NUM_PARAMS)
            .map(|k| v_t[(k, i)] * v_t[(k, j)] / (singular_values[k] * singular_values[k]))
            .sum::<f64>()
    });

    let solution = LeastSquaresSolution {
        coefficients,
        singular_values,
        unscaled_covariance,
    };
    let cond = solution.condition_number();
    if cond > CONDITION_WARN {
        log::warn!("design matrix is poorly conditioned (κ = {:.3e})", cond);
    }
    Ok(solution)
}
