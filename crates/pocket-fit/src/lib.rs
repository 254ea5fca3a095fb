//! Kinematic fit for a rolling ball observed at a fixed frame rate.
//!
//! Provides:
//! - Design matrix construction for the quadratic trajectory model
//! - SVD-based least-squares solve with conditioning checks
//! - Crude two-point estimate from adjacent-frame differences
//! - Parameter covariance and uncertainty of the predicted resting position

pub mod design;
pub mod estimate;
pub mod fit;
pub mod prediction;

pub use design::{LeastSquaresSolution, design_matrix, solve_least_squares};
pub use estimate::two_point_estimate;
pub use fit::{FitConfig, FitReport, KinematicFit, fit_kinematics};
pub use prediction::Prediction;
