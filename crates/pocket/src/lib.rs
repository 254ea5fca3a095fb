//! pocket — will a rolling ball reach the pocket?
//!
//! This is the umbrella crate that runs the estimation methods side by side
//! and re-exports the types from the sub-crates.

pub use pocket_fit::{
    self, FitConfig, FitReport, KinematicFit, Prediction, fit_kinematics, two_point_estimate,
};
pub use pocket_model::{
    self, KinematicState, Observation, ObservationSequence, PocketError, Result, constants,
    dataset,
};
pub use pocket_sim::{
    self, ExplicitEuler, ForwardSimulator, Integrator, SemiImplicitEuler, SimulatorConfig,
    TrajectorySample,
};

use serde::{Deserialize, Serialize};

/// Resting position of one estimated state, by closed form and by simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MethodOutcome {
    /// Estimated (s₀, u, α).
    pub state: KinematicState,
    /// s₀ − u²/(2αg), absent when the state never comes to rest.
    pub closed_form: Option<f64>,
    /// Forward-simulated resting position, absent when the simulation fails.
    pub simulated: Option<f64>,
}

impl MethodOutcome {
    fn evaluate(label: &str, state: KinematicState, sim: &ForwardSimulator) -> Self {
        let closed_form = state
            .resting_position(sim.config.gravity)
            .map_err(|e| log::warn!("{}: no closed-form resting position: {}", label, e))
            .ok();
        let simulated = sim
            .simulate(&state)
            .map_err(|e| log::warn!("{}: simulation failed: {}", label, e))
            .ok();
        Self {
            state,
            closed_form,
            simulated,
        }
    }
}

/// All methods applied to one observation sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Crude first/last-frame estimate.
    pub two_point: MethodOutcome,
    /// Least-squares estimate.
    pub least_squares: MethodOutcome,
    /// Full least-squares report.
    pub fit: FitReport,
    /// Uncertainty-aware prediction from the least-squares fit, absent when
    /// the fitted state never comes to rest.
    pub prediction: Option<Prediction>,
}

/// Run the two-point estimate and the least-squares fit on `observations`,
/// simulate both, and predict the outcome against `target`.
///
/// The simulator and the fit must agree on gravity.
pub fn analyze(
    observations: &ObservationSequence,
    fit: &KinematicFit,
    sim: &ForwardSimulator,
    target: f64,
) -> Result<Analysis> {
    if fit.config.gravity != sim.config.gravity {
        return Err(PocketError::InvalidParameter(format!(
            "fit gravity {} differs from simulator gravity {}",
            fit.config.gravity, sim.config.gravity
        )));
    }

    let two_point_state = two_point_estimate(observations, fit.config.gravity)?;
    let report = fit.fit(observations)?;
    let prediction = report
        .predict(target)
        .map_err(|e| log::warn!("least-squares: no prediction: {}", e))
        .ok();

    Ok(Analysis {
        two_point: MethodOutcome::evaluate("two-point", two_point_state, sim),
        least_squares: MethodOutcome::evaluate("least-squares", report.state, sim),
        fit: report,
        prediction,
    })
}
