//! Fixed-step forward simulator that runs the ball until it stops.

use pocket_model::constants::{DEFAULT_DT, DEFAULT_MAX_STEPS, GRAVITY};
use pocket_model::{KinematicState, PocketError, Result};
use serde::{Deserialize, Serialize};

use crate::integrator::{ExplicitEuler, Integrator, RollState};

/// Configuration for the forward simulator.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Integration step (s).
    pub dt: f64,
    /// Gravitational acceleration (m/s²).
    pub gravity: f64,
    /// Maximum number of steps before reporting non-convergence.
    pub max_steps: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            gravity: GRAVITY,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl SimulatorConfig {
    fn validate(&self) -> Result<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(PocketError::InvalidParameter(format!(
                "time step must be positive and finite, got {}",
                self.dt
            )));
        }
        if !self.gravity.is_finite() || self.gravity <= 0.0 {
            return Err(PocketError::InvalidParameter(format!(
                "gravity must be positive and finite, got {}",
                self.gravity
            )));
        }
        Ok(())
    }
}

/// One recorded point of a simulated roll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub time: f64,
    pub position: f64,
    pub velocity: f64,
}

impl From<&RollState> for TrajectorySample {
    fn from(state: &RollState) -> Self {
        Self {
            time: state.time,
            position: state.position,
            velocity: state.velocity,
        }
    }
}

/// Steps the rolling ball forward until its velocity is non-negative.
pub struct ForwardSimulator {
    integrator: Box<dyn Integrator>,
    /// Configuration.
    pub config: SimulatorConfig,
}

impl ForwardSimulator {
    /// Create a simulator with explicit Euler and the default configuration.
    pub fn new() -> Self {
        Self::with_config(SimulatorConfig::default())
    }

    /// Create an explicit Euler simulator with a custom configuration.
    pub fn with_config(config: SimulatorConfig) -> Self {
        Self {
            integrator: Box::new(ExplicitEuler),
            config,
        }
    }

    /// Create a simulator with a custom integrator.
    pub fn with_integrator(integrator: Box<dyn Integrator>, config: SimulatorConfig) -> Self {
        Self { integrator, config }
    }

    /// Resting position of a ball released at `position` with `velocity`
    /// under friction coefficient `friction`.
    ///
    /// A ball that is not moving toward the pocket (velocity ≥ 0) is returned
    /// where it is without stepping. Otherwise `friction` must be positive.
    pub fn resting_position(&self, position: f64, velocity: f64, friction: f64) -> Result<f64> {
        let end = self.run(position, velocity, friction, |_| {})?;
        Ok(end.position)
    }

    /// Resting position for a kinematic state.
    pub fn simulate(&self, state: &KinematicState) -> Result<f64> {
        self.resting_position(state.position, state.velocity, state.friction)
    }

    /// Record the roll every `record_every` steps, always including the
    /// initial and final states.
    pub fn trajectory(
        &self,
        state: &KinematicState,
        record_every: usize,
    ) -> Result<Vec<TrajectorySample>> {
        if record_every == 0 {
            return Err(PocketError::InvalidParameter(
                "record_every must be at least 1".to_string(),
            ));
        }

        let mut samples = Vec::new();
        let mut step = 0usize;
        let end = self.run(state.position, state.velocity, state.friction, |s| {
            if step % record_every == 0 {
                samples.push(TrajectorySample::from(s));
            }
            step += 1;
        })?;

        // Final state is recorded unless the last step already landed on it.
        if (step - 1) % record_every != 0 {
            samples.push(TrajectorySample::from(&end));
        }
        Ok(samples)
    }

    /// Integrate to rest, calling `observe` on the state before every step
    /// and once on the final state.
    fn run(
        &self,
        position: f64,
        velocity: f64,
        friction: f64,
        mut observe: impl FnMut(&RollState),
    ) -> Result<RollState> {
        self.config.validate()?;
        if !position.is_finite() || !velocity.is_finite() || !friction.is_finite() {
            return Err(PocketError::InvalidParameter(format!(
                "non-finite initial conditions: position {}, velocity {}, friction {}",
                position, velocity, friction
            )));
        }

        let mut state = RollState::new(position, velocity);
        if state.at_rest() {
            observe(&state);
            return Ok(state);
        }
        if friction <= 0.0 {
            return Err(PocketError::InvalidParameter(format!(
                "friction coefficient must be positive for a moving ball, got {}",
                friction
            )));
        }

        let acceleration = friction * self.config.gravity;
        let dt = self.config.dt;
        let mut steps = 0usize;

        while !state.at_rest() {
            if steps >= self.config.max_steps {
                log::warn!(
                    "{} did not reach rest after {} steps (v = {:.6e})",
                    self.integrator.name(),
                    steps,
                    state.velocity
                );
                return Err(PocketError::NonConvergence { steps });
            }
            observe(&state);
            self.integrator.step(&mut state, acceleration, dt);
            steps += 1;
        }
        observe(&state);

        log::debug!(
            "{}: rest at {:.6} m after {} steps ({:.3} s)",
            self.integrator.name(),
            state.position,
            steps,
            state.time
        );
        Ok(state)
    }
}

impl Default for ForwardSimulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrator::SemiImplicitEuler;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_non_negative_velocity_returns_initial_position() {
        let sim = ForwardSimulator::new();
        assert_eq!(sim.resting_position(0.4, 0.0, 0.01).unwrap(), 0.4);
        assert_eq!(sim.resting_position(0.4, 0.2, 0.01).unwrap(), 0.4);
        // Velocity is checked before friction.
        assert_eq!(sim.resting_position(0.4, 0.0, 0.0).unwrap(), 0.4);
        assert_eq!(sim.resting_position(0.4, 1.0, -3.0).unwrap(), 0.4);
    }

    #[test]
    fn test_non_positive_friction_is_rejected() {
        let sim = ForwardSimulator::new();
        for friction in [0.0, -0.01] {
            assert!(matches!(
                sim.resting_position(0.6, -0.3, friction),
                Err(PocketError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_non_finite_inputs_are_rejected() {
        let sim = ForwardSimulator::new();
        assert!(matches!(
            sim.resting_position(f64::NAN, -0.3, 0.01),
            Err(PocketError::InvalidParameter(_))
        ));
        assert!(matches!(
            sim.resting_position(0.6, f64::NEG_INFINITY, 0.01),
            Err(PocketError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let sim = ForwardSimulator::with_config(SimulatorConfig {
            dt: 0.0,
            ..Default::default()
        });
        assert!(matches!(
            sim.resting_position(0.6, -0.3, 0.01),
            Err(PocketError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_step_limit_reports_non_convergence() {
        let sim = ForwardSimulator::with_config(SimulatorConfig {
            max_steps: 100,
            ..Default::default()
        });
        assert_eq!(
            sim.resting_position(0.6, -0.3, 0.01),
            Err(PocketError::NonConvergence { steps: 100 })
        );
    }

    #[test]
    fn test_matches_closed_form() {
        let sim = ForwardSimulator::new();
        let dt = sim.config.dt;
        let cases = [
            KinematicState::new(0.61802, -0.34818, 0.01063),
            KinematicState::new(0.0, -1.0, 0.2),
            KinematicState::new(2.5, -0.05, 0.5),
            KinematicState::new(-1.0, -3.0, 0.05),
        ];
        for state in cases {
            let simulated = sim.simulate(&state).unwrap();
            let exact = state.resting_position(GRAVITY).unwrap();
            let tol = state.velocity.abs() * dt + state.deceleration(GRAVITY) * dt * dt;
            assert_abs_diff_eq!(simulated, exact, epsilon = tol);
        }
    }

    #[test]
    fn test_semi_implicit_matches_closed_form() {
        let sim = ForwardSimulator::with_integrator(
            Box::new(SemiImplicitEuler),
            SimulatorConfig::default(),
        );
        let state = KinematicState::new(0.6, -0.35, 0.01);
        let simulated = sim.simulate(&state).unwrap();
        let exact = state.resting_position(GRAVITY).unwrap();
        assert_abs_diff_eq!(simulated, exact, epsilon = 0.35 * 1e-3 + 1e-6);
    }

    #[test]
    fn test_smaller_step_is_more_accurate() {
        let state = KinematicState::new(0.6, -0.35, 0.01);
        let exact = state.resting_position(GRAVITY).unwrap();
        let coarse = ForwardSimulator::with_config(SimulatorConfig {
            dt: 0.01,
            ..Default::default()
        });
        let fine = ForwardSimulator::with_config(SimulatorConfig {
            dt: 0.0001,
            ..Default::default()
        });
        let coarse_err = (coarse.simulate(&state).unwrap() - exact).abs();
        let fine_err = (fine.simulate(&state).unwrap() - exact).abs();
        assert!(fine_err < coarse_err);
    }

    #[test]
    fn test_trajectory_records_start_and_rest() {
        let sim = ForwardSimulator::new();
        let state = KinematicState::new(0.6, -0.35, 0.01);
        let samples = sim.trajectory(&state, 100).unwrap();

        let first = samples.first().unwrap();
        assert_eq!(first.time, 0.0);
        assert_eq!(first.position, 0.6);
        assert_eq!(first.velocity, -0.35);

        let last = samples.last().unwrap();
        assert!(last.velocity >= 0.0);
        assert_eq!(last.position, sim.simulate(&state).unwrap());

        // Times strictly increase and the ball never reverses.
        for w in samples.windows(2) {
            assert!(w[1].time > w[0].time);
            assert!(w[1].position <= w[0].position);
        }
    }

    #[test]
    fn test_trajectory_of_resting_ball_is_single_sample() {
        let sim = ForwardSimulator::new();
        let samples = sim
            .trajectory(&KinematicState::new(0.3, 0.0, 0.01), 10)
            .unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].position, 0.3);
    }

    #[test]
    fn test_trajectory_rejects_zero_stride() {
        let sim = ForwardSimulator::new();
        assert!(
            sim.trajectory(&KinematicState::new(0.6, -0.35, 0.01), 0)
                .is_err()
        );
    }
}
