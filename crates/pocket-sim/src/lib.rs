//! Forward simulation of a ball rolling to rest.
//!
//! The ball moves toward decreasing position and friction supplies a constant
//! deceleration α·g. The simulator steps the equation of motion with a fixed
//! time step until the velocity is no longer negative and reports where the
//! ball stopped.

pub mod integrator;
pub mod simulator;

pub use integrator::{ExplicitEuler, Integrator, RollState, SemiImplicitEuler};
pub use simulator::{ForwardSimulator, SimulatorConfig, TrajectorySample};
