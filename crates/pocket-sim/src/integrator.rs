//! Fixed-step integrators for one-dimensional rolling motion.

/// Mutable position/velocity pair advanced by an [`Integrator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollState {
    /// Position (m).
    pub position: f64,
    /// Velocity (m/s).
    pub velocity: f64,
    /// Elapsed time (s).
    pub time: f64,
}

impl RollState {
    pub fn new(position: f64, velocity: f64) -> Self {
        Self {
            position,
            velocity,
            time: 0.0,
        }
    }

    /// Whether the ball has stopped (or is moving away from the pocket).
    #[inline]
    pub fn at_rest(&self) -> bool {
        self.velocity >= 0.0
    }
}

/// Pluggable integration scheme.
///
/// Implementations advance `state` by `dt` under a constant `acceleration`.
pub trait Integrator {
    fn step(&self, state: &mut RollState, acceleration: f64, dt: f64);

    /// Short name used in log output.
    fn name(&self) -> &'static str;
}

/// Explicit (forward) Euler: position moves with the old velocity, then the
/// velocity is updated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitEuler;

impl Integrator for ExplicitEuler {
    #[inline]
    fn step(&self, state: &mut RollState, acceleration: f64, dt: f64) {
        state.position += state.velocity * dt;
        state.velocity += acceleration * dt;
        state.time += dt;
    }

    fn name(&self) -> &'static str {
        "explicit-euler"
    }
}

/// Semi-implicit Euler: velocity first, then position with the new velocity.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    #[inline]
    fn step(&self, state: &mut RollState, acceleration: f64, dt: f64) {
        state.velocity += acceleration * dt;
        state.position += state.velocity * dt;
        state.time += dt;
    }

    fn name(&self) -> &'static str {
        "semi-implicit-euler"
    }
}
