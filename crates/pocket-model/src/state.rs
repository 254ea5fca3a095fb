//! Kinematic state of the constant-deceleration rolling model.
//!
//! Position follows s(t) = s₀ + u·t + ½·α·g·t², where the ball rolls toward
//! decreasing position (u < 0) and friction decelerates it (α > 0).

use serde::{Deserialize, Serialize};

use crate::error::{PocketError, Result};

/// (position, velocity, friction coefficient) at time zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicState {
    /// Initial position s₀ (m).
    pub position: f64,
    /// Initial velocity u (m/s), negative when moving toward the pocket.
    pub velocity: f64,
    /// Friction coefficient α (dimensionless).
    pub friction: f64,
}

impl KinematicState {
    pub fn new(position: f64, velocity: f64, friction: f64) -> Self {
        Self {
            position,
            velocity,
            friction,
        }
    }

    /// Deceleration magnitude α·g.
    #[inline]
    pub fn deceleration(&self, gravity: f64) -> f64 {
        self.friction * gravity
    }

    /// Model position at time `t`.
    #[inline]
    pub fn position_at(&self, t: f64, gravity: f64) -> f64 {
        self.position + self.velocity * t + 0.5 * self.deceleration(gravity) * t * t
    }

    /// Model velocity at time `t`.
    #[inline]
    pub fn velocity_at(&self, t: f64, gravity: f64) -> f64 {
        self.velocity + self.deceleration(gravity) * t
    }

    /// Whether all three components are finite.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.friction.is_finite()
    }

    /// Check that the state describes a ball slowing down toward rest.
    ///
    /// Requires α > 0, u < 0 and g > 0. Anything else has no resting
    /// position under the closed form.
    pub fn ensure_decelerating(&self, gravity: f64) -> Result<()> {
        if !self.is_finite() || !gravity.is_finite() {
            return Err(PocketError::Domain(format!(
                "non-finite kinematic state {:?} or gravity {}",
                self, gravity
            )));
        }
        if gravity <= 0.0 {
            return Err(PocketError::Domain(format!(
                "gravity must be positive, got {}",
                gravity
            )));
        }
        if self.friction <= 0.0 {
            return Err(PocketError::Domain(format!(
                "friction coefficient {} is not positive, ball never stops",
                self.friction
            )));
        }
        if self.velocity >= 0.0 {
            return Err(PocketError::Domain(format!(
                "velocity {} is not negative, trajectory is not decelerating toward rest",
                self.velocity
            )));
        }
        Ok(())
    }

    /// Time at which the velocity reaches zero: −u / (α·g).
    pub fn time_to_rest(&self, gravity: f64) -> Result<f64> {
        self.ensure_decelerating(gravity)?;
        Ok(-self.velocity / self.deceleration(gravity))
    }

    /// Closed-form resting position s₀ − u² / (2·α·g).
    pub fn resting_position(&self, gravity: f64) -> Result<f64> {
        self.ensure_decelerating(gravity)?;
        Ok(self.position - self.velocity * self.velocity / (2.0 * self.deceleration(gravity)))
    }
}
