//! Noisy position measurements sampled at a fixed frame period.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::{PocketError, Result};
use crate::state::KinematicState;

/// A single timestamped position measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Time since the first frame (s).
    pub time: f64,
    /// Measured position (m).
    pub position: f64,
}

/// Ordered position measurements, one per frame.
///
/// Sample `n` is taken at `n · period`. The sequence cannot be modified
/// after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationSequence {
    positions: Vec<f64>,
    period: f64,
}

impl ObservationSequence {
    /// Build a sequence from positions measured every `period` seconds.
    pub fn from_positions(positions: impl Into<Vec<f64>>, period: f64) -> Result<Self> {
        if !period.is_finite() || period <= 0.0 {
            return Err(PocketError::InvalidParameter(format!(
                "sampling period must be positive and finite, got {}",
                period
            )));
        }
        let positions = positions.into();
        if let Some(idx) = positions.iter().position(|p| !p.is_finite()) {
            return Err(PocketError::InvalidParameter(format!(
                "observation {} is not finite: {}",
                idx, positions[idx]
            )));
        }
        Ok(Self { positions, period })
    }

    /// Build a sequence from positions measured at `frame_rate` samples per second.
    pub fn from_frame_rate(positions: impl Into<Vec<f64>>, frame_rate: f64) -> Result<Self> {
        if !frame_rate.is_finite() || frame_rate <= 0.0 {
            return Err(PocketError::InvalidParameter(format!(
                "frame rate must be positive and finite, got {}",
                frame_rate
            )));
        }
        Self::from_positions(positions, 1.0 / frame_rate)
    }

    /// Sample the quadratic model at `n` frames and add i.i.d. Gaussian noise.
    ///
    /// A `noise_std` of zero yields exact model positions.
    pub fn synthesize<R: Rng + ?Sized>(
        state: &KinematicState,
        n: usize,
        period: f64,
        gravity: f64,
        noise_std: f64,
        rng: &mut R,
    ) -> Result<Self> {
        if !noise_std.is_finite() || noise_std < 0.0 {
            return Err(PocketError::InvalidParameter(format!(
                "noise standard deviation must be non-negative, got {}",
                noise_std
            )));
        }
        let noise = Normal::new(0.0, noise_std)
            .map_err(|e| PocketError::InvalidParameter(format!("noise distribution: {}", e)))?;

        let positions: Vec<f64> = (0..n)
            .map(|i| {
                let exact = state.position_at(i as f64 * period, gravity);
                if noise_std > 0.0 {
                    exact + noise.sample(&mut *rng)
                } else {
                    exact
                }
            })
            .collect();

        Self::from_positions(positions, period)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if the sequence has no samples.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Time between samples (s).
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Measured positions in sample order.
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Time of sample `n`.
    #[inline]
    pub fn time_of(&self, n: usize) -> f64 {
        n as f64 * self.period
    }

    /// Sample timestamps.
    pub fn times(&self) -> Vec<f64> {
        (0..self.len()).map(|n| self.time_of(n)).collect()
    }

    /// Time of the last sample, zero when empty.
    pub fn duration(&self) -> f64 {
        self.len().checked_sub(1).map_or(0.0, |last| self.time_of(last))
    }

    /// Iterate over timestamped observations.
    pub fn iter(&self) -> impl Iterator<Item = Observation> + '_ {
        self.positions
            .iter()
            .enumerate()
            .map(|(n, &position)| Observation {
                time: self.time_of(n),
                position,
            })
    }
}
