//! Measurements of a single roll toward the pocket.

use crate::constants::FRAME_RATE;
use crate::error::Result;
use crate::observation::ObservationSequence;

/// Ball positions (m) over eight consecutive camera frames.
pub const MEASURED_POSITIONS: [f64; 8] = [
    0.6180, 0.6111, 0.6042, 0.5973, 0.5905, 0.5837, 0.5770, 0.5703,
];

/// The measured roll as an observation sequence at [`FRAME_RATE`].
pub fn measured_roll() -> Result<ObservationSequence> {
    ObservationSequence::from_frame_rate(MEASURED_POSITIONS.to_vec(), FRAME_RATE)
}
