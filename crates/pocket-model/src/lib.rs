//! Model types for predicting where a rolling ball comes to rest.
//!
//! `KinematicState` is the (position, velocity, friction) triple of the
//! constant-deceleration model. `ObservationSequence` is the immutable set of
//! noisy position samples taken at a fixed frame period.

pub mod constants;
pub mod dataset;
pub mod error;
pub mod observation;
pub mod state;

pub use constants::{FRAME_PERIOD, FRAME_RATE, GRAVITY};
pub use error::{PocketError, Result};
pub use observation::{Observation, ObservationSequence};
pub use state::KinematicState;
