//! Error types shared by the pocket crates.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PocketError {
    #[error("Insufficient data: need at least {required} observations, got {found}")]
    InsufficientData { required: usize, found: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Domain error: {0}")]
    Domain(String),

    #[error("Simulation did not come to rest within {steps} steps")]
    NonConvergence { steps: usize },

    #[error("Ill-conditioned system: {0}")]
    IllConditioned(String),
}

pub type Result<T> = std::result::Result<T, PocketError>;
