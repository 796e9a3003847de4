use regi_lie::LieError;

/// Error types for the perturbation pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PerturbError {
    /// The requested number of samples is zero.
    #[error("number of samples must be positive, got {0}")]
    InvalidSampleCount(usize),

    /// A sampling standard deviation is negative or not finite.
    #[error("standard deviation of {name} must be finite and non-negative, got {value}")]
    InvalidStdDev {
        /// Name of the offending dimension.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The camera model is not usable.
    #[error("invalid camera model: {0}")]
    InvalidCamera(String),

    /// A transform is not rigid.
    #[error(transparent)]
    Lie(#[from] LieError),

    /// The record sink failed to accept a sample.
    #[error("record sink failed: {0}")]
    Sink(#[source] Box<dyn std::error::Error + Send + Sync>),
}
