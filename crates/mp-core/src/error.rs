//! Error types for Multipole

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum MpError {
    #[error("Invalid parameter: {0}")]
    InvalidParam(String),

    #[error("Invalid sample rate: {0}")]
    InvalidSampleRate(f64),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias
pub type MpResult<T> = Result<T, MpError>;
