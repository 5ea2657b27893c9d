//! Error types for the tempo engine

use thiserror::Error;

/// Engine-wide errors
#[derive(Error, Debug)]
pub enum TempoError {
    // Command errors
    #[error("Invalid speed factor: {0}")]
    InvalidSpeed(f64),

    // Engine lifecycle errors
    #[error("Engine not installed")]
    NotInstalled,

    #[error("Engine already installed")]
    AlreadyInstalled,

    // Source errors
    #[error("Time source read failed")]
    SourceReadFailed,

    // Channel errors
    #[error("Channel error: {0}")]
    ChannelError(String),
}

/// Result type for tempo operations
pub type TempoResult<T> = Result<T, TempoError>;
