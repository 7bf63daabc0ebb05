//! Error types for the SoundFX effect core

use thiserror::Error;

/// Core error type
///
/// Configuration errors are raised while building an engine or processor.
/// Everything else is a contract violation: it means the caller (or the
/// effect itself) broke an invariant, not that the audio data was bad.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SfxError {
    #[error("Invalid FFT size: {0} (must be at least 1)")]
    InvalidSize(usize),

    #[error("HRIR tables differ in length: same side {same_side}, opposite side {opposite_side}")]
    HrirLengthMismatch {
        same_side: usize,
        opposite_side: usize,
    },

    #[error("Invalid audio format: {sample_rate} Hz, {channels} channels")]
    InvalidFormat { sample_rate: u32, channels: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("Complex buffer must hold [re, im] pairs, got odd or empty length {0}")]
    OddLength(usize),

    #[error("FFT engine was already released")]
    EngineReleased,

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Buffer size mismatch: expected {expected}, got {got}")]
    BufferSizeMismatch { expected: usize, got: usize },
}

/// Result type alias
pub type SfxResult<T> = Result<T, SfxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SfxError::LengthMismatch {
            expected: 512,
            got: 400,
        };
        assert_eq!(err.to_string(), "Length mismatch: expected 512, got 400");

        let err = SfxError::InvalidSize(0);
        assert!(err.to_string().contains("at least 1"));
    }
}
