//! sfx-core: Shared types for the SoundFX effect core
//!
//! Sample aliases, PCM conversion helpers, the audio format descriptor and
//! the error type used across all SoundFX crates.

mod error;
mod sample;

pub use error::*;
pub use sample::*;

/// Input format of the host audio stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AudioFormat {
    pub sample_rate: u32,
    pub channels: usize,
}

impl AudioFormat {
    /// Create a validated format
    pub fn new(sample_rate: u32, channels: usize) -> SfxResult<Self> {
        if sample_rate == 0 || channels == 0 {
            return Err(SfxError::InvalidFormat {
                sample_rate,
                channels,
            });
        }

        Ok(Self {
            sample_rate,
            channels,
        })
    }

    #[inline]
    pub fn is_stereo(&self) -> bool {
        self.channels == 2
    }
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            channels: 2,
        }
    }
}
