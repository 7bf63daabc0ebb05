//! sfx-dsp: Sound effects for the SoundFX core
//!
//! Block-based effects a host audio pipeline runs on planar float samples.
//!
//! ## Modules
//! - `fft` - Complex FFT engine on interleaved `[re, im]` buffers
//! - `binaural` - HRTF virtual surround (two virtual front speakers)
//! - `normalizer` - Per-channel automatic gain normalizer
//! - `chain` - Ordered effect chain with 16-bit PCM conversion
//! - `config` - Serde configuration for all of the above

pub mod binaural;
pub mod chain;
pub mod config;
pub mod fft;
pub mod normalizer;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use sfx_core::{Sample, SfxResult};

pub use binaural::{BinauralHrtfProcessor, HrirPair};
pub use chain::EffectChain;
pub use config::{BinauralConfig, NormalizerConfig, SoundFxConfig};
pub use fft::{ComplexFftEngine, FftDirection, fft_size_for};
pub use normalizer::SoundNormalizer;

/// Trait for all block effects
///
/// `samples` is planar (`samples[channel][frame]`). Channel 0 is the right
/// channel, channel 1 the left one. Only the first `frames` samples of each
/// of the first `channels` rows are touched.
pub trait SoundFx: Send {
    /// Stable identifier, also used to reject duplicates in a chain
    fn name(&self) -> &'static str;

    /// Skipped by the chain when false
    fn is_enabled(&self) -> bool;

    /// Process one block in place
    fn process(
        &mut self,
        samples: &mut [Vec<Sample>],
        channels: usize,
        frames: usize,
        sample_rate: u32,
    ) -> SfxResult<()>;

    /// Reset processor state
    fn reset(&mut self) {}
}

/// Shared on/off switch for an effect
///
/// Clones share the same flag, so a settings thread can keep one handle while
/// the audio thread reads through the effect.
#[derive(Debug, Clone, Default)]
pub struct EnableFlag(Arc<AtomicBool>);

impl EnableFlag {
    pub fn new(enabled: bool) -> Self {
        Self(Arc::new(AtomicBool::new(enabled)))
    }

    #[inline]
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn set(&self, enabled: bool) {
        self.0.store(enabled, Ordering::Relaxed);
    }
}
