//! Binaural virtual surround
//!
//! Two virtual front speakers rendered for headphones by HRTF convolution:
//! - FFT convolution of each source feed with a same-side and a far-side HRIR
//! - Ear-swapped reuse of one HRIR pair for both speakers
//! - Lazy rebuild of filters and scratch space when the block size changes

mod hrir;
mod processor;

pub use hrir::{HRIR_OPPOSITE_SIDE, HRIR_SAME_SIDE, HRIR_TAPS};
pub use processor::BinauralHrtfProcessor;

use sfx_core::{SfxError, SfxResult};

/// HRIR pair for one virtual front speaker
///
/// `same_side` is what the ear on the speaker's side hears, `opposite_side`
/// what the far ear hears. Mirroring gives the other speaker for free.
#[derive(Debug, Clone, PartialEq)]
pub struct HrirPair {
    same_side: Vec<f32>,
    opposite_side: Vec<f32>,
}

impl HrirPair {
    /// Create a pair, rejecting responses of different (or zero) length
    pub fn new(same_side: Vec<f32>, opposite_side: Vec<f32>) -> SfxResult<Self> {
        if same_side.len() != opposite_side.len() || same_side.is_empty() {
            return Err(SfxError::HrirLengthMismatch {
                same_side: same_side.len(),
                opposite_side: opposite_side.len(),
            });
        }

        Ok(Self {
            same_side,
            opposite_side,
        })
    }

    /// The measured front pair shipped with the crate
    pub fn builtin() -> Self {
        Self {
            same_side: HRIR_SAME_SIDE.to_vec(),
            opposite_side: HRIR_OPPOSITE_SIDE.to_vec(),
        }
    }

    #[inline]
    pub fn same_side(&self) -> &[f32] {
        &self.same_side
    }

    #[inline]
    pub fn opposite_side(&self) -> &[f32] {
        &self.opposite_side
    }

    /// Tap count (identical for both ears)
    #[inline]
    pub fn taps(&self) -> usize {
        self.same_side.len()
    }
}

impl Default for HrirPair {
    fn default() -> Self {
        Self::builtin()
    }
}
