//! HRTF convolution processor for two virtual front speakers

use std::time::Instant;

use sfx_core::{Sample, SfxError, SfxResult, check_planar};

use super::HrirPair;
use crate::config::BinauralConfig;
use crate::fft::{ComplexFftEngine, FftDirection, fft_size_for};
use crate::{EnableFlag, SoundFx};

/// Channel index of the right source feed
const RIGHT: usize = 0;
/// Channel index of the left source feed
const LEFT: usize = 1;

/// Binaural virtual surround for stereo blocks
///
/// Each input channel feeds one virtual front speaker. Every speaker is heard
/// by both ears through the HRIR pair (same-side filter for the near ear,
/// opposite-side filter for the far ear), and each ear averages what it
/// receives from the two speakers.
///
/// The FFT size follows the block length (next power of two). Filters and
/// scratch buffers are rebuilt only when that size changes, so a host with a
/// steady block size never allocates after the first call.
pub struct BinauralHrtfProcessor {
    config: BinauralConfig,
    enabled: EnableFlag,
    hrirs: HrirPair,
    state: Option<ConvolutionState>,
    rebuilds: usize,
}

/// Everything that depends on the FFT size
struct ConvolutionState {
    fft_size: usize,
    engine: ComplexFftEngine,
    /// Same-side HRTF, frequency domain
    same_side: Vec<f32>,
    /// Opposite-side HRTF, frequency domain
    opposite_side: Vec<f32>,
    /// Source feeds, time domain, zero padded
    right_feed: Vec<f32>,
    left_feed: Vec<f32>,
    /// Per (speaker, ear) results, time domain after the inverse transform
    right_to_right_ear: Vec<f32>,
    right_to_left_ear: Vec<f32>,
    left_to_right_ear: Vec<f32>,
    left_to_left_ear: Vec<f32>,
    /// Generic spectrum scratch
    spectrum_near: Vec<f32>,
    spectrum_far: Vec<f32>,
}

impl BinauralHrtfProcessor {
    /// Create a processor with the built-in HRIR pair
    pub fn new(config: BinauralConfig) -> Self {
        Self::with_hrirs(config, HrirPair::builtin())
    }

    /// Create a processor with a custom HRIR pair
    pub fn with_hrirs(config: BinauralConfig, hrirs: HrirPair) -> Self {
        Self {
            enabled: EnableFlag::new(config.enabled),
            config,
            hrirs,
            state: None,
            rebuilds: 0,
        }
    }

    /// Handle to the enable flag, for toggling from another thread
    pub fn enable_flag(&self) -> EnableFlag {
        self.enabled.clone()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    pub fn config(&self) -> &BinauralConfig {
        &self.config
    }

    /// Current FFT size, `None` before the first processed block
    pub fn fft_size(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.fft_size)
    }

    /// How often filters and scratch space were (re)built
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }

    /// Drop the FFT engine, filters and scratch space.
    ///
    /// The next processed block rebuilds them.
    pub fn release(&mut self) {
        if let Some(mut state) = self.state.take() {
            state.engine.release();
        }
    }

    /// Process one planar block in place.
    ///
    /// Blocks with `frames == 0` or a channel count other than 2 pass through
    /// untouched. `sample_rate` is informational: the HRIRs are used as
    /// measured, regardless of the stream rate.
    pub fn process(
        &mut self,
        samples: &mut [Vec<Sample>],
        channels: usize,
        frames: usize,
        sample_rate: u32,
    ) -> SfxResult<()> {
        if frames == 0 || channels != 2 {
            return Ok(());
        }

        check_planar(samples, channels, frames)?;

        let started = self.config.log_execution_time.then(Instant::now);

        self.prepare(fft_size_for(frames))?;
        let state = self.state.as_mut().ok_or_else(|| {
            SfxError::InvariantViolation("convolution state missing after rebuild".into())
        })?;

        state.check_invariants()?;
        state.load_feeds(&samples[RIGHT][..frames], &samples[LEFT][..frames]);
        state.convolve()?;
        state.mix_into(samples, frames);

        if let Some(started) = started {
            log::trace!(
                "BinauralHrtfProcessor: {} frames @ {} Hz took {} ns",
                frames,
                sample_rate,
                started.elapsed().as_nanos()
            );
        }

        Ok(())
    }

    /// Rebuild FFT-size dependent state if the size changed
    fn prepare(&mut self, fft_size: usize) -> SfxResult<()> {
        if self.state.as_ref().is_some_and(|s| s.fft_size == fft_size) {
            return Ok(());
        }

        log::debug!(
            "BinauralHrtfProcessor: rebuilding for fft_size={} (was {:?})",
            fft_size,
            self.fft_size()
        );

        self.release();
        self.state = Some(ConvolutionState::new(fft_size, &self.hrirs)?);
        self.rebuilds += 1;
        Ok(())
    }

    #[cfg(test)]
    fn state(&self) -> Option<&ConvolutionState> {
        self.state.as_ref()
    }
}

impl ConvolutionState {
    fn new(fft_size: usize, hrirs: &HrirPair) -> SfxResult<Self> {
        let mut engine = ComplexFftEngine::new(fft_size)?;
        let len = engine.buffer_len();

        let mut same_side = vec![0.0; len];
        let mut opposite_side = vec![0.0; len];
        load_real(&mut same_side, hrirs.same_side());
        load_real(&mut opposite_side, hrirs.opposite_side());
        engine.transform_in_place(&mut same_side, FftDirection::Forward)?;
        engine.transform_in_place(&mut opposite_side, FftDirection::Forward)?;

        Ok(Self {
            fft_size,
            engine,
            same_side,
            opposite_side,
            right_feed: vec![0.0; len],
            left_feed: vec![0.0; len],
            right_to_right_ear: vec![0.0; len],
            right_to_left_ear: vec![0.0; len],
            left_to_right_ear: vec![0.0; len],
            left_to_left_ear: vec![0.0; len],
            spectrum_near: vec![0.0; len],
            spectrum_far: vec![0.0; len],
        })
    }

    fn check_invariants(&self) -> SfxResult<()> {
        let expected = self.fft_size * 2;
        let buffers = [
            &self.same_side,
            &self.opposite_side,
            &self.right_feed,
            &self.left_feed,
            &self.right_to_right_ear,
            &self.right_to_left_ear,
            &self.left_to_right_ear,
            &self.left_to_left_ear,
            &self.spectrum_near,
            &self.spectrum_far,
        ];

        if self.engine.len() != self.fft_size || buffers.iter().any(|b| b.len() != expected) {
            let msg = format!(
                "engine n={} / scratch lengths do not match fft_size={}",
                self.engine.len(),
                self.fft_size
            );
            log::error!("BinauralHrtfProcessor: {}", msg);
            return Err(SfxError::InvariantViolation(msg));
        }
        Ok(())
    }

    fn load_feeds(&mut self, right: &[Sample], left: &[Sample]) {
        load_real(&mut self.right_feed, right);
        load_real(&mut self.left_feed, left);
    }

    /// Both virtual speakers through both ears
    fn convolve(&mut self) -> SfxResult<()> {
        let Self {
            engine,
            same_side,
            opposite_side,
            right_feed,
            left_feed,
            right_to_right_ear,
            right_to_left_ear,
            left_to_right_ear,
            left_to_left_ear,
            spectrum_near,
            spectrum_far,
            ..
        } = self;

        // Right speaker: right ear is near, left ear is far
        render_speaker(
            engine,
            right_feed,
            same_side,
            opposite_side,
            spectrum_near,
            spectrum_far,
            right_to_right_ear,
            right_to_left_ear,
        )?;

        // Left speaker: same filters, ear roles swapped
        render_speaker(
            engine,
            left_feed,
            same_side,
            opposite_side,
            spectrum_near,
            spectrum_far,
            left_to_left_ear,
            left_to_right_ear,
        )
    }

    /// Average both speakers per ear and write the first `frames` samples
    fn mix_into(&self, samples: &mut [Vec<Sample>], frames: usize) {
        let n = self.fft_size as f32;

        for i in 0..frames {
            let re = i * 2;
            samples[RIGHT][i] = average(self.right_to_right_ear[re] / n, self.left_to_right_ear[re] / n);
            samples[LEFT][i] = average(self.right_to_left_ear[re] / n, self.left_to_left_ear[re] / n);
        }
    }
}

/// Convolve one speaker feed with the near and far ear filters.
///
/// Outputs are time domain and still scaled by N.
#[allow(clippy::too_many_arguments)]
fn render_speaker(
    engine: &mut ComplexFftEngine,
    feed: &[f32],
    near_filter: &[f32],
    far_filter: &[f32],
    spectrum_near: &mut [f32],
    spectrum_far: &mut [f32],
    near_ear: &mut [f32],
    far_ear: &mut [f32],
) -> SfxResult<()> {
    engine.transform_into(feed, spectrum_near, FftDirection::Forward)?;
    spectrum_far.copy_from_slice(spectrum_near);

    multiply_spectrum(spectrum_near, near_filter);
    multiply_spectrum(spectrum_far, far_filter);

    engine.transform_into(spectrum_near, near_ear, FftDirection::Inverse)?;
    engine.transform_into(spectrum_far, far_ear, FftDirection::Inverse)
}

/// Bin-wise complex multiply of interleaved buffers, result in `spectrum`
#[inline]
fn multiply_spectrum(spectrum: &mut [f32], filter: &[f32]) {
    for (x, h) in spectrum.chunks_exact_mut(2).zip(filter.chunks_exact(2)) {
        let (a, b) = (x[0], x[1]);
        let (c, d) = (h[0], h[1]);
        x[0] = a * c - b * d;
        x[1] = a * d + b * c;
    }
}

/// Write real samples into an interleaved buffer, zero padding the rest.
///
/// Samples beyond the buffer's N complex slots are dropped.
#[inline]
fn load_real(buffer: &mut [f32], samples: &[f32]) {
    for (i, pair) in buffer.chunks_exact_mut(2).enumerate() {
        pair[0] = samples.get(i).copied().unwrap_or(0.0);
        pair[1] = 0.0;
    }
}

#[inline]
fn average(a: f32, b: f32) -> f32 {
    (a + b) / 2.0
}

impl SoundFx for BinauralHrtfProcessor {
    fn name(&self) -> &'static str {
        "virtual_surround"
    }

    fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    fn process(
        &mut self,
        samples: &mut [Vec<Sample>],
        channels: usize,
        frames: usize,
        sample_rate: u32,
    ) -> SfxResult<()> {
        BinauralHrtfProcessor::process(self, samples, channels, frames, sample_rate)
    }

    fn reset(&mut self) {
        self.release();
    }
}

impl Default for BinauralHrtfProcessor {
    fn default() -> Self {
        Self::new(BinauralConfig::default())
    }
}
