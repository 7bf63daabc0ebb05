//! Automatic gain normalizer
//!
//! Tracks the average absolute level of every channel across blocks and
//! scales each channel so that level converges on a target.

use sfx_core::{Sample, SfxResult, check_planar};

use crate::config::NormalizerConfig;
use crate::{EnableFlag, SoundFx};

/// Per-channel automatic gain normalizer
pub struct SoundNormalizer {
    config: NormalizerConfig,
    enabled: EnableFlag,
    /// Running average level per channel
    levels: Vec<f32>,
}

impl SoundNormalizer {
    pub fn new(config: NormalizerConfig) -> SfxResult<Self> {
        config.validate()?;
        Ok(Self {
            enabled: EnableFlag::new(config.enabled),
            config,
            levels: Vec::new(),
        })
    }

    pub fn enable_flag(&self) -> EnableFlag {
        self.enabled.clone()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    /// Running level of a channel, if it has been seen
    pub fn level(&self, channel: usize) -> Option<f32> {
        self.levels.get(channel).copied()
    }

    /// Gain applied for a running level
    #[inline]
    fn gain_for(&self, level: f32) -> f32 {
        if level <= 0.0 {
            return self.config.max_gain;
        }
        (self.config.target / level).min(self.config.max_gain)
    }
}

impl SoundFx for SoundNormalizer {
    fn name(&self) -> &'static str {
        "normalizer"
    }

    fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    fn process(
        &mut self,
        samples: &mut [Vec<Sample>],
        channels: usize,
        frames: usize,
        _sample_rate: u32,
    ) -> SfxResult<()> {
        if frames == 0 {
            return Ok(());
        }
        check_planar(samples, channels, frames)?;

        // Channel layout changed: start over from the target level
        if self.levels.len() != channels {
            self.levels = vec![self.config.target; channels];
        }

        let hold = self.config.hold;
        for (ch, channel) in samples.iter_mut().take(channels).enumerate() {
            let block = &mut channel[..frames];

            let avg = block.iter().map(|s| s.abs()).sum::<f32>() / frames as f32;
            let level = self.levels[ch] - self.levels[ch] / hold + avg / hold;
            self.levels[ch] = level;

            let gain = self.gain_for(level);
            for sample in block.iter_mut() {
                *sample *= gain;
            }
        }

        Ok(())
    }

    fn reset(&mut self) {
        self.levels.clear();
    }
}
