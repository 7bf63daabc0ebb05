//! Ordered effect chain
//!
//! Sits between the host's 16-bit PCM stream and the float effects:
//! de-interleaves a block, runs every enabled effect in insertion order and
//! converts the result back. When nothing is enabled the block is copied
//! through without touching the samples.

use sfx_core::{AudioFormat, Sample, SfxError, SfxResult, deinterleave_pcm16, interleave_pcm16};

use crate::SoundFx;
use crate::binaural::BinauralHrtfProcessor;
use crate::config::SoundFxConfig;
use crate::normalizer::SoundNormalizer;

/// Ordered list of sound effects applied to every block
#[derive(Default)]
pub struct EffectChain {
    effects: Vec<Box<dyn SoundFx>>,
    format: Option<AudioFormat>,
    /// Planar scratch, grown on demand and reused between blocks
    planar: Vec<Vec<Sample>>,
}

impl EffectChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the standard chain: virtual surround, then the normalizer
    pub fn from_config(config: &SoundFxConfig) -> SfxResult<Self> {
        config.validate()?;

        let mut chain = Self::new();
        chain.add_effect(Box::new(BinauralHrtfProcessor::new(config.surround.clone())));
        chain.add_effect(Box::new(SoundNormalizer::new(config.normalizer.clone())?));
        Ok(chain)
    }

    /// Append an effect. Returns false (and drops `effect`) if an effect with
    /// the same name is already in the chain.
    pub fn add_effect(&mut self, effect: Box<dyn SoundFx>) -> bool {
        if self.effects.iter().any(|fx| fx.name() == effect.name()) {
            log::debug!("EffectChain: '{}' already present, not added", effect.name());
            return false;
        }
        self.effects.push(effect);
        true
    }

    /// Remove an effect by name
    pub fn remove_effect(&mut self, name: &str) -> Option<Box<dyn SoundFx>> {
        let idx = self.effects.iter().position(|fx| fx.name() == name)?;
        Some(self.effects.remove(idx))
    }

    pub fn effect(&self, name: &str) -> Option<&dyn SoundFx> {
        self.effects
            .iter()
            .find(|fx| fx.name() == name)
            .map(|fx| &**fx)
    }

    /// Effect names in processing order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.effects.iter().map(|fx| fx.name())
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Set the input format of the stream
    pub fn configure(&mut self, sample_rate: u32, channels: usize) -> SfxResult<AudioFormat> {
        let format = AudioFormat::new(sample_rate, channels)?;
        log::info!(
            "EffectChain: configured {} Hz, {} channels",
            format.sample_rate,
            format.channels
        );
        self.format = Some(format);
        Ok(format)
    }

    pub fn format(&self) -> Option<AudioFormat> {
        self.format
    }

    /// True if at least one effect is enabled
    pub fn has_active_effects(&self) -> bool {
        self.effects.iter().any(|fx| fx.is_enabled())
    }

    /// Run all enabled effects over a planar block
    pub fn process_planar(&mut self, samples: &mut [Vec<Sample>], frames: usize) -> SfxResult<()> {
        let format = self.require_format()?;
        run_effects(&mut self.effects, samples, format, frames)
    }

    /// Process one block of interleaved 16-bit PCM.
    ///
    /// `output` is cleared and receives one sample per input sample of every
    /// complete frame; a trailing partial frame is dropped.
    pub fn process_interleaved(&mut self, input: &[i16], output: &mut Vec<i16>) -> SfxResult<()> {
        let format = self.require_format()?;
        let channels = format.channels;
        let frames = input.len() / channels;

        output.clear();

        if !self.has_active_effects() {
            output.extend_from_slice(&input[..frames * channels]);
            return Ok(());
        }

        self.ensure_planar(channels, frames);
        deinterleave_pcm16(input, channels, frames, &mut self.planar);
        run_effects(&mut self.effects, &mut self.planar, format, frames)?;
        interleave_pcm16(&self.planar, channels, frames, output);
        Ok(())
    }

    /// Reset every effect
    pub fn reset(&mut self) {
        for fx in &mut self.effects {
            fx.reset();
        }
    }

    fn require_format(&self) -> SfxResult<AudioFormat> {
        self.format.ok_or(SfxError::InvalidFormat {
            sample_rate: 0,
            channels: 0,
        })
    }

    fn ensure_planar(&mut self, channels: usize, frames: usize) {
        if self.planar.len() != channels {
            self.planar.resize_with(channels, Vec::new);
        }
        for channel in &mut self.planar {
            if channel.len() < frames {
                channel.resize(frames, 0.0);
            }
        }
    }
}

fn run_effects(
    effects: &mut [Box<dyn SoundFx>],
    samples: &mut [Vec<Sample>],
    format: AudioFormat,
    frames: usize,
) -> SfxResult<()> {
    for fx in effects.iter_mut() {
        if fx.is_enabled() {
            fx.process(samples, format.channels, frames, format.sample_rate)?;
        }
    }
    Ok(())
}
