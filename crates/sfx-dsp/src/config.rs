//! Effect configuration
//!
//! Plain serde structs; hosts usually keep them in their settings store as
//! JSON and hand them over when building an [`EffectChain`](crate::chain::EffectChain).

use serde::{Deserialize, Serialize};
use sfx_core::{SfxError, SfxResult};

/// Binaural virtual surround configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinauralConfig {
    /// Initial state of the enable flag
    pub enabled: bool,
    /// Log per-block processing time at trace level
    pub log_execution_time: bool,
}

impl Default for BinauralConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_execution_time: false,
        }
    }
}

/// Automatic gain normalizer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Initial state of the enable flag
    pub enabled: bool,
    /// Smoothing of the running level, in blocks (>= 1)
    pub hold: f32,
    /// Average absolute level the normalizer steers towards
    pub target: f32,
    /// Upper bound for the applied gain
    pub max_gain: f32,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            hold: 5.0,
            target: 0.5,
            max_gain: 16.0,
        }
    }
}

impl NormalizerConfig {
    pub fn validate(&self) -> SfxResult<()> {
        if !(self.hold >= 1.0) {
            return Err(SfxError::Config(format!(
                "normalizer hold must be >= 1, got {}",
                self.hold
            )));
        }
        if !(self.target > 0.0) {
            return Err(SfxError::Config(format!(
                "normalizer target must be > 0, got {}",
                self.target
            )));
        }
        if !(self.max_gain > 0.0) {
            return Err(SfxError::Config(format!(
                "normalizer max_gain must be > 0, got {}",
                self.max_gain
            )));
        }
        Ok(())
    }
}

/// Full effect chain configuration
///
/// Effects run in field order: surround first, then the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundFxConfig {
    pub surround: BinauralConfig,
    pub normalizer: NormalizerConfig,
}

impl SoundFxConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> SfxResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SfxError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> SfxResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SfxError::Config(e.to_string()))
    }

    pub fn validate(&self) -> SfxResult<()> {
        self.normalizer.validate()
    }
}
