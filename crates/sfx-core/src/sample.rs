//! Sample types and PCM conversion

use crate::{SfxError, SfxResult};

/// Type alias for audio samples
///
/// The effect core works in single precision; hosts hand over 16-bit PCM or
/// float blocks and both fit comfortably.
pub type Sample = f32;

/// Planar block layout: `[channel][frame]`
pub type PlanarBlock = [Vec<Sample>];

/// Full-scale value used for 16-bit PCM normalization
const PCM16_SCALE: Sample = i16::MAX as Sample;

/// Convert a 16-bit PCM sample to a normalized float
#[inline]
pub fn pcm16_to_sample(raw: i16) -> Sample {
    raw as Sample / PCM16_SCALE
}

/// Convert a normalized float back to 16-bit PCM
///
/// Out-of-range values are clamped to the i16 range, the fractional part is
/// truncated toward zero.
#[inline]
pub fn sample_to_pcm16(sample: Sample) -> i16 {
    let scaled = (sample * PCM16_SCALE).clamp(i16::MIN as Sample, i16::MAX as Sample);
    scaled as i16
}

/// Check that a planar block has `channels` rows of at least `frames` samples
pub fn check_planar(planar: &PlanarBlock, channels: usize, frames: usize) -> SfxResult<()> {
    if planar.len() < channels {
        return Err(SfxError::BufferSizeMismatch {
            expected: channels,
            got: planar.len(),
        });
    }
    if let Some(short) = planar[..channels].iter().find(|ch| ch.len() < frames) {
        return Err(SfxError::BufferSizeMismatch {
            expected: frames,
            got: short.len(),
        });
    }
    Ok(())
}

/// Split interleaved 16-bit PCM into planar float channels.
///
/// Reads `frames` complete frames; every channel in `planar` must already hold
/// at least `frames` samples.
pub fn deinterleave_pcm16(input: &[i16], channels: usize, frames: usize, planar: &mut PlanarBlock) {
    debug_assert!(input.len() >= channels * frames);
    debug_assert!(planar.len() >= channels);

    for (frame_idx, frame) in input.chunks_exact(channels).take(frames).enumerate() {
        for (ch, &raw) in frame.iter().enumerate() {
            planar[ch][frame_idx] = pcm16_to_sample(raw);
        }
    }
}

/// Interleave planar float channels into 16-bit PCM, appending to `output`.
pub fn interleave_pcm16(planar: &PlanarBlock, channels: usize, frames: usize, output: &mut Vec<i16>) {
    debug_assert!(planar.len() >= channels);

    for frame_idx in 0..frames {
        for channel in planar.iter().take(channels) {
            output.push(sample_to_pcm16(channel[frame_idx]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_pcm16_normalization() {
        assert_abs_diff_eq!(pcm16_to_sample(i16::MAX), 1.0);
        assert_abs_diff_eq!(pcm16_to_sample(0), 0.0);
        assert!(pcm16_to_sample(i16::MIN) < -1.0);
    }

    #[test]
    fn test_pcm16_clamping() {
        assert_eq!(sample_to_pcm16(2.0), i16::MAX);
        assert_eq!(sample_to_pcm16(-2.0), i16::MIN);
        assert_eq!(sample_to_pcm16(0.0), 0);
        // 0.5 * 32767 = 16383.5, truncated
        assert_eq!(sample_to_pcm16(0.5), 16383);
    }

    #[test]
    fn test_interleave_layout() {
        let input: Vec<i16> = vec![100, -100, 200, -200, 300, -300];
        let mut planar = vec![vec![0.0; 3]; 2];

        deinterleave_pcm16(&input, 2, 3, &mut planar);
        assert!(planar[0].iter().all(|&s| s > 0.0));
        assert!(planar[1].iter().all(|&s| s < 0.0));

        let mut output = Vec::new();
        interleave_pcm16(&planar, 2, 3, &mut output);
        assert_eq!(output.len(), input.len());
        // Truncation may cost one LSB
        for (out, inp) in output.iter().zip(&input) {
            assert!((*out as i32 - *inp as i32).abs() <= 1);
        }
    }

    #[test]
    fn test_check_planar() {
        let planar = vec![vec![0.0; 64], vec![0.0; 32]];

        assert!(check_planar(&planar, 2, 32).is_ok());
        assert!(check_planar(&planar, 1, 64).is_ok());
        assert_eq!(
            check_planar(&planar, 2, 64),
            Err(SfxError::BufferSizeMismatch {
                expected: 64,
                got: 32
            })
        );
        assert_eq!(
            check_planar(&planar, 3, 8),
            Err(SfxError::BufferSizeMismatch {
                expected: 3,
                got: 2
            })
        );
    }
}
