// ============================================================================
// SoundFX Regression Tests
// Pins the binaural renderer's output against the built-in HRIR tables
// ============================================================================

//! Binaural Regression Test Suite
//!
//! These tests verify that the virtual surround produces the same output
//! for known inputs across code changes: channel roles, block-length
//! wrap-around and numerical bounds.

use approx::assert_abs_diff_eq;
use sfx_dsp::binaural::{HRIR_OPPOSITE_SIDE, HRIR_SAME_SIDE, HRIR_TAPS};
use sfx_dsp::{BinauralHrtfProcessor, ComplexFftEngine, FftDirection};

const SAMPLE_RATE: u32 = 44100;

// ============================================================================
// TEST UTILITIES
// ============================================================================

/// Generate an impulse signal
fn generate_impulse(num_samples: usize, position: usize) -> Vec<f32> {
    let mut signal = vec![0.0; num_samples];
    if position < num_samples {
        signal[position] = 1.0;
    }
    signal
}

/// Generate white noise
fn generate_noise(num_samples: usize, seed: u64) -> Vec<f32> {
    let mut state = seed;
    (0..num_samples)
        .map(|_| {
            // Simple LCG for reproducible noise
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 40) as f32 / (1u64 << 24) as f32) * 2.0 - 1.0
        })
        .collect()
}

/// Calculate peak of a signal
fn calculate_peak(signal: &[f32]) -> f32 {
    signal.iter().map(|s| s.abs()).fold(0.0, f32::max)
}

/// Run one stereo block through a fresh processor
fn render(right: Vec<f32>, left: Vec<f32>) -> Vec<Vec<f32>> {
    let frames = right.len();
    let mut samples = vec![right, left];
    BinauralHrtfProcessor::default()
        .process(&mut samples, 2, frames, SAMPLE_RATE)
        .unwrap();
    samples
}

// ============================================================================
// CHANNEL CONVENTION
// ============================================================================

#[test]
fn test_impulse_on_right_feed() {
    let frames = 256;
    let out = render(generate_impulse(frames, 0), vec![0.0; frames]);

    for i in 0..HRIR_TAPS {
        assert_abs_diff_eq!(out[0][i], HRIR_SAME_SIDE[i] * 0.5, epsilon = 1e-5);
        assert_abs_diff_eq!(out[1][i], HRIR_OPPOSITE_SIDE[i] * 0.5, epsilon = 1e-5);
    }
    for i in HRIR_TAPS..frames {
        assert_abs_diff_eq!(out[0][i], 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(out[1][i], 0.0, epsilon = 1e-5);
    }
}

#[test]
fn test_impulse_on_left_feed() {
    let frames = 128;
    let out = render(vec![0.0; frames], generate_impulse(frames, 0));

    for i in 0..frames {
        assert_abs_diff_eq!(out[0][i], HRIR_OPPOSITE_SIDE[i] * 0.5, epsilon = 1e-5);
        assert_abs_diff_eq!(out[1][i], HRIR_SAME_SIDE[i] * 0.5, epsilon = 1e-5);
    }
}

#[test]
fn test_mirrored_input_gives_mirrored_output() {
    let a = generate_noise(300, 7);
    let b = generate_noise(300, 11);

    let forward = render(a.clone(), b.clone());
    let mirrored = render(b, a);

    for i in 0..300 {
        assert_abs_diff_eq!(forward[0][i], mirrored[1][i], epsilon = 1e-5);
        assert_abs_diff_eq!(forward[1][i], mirrored[0][i], epsilon = 1e-5);
    }
}

// ============================================================================
// BLOCK BEHAVIOR
// ============================================================================

#[test]
fn test_tail_wraps_within_block() {
    // The impulse response tail beyond the block end folds back to the start
    let frames = 256;
    let position = frames - 1;
    let out = render(generate_impulse(frames, position), vec![0.0; frames]);

    assert_abs_diff_eq!(out[0][position], HRIR_SAME_SIDE[0] * 0.5, epsilon = 1e-5);
    for i in 0..HRIR_TAPS - 1 {
        assert_abs_diff_eq!(out[0][i], HRIR_SAME_SIDE[i + 1] * 0.5, epsilon = 1e-5);
    }
}

#[test]
fn test_blocks_are_independent() {
    // No state carries over: the same block twice gives the same output
    let mut fx = BinauralHrtfProcessor::default();
    let input = vec![generate_noise(512, 3), generate_noise(512, 5)];

    let mut first = input.clone();
    fx.process(&mut first, 2, 512, SAMPLE_RATE).unwrap();

    let mut loud = vec![vec![0.9; 512], vec![-0.9; 512]];
    fx.process(&mut loud, 2, 512, SAMPLE_RATE).unwrap();

    let mut second = input;
    fx.process(&mut second, 2, 512, SAMPLE_RATE).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_linearity() {
    let a = [generate_noise(200, 1), generate_noise(200, 2)];
    let b = [generate_noise(200, 3), generate_noise(200, 4)];
    let sum: Vec<Vec<f32>> = (0..2)
        .map(|ch| a[ch].iter().zip(&b[ch]).map(|(x, y)| x + y).collect())
        .collect();

    let out_a = render(a[0].clone(), a[1].clone());
    let out_b = render(b[0].clone(), b[1].clone());
    let out_sum = render(sum[0].clone(), sum[1].clone());

    for ch in 0..2 {
        for i in 0..200 {
            assert_abs_diff_eq!(out_sum[ch][i], out_a[ch][i] + out_b[ch][i], epsilon = 1e-4);
        }
    }
}

// ============================================================================
// NUMERICAL BOUNDS
// ============================================================================

#[test]
fn test_impulse_peak_bounded_by_hrir() {
    let hrir_peak = calculate_peak(&HRIR_SAME_SIDE).max(calculate_peak(&HRIR_OPPOSITE_SIDE));

    for frames in [64, 128, 1000] {
        let out = render(generate_impulse(frames, 0), generate_impulse(frames, 0));
        let peak = calculate_peak(&out[0]).max(calculate_peak(&out[1]));
        assert!(
            peak <= hrir_peak + 1e-5,
            "frames={}: peak {} exceeds HRIR peak {}",
            frames,
            peak,
            hrir_peak
        );
    }
}

#[test]
fn test_noise_stays_finite() {
    let sum_abs: f32 = HRIR_SAME_SIDE
        .iter()
        .chain(HRIR_OPPOSITE_SIDE.iter())
        .map(|s| s.abs())
        .sum();

    for frames in [1, 3, 480, 1024, 4096] {
        let out = render(generate_noise(frames, 42), generate_noise(frames, 43));
        assert!(out.iter().flatten().all(|s| s.is_finite()));
        // |y| <= (sum|h_same| + sum|h_opposite|) / 2 for |x| <= 1
        assert!(calculate_peak(&out[0]) <= sum_abs * 0.5 + 1e-3);
        assert!(calculate_peak(&out[1]) <= sum_abs * 0.5 + 1e-3);
    }
}

#[test]
fn test_fft_parseval() {
    let n = 512;
    let mut engine = ComplexFftEngine::new(n).unwrap();
    let signal: Vec<f32> = generate_noise(n, 9)
        .into_iter()
        .flat_map(|re| [re, 0.0])
        .collect();

    let spectrum = engine.transform(&signal, FftDirection::Forward).unwrap();

    let time_energy: f32 = signal.iter().map(|s| s * s).sum();
    let freq_energy: f32 = spectrum.iter().map(|s| s * s).sum::<f32>() / n as f32;
    assert_abs_diff_eq!(time_energy, freq_energy, epsilon = time_energy * 1e-4);
}
