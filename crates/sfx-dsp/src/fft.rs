//! Complex FFT engine on interleaved `[re, im]` buffers
//!
//! Wraps a pair of rustfft plans for one fixed length N. Buffers handed to
//! the engine are flat `f32` slices of length 2N laid out as
//! `[re0, im0, re1, im1, ...]`.
//!
//! The inverse transform is unnormalized: forward followed by inverse yields
//! the input scaled by N. Callers divide by N themselves.

use std::sync::Arc;

use num_complex::Complex32;
use rustfft::{Fft, FftPlanner};
use sfx_core::{SfxError, SfxResult};

pub use rustfft::FftDirection;

/// Smallest power of two that is >= `frames` (`fft_size_for(0) == 1`)
#[inline]
pub fn fft_size_for(frames: usize) -> usize {
    frames.next_power_of_two()
}

/// Plan state owned by a live engine
struct FftPlans {
    forward: Arc<dyn Fft<f32>>,
    inverse: Arc<dyn Fft<f32>>,
    /// Complex view of the current buffer
    work: Vec<Complex32>,
    /// rustfft scratch, sized for the larger of both plans
    scratch: Vec<Complex32>,
}

/// Complex FFT / IFFT of fixed length N
pub struct ComplexFftEngine {
    len: usize,
    plans: Option<FftPlans>,
}

impl ComplexFftEngine {
    /// Plan forward and inverse transforms for `len` complex points
    pub fn new(len: usize) -> SfxResult<Self> {
        if len < 1 {
            return Err(SfxError::InvalidSize(len));
        }

        let mut planner = FftPlanner::<f32>::new();
        let forward = planner.plan_fft_forward(len);
        let inverse = planner.plan_fft_inverse(len);

        let scratch_len = forward
            .get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());

        log::debug!("ComplexFftEngine: planned n={}", len);

        Ok(Self {
            len,
            plans: Some(FftPlans {
                forward,
                inverse,
                work: vec![Complex32::new(0.0, 0.0); len],
                scratch: vec![Complex32::new(0.0, 0.0); scratch_len],
            }),
        })
    }

    /// Number of complex points N
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Required length of interleaved buffers (2N)
    #[inline]
    pub fn buffer_len(&self) -> usize {
        self.len * 2
    }

    #[inline]
    pub fn is_released(&self) -> bool {
        self.plans.is_none()
    }

    /// Drop plan state. Any later transform fails with `EngineReleased`.
    pub fn release(&mut self) {
        if self.plans.take().is_some() {
            log::debug!("ComplexFftEngine: released n={}", self.len);
        } else {
            log::warn!("ComplexFftEngine: release called twice (n={})", self.len);
        }
    }

    /// Transform `input` into a newly allocated buffer
    pub fn transform(&mut self, input: &[f32], direction: FftDirection) -> SfxResult<Vec<f32>> {
        let mut output = vec![0.0; input.len()];
        self.transform_into(input, &mut output, direction)?;
        Ok(output)
    }

    /// Transform `input` into the caller-supplied `output`
    pub fn transform_into(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        direction: FftDirection,
    ) -> SfxResult<()> {
        self.check_buffer(input.len())?;
        if output.len() != input.len() {
            return Err(SfxError::LengthMismatch {
                expected: input.len(),
                got: output.len(),
            });
        }

        let plans = self.plans.as_mut().ok_or(SfxError::EngineReleased)?;
        plans.load(input);
        plans.run(direction);
        plans.store(output);
        Ok(())
    }

    /// Transform `buffer` in place
    pub fn transform_in_place(&mut self, buffer: &mut [f32], direction: FftDirection) -> SfxResult<()> {
        self.check_buffer(buffer.len())?;

        let plans = self.plans.as_mut().ok_or(SfxError::EngineReleased)?;
        plans.load(buffer);
        plans.run(direction);
        plans.store(buffer);
        Ok(())
    }

    fn check_buffer(&self, len: usize) -> SfxResult<()> {
        if self.plans.is_none() {
            return Err(SfxError::EngineReleased);
        }
        if len == 0 || len % 2 != 0 {
            return Err(SfxError::OddLength(len));
        }
        if len != self.buffer_len() {
            return Err(SfxError::LengthMismatch {
                expected: self.buffer_len(),
                got: len,
            });
        }
        Ok(())
    }
}

impl FftPlans {
    #[inline]
    fn load(&mut self, interleaved: &[f32]) {
        for (bin, pair) in self.work.iter_mut().zip(interleaved.chunks_exact(2)) {
            *bin = Complex32::new(pair[0], pair[1]);
        }
    }

    #[inline]
    fn store(&self, interleaved: &mut [f32]) {
        for (pair, bin) in interleaved.chunks_exact_mut(2).zip(&self.work) {
            pair[0] = bin.re;
            pair[1] = bin.im;
        }
    }

    #[inline]
    fn run(&mut self, direction: FftDirection) {
        let plan = match direction {
            FftDirection::Forward => &self.forward,
            FftDirection::Inverse => &self.inverse,
        };
        plan.process_with_scratch(&mut self.work, &mut self.scratch);
    }
}

impl std::fmt::Debug for ComplexFftEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComplexFftEngine")
            .field("len", &self.len)
            .field("released", &self.is_released())
            .finish()
    }
}
