//! The atomic second-order section: direct form I delay lines and the
//! per-sample recurrence they evaluate.

use crate::coeffs::Coefficients;
use crate::{SAMPLE_MAX, SAMPLE_MIN, SCALE_SHIFT};

/// Clamps a double-width accumulator to the representable sample range.
///
/// This is a hard ceiling/floor, not wraparound: anything above 32767 becomes
/// exactly 32767, anything below -32767 becomes exactly -32767.
pub(crate) fn saturate(acc: i64) -> i16 {
    if acc > SAMPLE_MAX as i64 {
        SAMPLE_MAX
    } else if acc < SAMPLE_MIN as i64 {
        SAMPLE_MIN
    } else {
        acc as i16
    }
}

/// Delay-line state for one direct form I stage: the current and two previous
/// inputs in `x`, the current and two previous outputs in `y`.
///
/// The histories are fixed shift registers. Each call moves every retained
/// value along by exactly one slot; nothing else ever writes to them.
#[derive(Clone, Copy, Default)]
pub(crate) struct Df1State {
    pub x: [i16; 3],
    pub y: [i16; 3],
}

impl Df1State {
    /// Evaluates the direct form I recurrence in double-width precision and
    /// applies the Q15 rescale, without saturating.
    ///
    /// The stored b1 and a1 are half the true coefficients, so each is added
    /// twice (see [`Coefficients`]). `a0` is the unity constant by
    /// convention, which is why dividing by it folds into the shift.
    fn accumulate(&self, c: &Coefficients, input: i16) -> i64 {
        let mut acc = c.b0 as i64 * input as i64;
        acc += c.b1_half as i64 * self.x[1] as i64;
        acc += c.b1_half as i64 * self.x[1] as i64;
        acc += c.b2 as i64 * self.x[2] as i64;
        acc -= c.a1_half as i64 * self.y[1] as i64;
        acc -= c.a1_half as i64 * self.y[1] as i64;
        acc -= c.a2 as i64 * self.y[2] as i64;
        acc >> SCALE_SHIFT
    }

    /// Shuffles both histories along one place for the next sample.
    fn shift(&mut self, input: i16, output: i16) {
        self.x[0] = input;
        self.y[0] = output;
        self.y[2] = self.y[1];
        self.y[1] = self.y[0];
        self.x[2] = self.x[1];
        self.x[1] = self.x[0];
    }

    /// Runs one sample through this stage. The result is saturated before it
    /// enters the output history, so the feedback terms of later samples see
    /// the clamped value.
    pub fn step(&mut self, c: &Coefficients, input: i16) -> i16 {
        let out = saturate(self.accumulate(c, input));
        self.shift(input, out);
        out
    }

    /// Runs one sample through this stage without the saturation clamp; the
    /// rescaled accumulator is truncated to sample width as-is.
    pub fn step_unclamped(&mut self, c: &Coefficients, input: i16) -> i16 {
        let out = self.accumulate(c, input) as i16;
        self.shift(input, out);
        out
    }

    pub fn reset(&mut self) {
        *self = Df1State::default();
    }
}
