//! The cascade filters: two fourth-order structures built from a pair of
//! second-order stages, and the standalone second-order variant.

use crate::biquad::{saturate, Df1State};
use crate::coeffs::Coefficients;
use crate::{HEADROOM_SHIFT, SCALE_SHIFT};

/// A fourth-order direct form I cascade: two biquad stages in series, each
/// with its own input and output history.
///
/// Every call consumes one signed 16-bit sample and produces one sample,
/// clamped to `[-32767, 32767]`. Stage 0 is fed the external input; stage 1
/// is fed stage 0's saturated output. Both stages conventionally share one
/// coefficient set, realizing a fourth-order response from a single
/// second-order design.
///
/// The historical "IA" variant of this filter is the same algorithm; where
/// two concurrent signal paths each need a fourth-order filter, construct two
/// `Df1Cascade` values and their state stays independent.
///
/// # Example
///
/// ```rust
/// use iirq::{coeffs, Df1Cascade};
///
/// let mut cascade = Df1Cascade::new(&coeffs::LOW_PASS_1000HZ);
/// let mut tone = iirq::gen::SineWave::default();
/// for _ in 0..480 {
///     let sample = tone.next_sample(440, 16_384);
///     let _filtered = cascade.process(sample);
/// }
/// ```
#[derive(Clone)]
pub struct Df1Cascade<'coeffs> {
    coeffs: [&'coeffs Coefficients; 2],
    stages: [Df1State; 2],
}

impl<'coeffs> Df1Cascade<'coeffs> {
    /// Creates a cascade using `coeffs` for both stages, with silent
    /// (all-zero) history.
    pub fn new(coeffs: &'coeffs Coefficients) -> Df1Cascade<'coeffs> {
        Df1Cascade::with_stages(coeffs, coeffs)
    }

    /// Creates a cascade with a distinct coefficient set per stage.
    pub fn with_stages(
        stage0: &'coeffs Coefficients,
        stage1: &'coeffs Coefficients,
    ) -> Df1Cascade<'coeffs> {
        Df1Cascade {
            coeffs: [stage0, stage1],
            stages: [Df1State::default(), Df1State::default()],
        }
    }

    /// Filters one sample.
    pub fn process(&mut self, input: i16) -> i16 {
        let mid = self.stages[0].step(self.coeffs[0], input);
        self.stages[1].step(self.coeffs[1], mid)
    }

    /// Re-initializes both stage histories to silence.
    pub fn reset(&mut self) {
        self.stages[0].reset();
        self.stages[1].reset();
    }
}

/// A fourth-order direct form II cascade.
///
/// Mathematically this approximates the same transfer function as
/// [`Df1Cascade`], but its numeric behavior differs and both differences are
/// part of the contract:
///
/// * each stage keeps a single shared 3-element delay line instead of
///   separate input/output histories, and the feedback recursion is computed
///   and saturated *before* the feed-forward sum;
/// * the stage input is scaled down by 128 (with `a0` applied as a pre-gain)
///   before it enters the recursion, and the output is scaled back up by the
///   same factor. The headroom protects high-gain stages from overflow at
///   the cost of one bit of precision, so near-full-scale signals come out
///   slightly different from the form I result.
///
/// [`Df1Cascade`]: struct.Df1Cascade.html
#[derive(Clone)]
pub struct Df2Cascade<'coeffs> {
    coeffs: [&'coeffs Coefficients; 2],
    delay: [[i16; 3]; 2],
}

impl<'coeffs> Df2Cascade<'coeffs> {
    /// Creates a cascade using `coeffs` for both stages, with silent
    /// (all-zero) delay lines.
    pub fn new(coeffs: &'coeffs Coefficients) -> Df2Cascade<'coeffs> {
        Df2Cascade::with_stages(coeffs, coeffs)
    }

    /// Creates a cascade with a distinct coefficient set per stage.
    pub fn with_stages(
        stage0: &'coeffs Coefficients,
        stage1: &'coeffs Coefficients,
    ) -> Df2Cascade<'coeffs> {
        Df2Cascade {
            coeffs: [stage0, stage1],
            delay: [[0; 3]; 2],
        }
    }

    /// Filters one sample.
    pub fn process(&mut self, input: i16) -> i16 {
        let mut sample = input;
        for (c, d) in self.coeffs.iter().zip(self.delay.iter_mut()) {
            // Feedback first: the headroom-scaled input minus the recursion
            // terms, saturated into the newest delay slot. That slot is the
            // state the next call's feedback sees.
            let mut acc = (c.a0 as i64 * sample as i64) >> HEADROOM_SHIFT;
            acc -= c.a1_half as i64 * d[1] as i64;
            acc -= c.a1_half as i64 * d[1] as i64;
            acc -= c.a2 as i64 * d[2] as i64;
            d[0] = saturate(acc >> SCALE_SHIFT);

            // Feed-forward from the same delay line.
            let mut acc = c.b0 as i64 * d[0] as i64;
            acc += c.b1_half as i64 * d[1] as i64;
            acc += c.b1_half as i64 * d[1] as i64;
            acc += c.b2 as i64 * d[2] as i64;

            d[2] = d[1];
            d[1] = d[0];

            // Undo the Q15 scale and restore the headroom factor of 128.
            sample = saturate(acc >> (SCALE_SHIFT - HEADROOM_SHIFT));
        }
        sample
    }

    /// Re-initializes both delay lines to silence.
    pub fn reset(&mut self) {
        self.delay = [[0; 3]; 2];
    }
}

/// A standalone second-order direct form I filter: one biquad stage, used
/// where a second-order response suffices.
///
/// Unlike the fourth-order cascades, this variant applies **no** saturation
/// clamp; the rescaled accumulator is truncated to sample width as-is. The
/// asymmetry is deliberate and preserved as a per-variant contract: callers
/// relying on the clamped behavior should run a cascade instead.
#[derive(Clone)]
pub struct SecondOrder<'coeffs> {
    coeffs: &'coeffs Coefficients,
    stage: Df1State,
}

impl<'coeffs> SecondOrder<'coeffs> {
    /// Creates a filter with silent (all-zero) history.
    pub fn new(coeffs: &'coeffs Coefficients) -> SecondOrder<'coeffs> {
        SecondOrder {
            coeffs,
            stage: Df1State::default(),
        }
    }

    /// Filters one sample, without saturation.
    pub fn process(&mut self, input: i16) -> i16 {
        self.stage.step_unclamped(self.coeffs, input)
    }

    /// Re-initializes the history to silence.
    pub fn reset(&mut self) {
        self.stage.reset();
    }
}

/// Per-sample routing for a caller-owned bank of filters: evaluate the sample
/// against one of the filter variants, or pass it through untouched.
///
/// Which arm is active may change between any two calls and takes effect on
/// the next sample. No debouncing or crossfading is applied across a switch,
/// so an audible discontinuity at switch time is expected.
pub enum Filter<'coeffs> {
    /// Fourth-order direct form I.
    Df1(Df1Cascade<'coeffs>),
    /// Fourth-order direct form II.
    Df2(Df2Cascade<'coeffs>),
    /// Second-order, unclamped.
    SecondOrder(SecondOrder<'coeffs>),
    /// No filtering: input returned unchanged.
    Bypass,
}

impl<'coeffs> Filter<'coeffs> {
    /// Filters one sample with the active variant.
    pub fn process(&mut self, input: i16) -> i16 {
        match self {
            Filter::Df1(f) => f.process(input),
            Filter::Df2(f) => f.process(input),
            Filter::SecondOrder(f) => f.process(input),
            Filter::Bypass => input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coeffs;
    use crate::gen::SineWave;
    use crate::{SAMPLE_MAX, SAMPLE_MIN};

    extern crate static_assertions as sa;

    sa::assert_impl_all!(Df1Cascade<'static>: Send, Sync);
    sa::assert_impl_all!(Df2Cascade<'static>: Send, Sync);
    sa::assert_impl_all!(SecondOrder<'static>: Send, Sync);

    /// An independent rendition of the fourth-order form I arithmetic,
    /// written as a plain recurrence over growing sample vectors rather than
    /// shift registers.
    fn reference_df1(c: &Coefficients, input: &[i16]) -> Vec<i16> {
        let mut out = Vec::with_capacity(input.len());
        // xs[stage][n], ys[stage][n], newest last.
        let mut xs = [Vec::new(), Vec::new()];
        let mut ys: [Vec<i64>; 2] = [Vec::new(), Vec::new()];
        for (n, &sample) in input.iter().enumerate() {
            let mut stage_in = sample as i64;
            for s in 0..2 {
                xs[s].push(stage_in);
                let x = |k: usize| {
                    if n >= k {
                        xs[s][n - k]
                    } else {
                        0
                    }
                };
                let y = |k: usize| {
                    if n >= k {
                        ys[s][n - k]
                    } else {
                        0
                    }
                };
                let acc = c.b0 as i64 * x(0)
                    + 2 * c.b1_half as i64 * x(1)
                    + c.b2 as i64 * x(2)
                    - 2 * c.a1_half as i64 * y(1)
                    - c.a2 as i64 * y(2);
                let clamped = (acc >> 15).clamp(-32767, 32767);
                ys[s].push(clamped);
                stage_in = clamped;
            }
            out.push(stage_in as i16);
        }
        out
    }

    fn square_wave(len: usize) -> Vec<i16> {
        (0..len)
            .map(|n| if n % 2 == 0 { 32767 } else { -32767 })
            .collect()
    }

    /// A deterministic, wide-band excitation: a full-scale tone stepped
    /// through a handful of frequencies.
    fn stepped_tones(len: usize) -> Vec<i16> {
        let mut tone = SineWave::default();
        let freqs = [120, 450, 1200, 2400, 4800, 9600];
        (0..len)
            .map(|n| tone.next_sample(freqs[n * freqs.len() / len], 32767))
            .collect()
    }

    #[test]
    fn outputs_never_leave_the_sample_range() {
        for &(name, c) in coeffs::NAMED {
            let mut df1 = Df1Cascade::new(c);
            let mut df2 = Df2Cascade::new(c);
            for input in square_wave(400).into_iter().chain(stepped_tones(400)) {
                let a = df1.process(input);
                let b = df2.process(input);
                assert!(a >= SAMPLE_MIN && a <= SAMPLE_MAX, "{}: df1 {}", name, a);
                assert!(b >= SAMPLE_MIN && b <= SAMPLE_MAX, "{}: df2 {}", name, b);
            }
        }
    }

    #[test]
    fn impulse_response_matches_reference_recurrence() {
        let mut input = vec![0i16; 100];
        input[0] = 32767;
        for &(name, c) in coeffs::NAMED {
            let mut cascade = Df1Cascade::new(c);
            let got: Vec<i16> = input.iter().map(|&x| cascade.process(x)).collect();
            assert_eq!(got, reference_df1(c, &input), "{}", name);
        }
    }

    #[test]
    fn form_i_and_form_ia_are_bit_identical() {
        // The "IA" form exists so two signal paths can filter concurrently;
        // it is the same algorithm with its own state.
        let c = &coeffs::BAND_PASS_2400HZ_R95;
        let mut path_a = Df1Cascade::new(c);
        let mut path_b = Df1Cascade::new(c);
        for input in stepped_tones(2000) {
            assert_eq!(path_a.process(input), path_b.process(input));
        }
    }

    #[test]
    fn df2_survives_full_scale_input_with_full_scale_b0() {
        // 32767 * 32767 must reach the accumulator unwrapped even when the
        // delay line already holds full-scale values.
        let c = &coeffs::NOTCH_2400HZ_R100;
        assert_eq!(c.b0, 32767);
        let mut cascade = Df2Cascade::new(c);
        for _ in 0..1000 {
            let y = cascade.process(32767);
            assert!(y >= SAMPLE_MIN && y <= SAMPLE_MAX);
        }
    }

    #[test]
    fn low_pass_300hz_dc_step_rises_monotonically() {
        let mut cascade = Df1Cascade::new(&coeffs::LOW_PASS_300HZ);
        let mut previous = 0i16;
        let mut last = 0i16;
        for n in 0..50 {
            let y = cascade.process(32767);
            assert!(y >= previous, "dipped from {} to {} at sample {}", previous, y, n);
            assert!(y < 32767);
            previous = y;
            last = y;
        }
        // This table has deliberately low DC gain; after 50 samples the
        // response is still far from full scale.
        assert!(last > 0);
        assert!(last < 16_000, "rose implausibly fast: {}", last);
    }

    #[test]
    fn high_pass_passes_a_full_scale_square_wave() {
        // An alternating +/-32767 sequence sits at the Nyquist frequency,
        // deep inside the passband.
        let mut cascade = Df1Cascade::new(&coeffs::HIGH_PASS_300HZ);
        let output: Vec<i16> = square_wave(200)
            .into_iter()
            .map(|x| cascade.process(x))
            .collect();
        for (n, pair) in output[20..].windows(2).enumerate() {
            assert!(
                pair[0].signum() != pair[1].signum(),
                "stopped alternating at sample {}",
                n + 20
            );
            assert!(pair[0].unsigned_abs() > 29_000, "amplitude lost: {}", pair[0]);
        }
    }

    #[test]
    fn second_order_applies_no_clamp() {
        // Feed a resonant set a square wave; the cascades clamp, and the
        // single-stage variant tracks the underlying (wrapped) accumulator
        // instead. Here it is enough that it matches the unclamped
        // recurrence bit-for-bit.
        let c = &coeffs::NOTCH_2400HZ_R100;
        let mut filter = SecondOrder::new(c);
        let mut x = [0i64; 3];
        let mut y = [0i64; 3];
        for input in square_wave(300) {
            x[0] = input as i64;
            let acc = (c.b0 as i64 * x[0]
                + 2 * c.b1_half as i64 * x[1]
                + c.b2 as i64 * x[2]
                - 2 * c.a1_half as i64 * y[1]
                - c.a2 as i64 * y[2])
                >> 15;
            let expected = acc as i16;
            assert_eq!(filter.process(input), expected);
            y[0] = expected as i64;
            y[2] = y[1];
            y[1] = y[0];
            x[2] = x[1];
            x[1] = x[0];
        }
    }

    #[test]
    fn bypass_is_the_identity() {
        let mut filter = Filter::Bypass;
        for input in [-32768, -32767, -1, 0, 1, 32767] {
            assert_eq!(filter.process(input), input);
        }
    }

    #[test]
    fn switching_filters_takes_effect_next_sample() {
        let c = &coeffs::LOW_PASS_1000HZ;
        let mut filter = Filter::Df1(Df1Cascade::new(c));
        let filtered = filter.process(32767);
        assert_ne!(filtered, 32767);
        filter = Filter::Bypass;
        assert_eq!(filter.process(32767), 32767);
    }
}
