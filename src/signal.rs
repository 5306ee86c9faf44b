//! An adaptation of the cascades to dasp Signals.

use dasp::frame::Frame;
use dasp::sample::Sample;
use dasp::signal::Signal;

use crate::coeffs::Coefficients;
use crate::Df1Cascade;

/// Filters a `Signal` (from the `dasp` crate) through a fourth-order direct
/// form I cascade, with one independent cascade state per channel.
///
/// The filtered signal yields floating-point frames even if the input signal
/// did not; samples are converted into the 16-bit range the fixed-point
/// engine works in and back out again, so the saturation policy shows up as
/// values clamped to ±32767/32768 of full scale.
///
/// # Example
/// ```rust
/// use iirq::dasp::signal::{self, Signal};
/// use iirq::{coeffs, FilterSignal};
///
/// let noise = signal::noise(0);
/// let filtered = FilterSignal::new(noise, &coeffs::LOW_PASS_2400HZ);
/// for _sample in filtered.take(10_000) {
///     // ... do something with your low-passed noise.
/// }
/// ```
#[derive(Clone)]
pub struct FilterSignal<'coeffs, S: Signal> {
    input: S,
    cascades: Vec<Df1Cascade<'coeffs>>,
}

impl<'coeffs, S: Signal> FilterSignal<'coeffs, S> {
    /// Creates a new `FilterSignal` applying `coeffs` to every channel of
    /// `input`.
    pub fn new(input: S, coeffs: &'coeffs Coefficients) -> FilterSignal<'coeffs, S> {
        FilterSignal {
            input,
            cascades: vec![Df1Cascade::new(coeffs); S::Frame::CHANNELS],
        }
    }
}

impl<'coeffs, S: Signal> Signal for FilterSignal<'coeffs, S> {
    type Frame = <<S as Signal>::Frame as Frame>::Float;

    fn is_exhausted(&self) -> bool {
        self.input.is_exhausted()
    }

    fn next(&mut self) -> Self::Frame {
        let frame = self.input.next().to_float_frame();
        let cascades = &mut self.cascades;
        Frame::from_fn(|ch| {
            let samp: f32 = frame.channel(ch).copied().unwrap().to_sample();
            // The engine works on samples in the i16 range, not [-1, 1].
            let fixed = (samp * 32768.0).clamp(-32768.0, 32767.0) as i16;
            let filtered = cascades[ch].process(fixed) as f32 / 32768.0;
            filtered.to_sample()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coeffs;
    use dasp::signal;

    #[test]
    fn notch_removes_most_of_a_matching_tone() {
        let tone = signal::rate(48_000.0).const_hz(2_400.0).sine();
        let filtered: Vec<f64> = FilterSignal::new(tone, &coeffs::NOTCH_2400HZ_R9372)
            .take(48_000)
            .collect();
        // Skip the transient, then the 2.4 kHz tone should be mostly gone.
        let tail = &filtered[24_000..];
        let rms = (tail.iter().map(|x| x * x).sum::<f64>() / tail.len() as f64).sqrt();
        // Input RMS is 1/sqrt(2) of full scale.
        assert!(rms < 0.1, "notch left rms {}", rms);
    }

    #[test]
    fn channel_states_are_independent() {
        // A stereo frame with one silent channel: filtering must not leak
        // energy across channels.
        let frames = (0..1000).map(|n| [if n == 0 { 0.5f64 } else { 0.0 }, 0.0]);
        let input = signal::from_iter(frames);
        let filtered = FilterSignal::new(input, &coeffs::LOW_PASS_1000HZ);
        for frame in filtered.until_exhausted().take(900) {
            assert_eq!(frame[1], 0.0);
        }
    }
}
