//! Fixed-point test-signal sources: a sine synthesizer and a logarithmic
//! frequency sweep, for exciting filters at the 48 kHz sample rate the
//! coefficient tables were designed for.

/// Phase-step scaling factor for 48 kHz: 2 · 32767 / 48000 in Q14.
const PHASE_SCALE_48000HZ: i32 = 22368;

/// A sine synthesizer driven by a wrapping Q15 phase accumulator, where the
/// full `i16` phase range maps onto one period.
///
/// Frequency and amplitude are passed per sample rather than at
/// construction, so a caller can sweep either without touching the phase
/// state. Useful range is roughly 10 Hz to 16 kHz.
#[derive(Clone, Copy, Debug, Default)]
pub struct SineWave {
    phase: i16,
}

impl SineWave {
    /// Creates a generator with zero initial phase.
    pub fn new() -> SineWave {
        SineWave::default()
    }

    /// Returns the next sample of a sine at `frequency` Hz with peak value
    /// `amplitude` (1 to 32767).
    pub fn next_sample(&mut self, frequency: i16, amplitude: i16) -> i16 {
        let step = match (frequency as i32 * PHASE_SCALE_48000HZ) >> 14 {
            // The lowest representable frequency still has to advance.
            0 => 1,
            s => s.clamp(-32767, 32767),
        };
        self.phase = self.phase.wrapping_add(step as i16);
        let angle = self.phase as f64 / 32768.0 * std::f64::consts::PI;
        let sinusoid = (angle.sin() * 32767.0) as i32;
        ((sinusoid * amplitude as i32) >> 15) as i16
    }
}

/// Segment base frequencies e³ through e⁹ in Hz; consecutive segments join
/// continuously because e^k · e^1.0 = e^(k+1).
const SEGMENT_BASE: [f64; 7] = [
    20.085536923187668,
    54.598150033144236,
    148.4131591025766,
    403.4287934927351,
    1096.6331584284585,
    2980.9579870417283,
    8103.083927575384,
];

/// Tick scaling for one sweep segment per second.
pub const TICKS_1S: i32 = 22369;

/// Tick scaling for one sweep segment per 2.8 seconds.
pub const TICKS_2_8S: i32 = 7829;

/// Generates frequencies between 20 Hz and 20 kHz on a logarithmic scale.
///
/// Call [`next_frequency`] once per sample and feed the result to a
/// [`SineWave`] (or any other source). The sweep walks a ladder of segments
/// covering e³ … e⁹ Hz; within each segment a Q15 tick counter ramps the
/// frequency by a factor of e, then the next segment begins where the last
/// left off, wrapping after the top one.
///
/// [`next_frequency`]: struct.LogSweep.html#method.next_frequency
/// [`SineWave`]: struct.SineWave.html
#[derive(Clone, Copy, Debug)]
pub struct LogSweep {
    ticks: u32,
    segment: usize,
    ticks_per_scan: i32,
}

impl LogSweep {
    /// Creates a sweep starting at 20 Hz. `ticks_per_scan` sets the pace:
    /// [`TICKS_1S`] or [`TICKS_2_8S`] for one segment per second or per 2.8
    /// seconds at 48 kHz.
    ///
    /// [`TICKS_1S`]: constant.TICKS_1S.html
    /// [`TICKS_2_8S`]: constant.TICKS_2_8S.html
    pub fn new(ticks_per_scan: i32) -> LogSweep {
        LogSweep {
            ticks: 0,
            segment: 0,
            ticks_per_scan,
        }
    }

    /// Returns the frequency for the current sample and advances the sweep.
    pub fn next_frequency(&mut self) -> u16 {
        let counter = ((self.ticks as i64 * self.ticks_per_scan as i64) >> 15) as i32;
        self.ticks += 1;
        let ramp = (counter.min(32767) as f64 / 32768.0).exp();
        let frequency = SEGMENT_BASE[self.segment] * ramp;
        if counter >= 32767 {
            self.ticks = 0;
            self.segment = (self.segment + 1) % SEGMENT_BASE.len();
        }
        frequency as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_at_quarter_rate_hits_the_peaks() {
        // 12 kHz at 48 kHz sampling advances the phase a quarter period per
        // sample, so every other sample lands on a peak.
        let mut tone = SineWave::new();
        let samples: Vec<i16> = (0..8).map(|_| tone.next_sample(12_000, 32767)).collect();
        for (n, &s) in samples.iter().enumerate() {
            match n % 4 {
                0 => assert!(s > 32_000, "sample {}: {}", n, s),
                2 => assert!(s < -32_000, "sample {}: {}", n, s),
                _ => assert!(s.abs() < 1_000, "sample {}: {}", n, s),
            }
        }
    }

    #[test]
    fn sine_respects_amplitude() {
        let mut tone = SineWave::new();
        for _ in 0..4800 {
            let s = tone.next_sample(440, 1000);
            assert!(s.abs() <= 1000, "{}", s);
        }
    }

    #[test]
    fn lowest_frequency_still_advances_phase() {
        let mut tone = SineWave::new();
        let mut all_zero = true;
        for _ in 0..48_000 {
            if tone.next_sample(0, 32767) != 0 {
                all_zero = false;
            }
        }
        assert!(!all_zero);
    }

    #[test]
    fn sweep_is_nondecreasing_and_spans_the_ladder() {
        // Segments join continuously (e^k · e = e^(k+1)), so the frequency
        // never dips until the whole ladder wraps, which takes just over
        // seven seconds.
        let mut sweep = LogSweep::new(TICKS_1S);
        let mut previous = sweep.next_frequency();
        assert_eq!(previous, 20);
        let mut top = previous;
        for n in 1..(7 * 48_000) {
            let f = sweep.next_frequency();
            assert!(f >= previous, "sweep dipped at tick {}", n);
            previous = f;
            top = top.max(f);
        }
        assert!(top > 20_000, "sweep topped out at {} Hz", top);
    }
}
