//! Precomputed Q15 coefficient sets.
//!
//! Every set here was designed offline for a 48 kHz sample rate, by bilinear
//! transform from a Butterworth prototype (the low-/high-/band-pass and
//! band-stop tables) or by direct pole/zero placement (the constant- and
//! variable-radius band-pass and notch families). The engine only consumes
//! these six-tuples; it never computes a cutoff or a pole radius.

use std::collections::HashMap;

use once_cell::sync::OnceCell;

/// The six fixed-point values defining one second-order section.
///
/// The transfer function of a section is
///
/// ```text
/// H(z) = (b0 + b1·z⁻¹ + b2·z⁻²) / (a0 + a1·z⁻¹ + a2·z⁻²)
/// ```
///
/// with every value in Q15 scale: the integer 32767 stands for 1.000.
/// Because the true b1 and a1 can range over [-2.0, +2.0], they are stored
/// *pre-halved*; the recurrence adds each stored half twice to reconstruct
/// the full contribution. `a0` is conventionally the unity constant, except
/// in the direct form II structure, which reads it as a pre-gain applied to
/// the headroom-scaled stage input.
///
/// A set carries no per-stream state, so a single `&'static Coefficients`
/// may be shared by any number of filter instances. No stability check is
/// performed: a set with poles outside the unit circle diverges or saturates
/// permanently, which is a caller responsibility rather than an error the
/// engine detects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Coefficients {
    /// Numerator b0.
    pub b0: i16,
    /// Half of the numerator b1.
    pub b1_half: i16,
    /// Numerator b2.
    pub b2: i16,
    /// Denominator a0: the unity constant, or the form II pre-gain.
    pub a0: i16,
    /// Half of the denominator a1.
    pub a1_half: i16,
    /// Denominator a2.
    pub a2: i16,
}

impl Coefficients {
    /// Builds a set from already-halved b1/a1 values, in table order
    /// `(b0, b1/2, b2, a0, a1/2, a2)`.
    ///
    /// The values are accepted as-is; see the type-level documentation for
    /// the doubling performed during evaluation.
    pub const fn from_halved(
        b0: i16,
        b1_half: i16,
        b2: i16,
        a0: i16,
        a1_half: i16,
        a2: i16,
    ) -> Coefficients {
        Coefficients {
            b0,
            b1_half,
            b2,
            a0,
            a1_half,
            a2,
        }
    }
}

macro_rules! table {
    ($(#[$doc:meta])* $name:ident = $b0:literal, $b1h:literal, $b2:literal, $a0:literal, $a1h:literal, $a2:literal;) => {
        $(#[$doc])*
        pub const $name: Coefficients =
            Coefficients::from_halved($b0, $b1h, $b2, $a0, $a1h, $a2);
    };
}

// Butterworth low-pass sections. The numerators are intentionally small:
// these tables trade DC gain for guaranteed headroom in the cascades.

table! {
    /// Low-pass, 300 Hz cutoff.
    LOW_PASS_300HZ = 13, 13, 13, 32767, -31857, 30997;
}
table! {
    /// Low-pass, 600 Hz cutoff.
    LOW_PASS_600HZ = 48, 48, 48, 32767, -30949, 29322;
}
table! {
    /// Low-pass, 1 kHz cutoff.
    LOW_PASS_1000HZ = 128, 128, 128, 32767, -29742, 27330;
}
table! {
    /// Low-pass, 1.2 kHz cutoff.
    LOW_PASS_1200HZ = 181, 181, 181, 32767, -29096, 26150;
}
table! {
    /// Low-pass, 2 kHz cutoff.
    LOW_PASS_2000HZ = 472, 472, 472, 32767, -26754, 22629;
}
table! {
    /// Low-pass, 2.4 kHz cutoff.
    LOW_PASS_2400HZ = 658, 658, 658, 32767, -25575, 21015;
}
table! {
    /// Low-pass, 4 kHz cutoff.
    LOW_PASS_4000HZ = 1622, 1622, 1622, 32767, -20964, 15649;
}
table! {
    /// Low-pass, 4.8 kHz cutoff.
    LOW_PASS_4800HZ = 2210, 2210, 2210, 32767, -18726, 13526;
}
table! {
    /// Low-pass, 9.6 kHz cutoff.
    LOW_PASS_9600HZ = 6769, 6769, 6768, 32767, -6053, 6416;
}

// Butterworth high-pass sections.

table! {
    /// High-pass, 300 Hz cutoff.
    HIGH_PASS_300HZ = 31870, -31870, 31870, 32767, -31857, 30997;
}
table! {
    /// High-pass, 600 Hz cutoff.
    HIGH_PASS_600HZ = 30997, -30997, 30997, 32767, -30949, 29322;
}
table! {
    /// High-pass, 1 kHz cutoff.
    HIGH_PASS_1000HZ = 29870, -29870, 29870, 32767, -29742, 27330;
}
table! {
    /// High-pass, 1.2 kHz cutoff.
    HIGH_PASS_1200HZ = 29322, -29322, 29322, 32767, -29135, 26240;
}
table! {
    /// High-pass, 2 kHz cutoff.
    HIGH_PASS_2000HZ = 27226, -27226, 27226, 32767, -26754, 22629;
}
table! {
    /// High-pass, 2.4 kHz cutoff.
    HIGH_PASS_2400HZ = 26233, -26233, 26233, 32767, -25575, 21015;
}
table! {
    /// High-pass, 4 kHz cutoff.
    HIGH_PASS_4000HZ = 22587, -22587, 22587, 32767, -20964, 15649;
}
table! {
    /// High-pass, 4.8 kHz cutoff.
    HIGH_PASS_4800HZ = 20936, -20936, 20936, 32767, -18726, 13526;
}
table! {
    /// High-pass, 9.6 kHz cutoff.
    HIGH_PASS_9600HZ = 12891, -12891, 12891, 32767, -6053, 6416;
}

// Band-pass sections over a frequency range.

table! {
    /// Band-pass, 600 Hz to 1.2 kHz.
    BAND_PASS_600HZ_1200HZ = 1239, 0, -1239, 32767, -31334, 30289;
}
table! {
    /// Band-pass, 600 Hz to 2.4 kHz.
    BAND_PASS_600HZ_2400HZ = 3468, 0, -3468, 32767, -28937, 25832;
}
table! {
    /// Band-pass, 1.2 kHz to 2.4 kHz.
    BAND_PASS_1200HZ_2400HZ = 2408, 0, -2408, 32767, -29617, 27950;
}
table! {
    /// Band-pass, 1.2 kHz to 4.8 kHz.
    BAND_PASS_1200HZ_4800HZ = 6344, 0, -6344, 32767, -25106, 20080;
}
table! {
    /// Band-pass, 2 kHz to 2.8 kHz.
    BAND_PASS_2000HZ_2800HZ = 1632, 0, -1632, 32767, -29652, 29503;
}
table! {
    /// Band-pass, 2.4 kHz to 4.8 kHz.
    BAND_PASS_2400HZ_4800HZ = 4480, 0, -4480, 32767, -25518, 23807;
}
table! {
    /// Band-pass, 2.4 kHz to 9.6 kHz.
    BAND_PASS_2400HZ_9600HZ = 11060, 0, -11060, 32767, -17227, 10647;
}
table! {
    /// Band-pass, 4.8 kHz to 9.6 kHz.
    BAND_PASS_4800HZ_9600HZ = 8036, 0, -8036, 32767, -15285, 16695;
}

// Band-pass sections placed by pole radius, all at r = 0.9372.

table! {
    /// Band-pass centered at 300 Hz, pole radius 0.9372.
    BAND_PASS_300HZ_R9372 = 2048, 0, -2048, 32767, -30686, 28781;
}
table! {
    /// Band-pass centered at 600 Hz, pole radius 0.9372.
    BAND_PASS_600HZ_R9372 = 2048, 0, -2048, 32767, -30615, 28781;
}
table! {
    /// Band-pass centered at 1.2 kHz, pole radius 0.9372.
    BAND_PASS_1200HZ_R9372 = 2048, 0, -2048, 32767, -30331, 28781;
}
table! {
    /// Band-pass centered at 2.4 kHz, pole radius 0.9372.
    BAND_PASS_2400HZ_R9372 = 2048, 0, -2048, 32767, -29206, 28781;
}
table! {
    /// Band-pass centered at 4.8 kHz, pole radius 0.9372.
    BAND_PASS_4800HZ_R9372 = 2048, 0, -2048, 32767, -24844, 28781;
}
table! {
    /// Band-pass centered at 9.6 kHz, pole radius 0.9372.
    BAND_PASS_9600HZ_R9372 = 2048, 0, -2048, 32767, -9490, 28781;
}

// Band-pass at 2.4 kHz with varying pole radius; the narrower the radius is
// to 1.00, the narrower (and more resonant) the band.

table! {
    /// Band-pass centered at 2.4 kHz, pole radius 1.00 (marginally stable).
    BAND_PASS_2400HZ_R100 = 1024, 0, -1024, 32767, -31163, 32767;
}
table! {
    /// Band-pass centered at 2.4 kHz, pole radius 0.97.
    BAND_PASS_2400HZ_R97 = 1024, 0, -1024, 32767, -30228, 30830;
}
table! {
    /// Band-pass centered at 2.4 kHz, pole radius 0.95.
    BAND_PASS_2400HZ_R95 = 1638, 0, -1638, 32767, -29605, 29572;
}
table! {
    /// Band-pass centered at 2.4 kHz, pole radius 0.90.
    BAND_PASS_2400HZ_R90 = 3277, 0, -3277, 32767, -28047, 26541;
}
table! {
    /// Band-pass centered at 2.4 kHz, pole radius 0.85.
    BAND_PASS_2400HZ_R85 = 4915, 0, -4915, 32767, -26489, 23674;
}
table! {
    /// Band-pass centered at 2.4 kHz, pole radius 0.80.
    BAND_PASS_2400HZ_R80 = 6553, 0, -6654, 32767, -24930, 20971;
}
table! {
    /// Band-pass centered at 2.4 kHz, pole radius 0.75.
    BAND_PASS_2400HZ_R75 = 8192, 0, -8192, 32767, -23372, 18431;
}

// Band-stop sections over a frequency range.

table! {
    /// Band-stop, 600 Hz to 1.2 kHz.
    BAND_STOP_600HZ_1200HZ = 31528, -31334, 31528, 32767, -31334, 30289;
}
table! {
    /// Band-stop, 600 Hz to 2.4 kHz.
    BAND_STOP_600HZ_2400HZ = 29229, -28937, 29229, 32767, -28937, 25832;
}
table! {
    /// Band-stop, 1.2 kHz to 2.4 kHz.
    BAND_STOP_1200HZ_2400HZ = 30359, -29617, 30359, 32767, -29617, 27950;
}
table! {
    /// Band-stop, 1.2 kHz to 4.8 kHz.
    BAND_STOP_1200HZ_4800HZ = 26423, -25106, 26423, 32767, -25106, 20080;
}
table! {
    /// Band-stop, 2 kHz to 2.8 kHz.
    BAND_STOP_2000HZ_2800HZ = 31135, -29652, 31135, 32767, -29652, 29503;
}
table! {
    /// Band-stop, 2.4 kHz to 4.8 kHz.
    BAND_STOP_2400HZ_4800HZ = 28287, -25518, 28287, 32767, -25518, 23807;
}
table! {
    /// Band-stop, 2.4 kHz to 9.6 kHz.
    BAND_STOP_2400HZ_9600HZ = 21707, -17227, 21707, 32767, -17227, 10647;
}
table! {
    /// Band-stop, 4.8 kHz to 9.6 kHz.
    BAND_STOP_4800HZ_9600HZ = 24731, -15285, 24731, 32767, -15285, 16695;
}
table! {
    /// Band-stop, 9.5 kHz to 10.5 kHz.
    BAND_STOP_9500HZ_10500HZ = 30827, -9547, 30827, 32767, -9547, 28891;
}

// Notch sections placed by pole radius, all at r = 0.9372.

table! {
    /// Notch at 300 Hz, pole radius 0.9372.
    NOTCH_300HZ_R9372 = 32767, -32742, 32767, 32767, -30686, 28781;
}
table! {
    /// Notch at 600 Hz, pole radius 0.9372.
    NOTCH_600HZ_R9372 = 32767, -32666, 32767, 32767, -30615, 28781;
}
table! {
    /// Notch at 1.2 kHz, pole radius 0.9372.
    NOTCH_1200HZ_R9372 = 32767, -32364, 32767, 32767, -30331, 28781;
}
table! {
    /// Notch at 2.4 kHz, pole radius 0.9372.
    NOTCH_2400HZ_R9372 = 32767, -31163, 32767, 32767, -29206, 28781;
}
table! {
    /// Notch at 4.8 kHz, pole radius 0.9372.
    NOTCH_4800HZ_R9372 = 32767, -26509, 32767, 32767, -24844, 28781;
}
table! {
    /// Notch at 9.6 kHz, pole radius 0.9372.
    NOTCH_9600HZ_R9372 = 32767, -10126, 32767, 32767, -9490, 28781;
}

// Notch at 2.4 kHz with varying pole radius.

table! {
    /// Notch at 2.4 kHz, pole radius 1.00 (marginally stable).
    NOTCH_2400HZ_R100 = 32767, -31163, 32767, 32767, -31163, 32767;
}
table! {
    /// Notch at 2.4 kHz, pole radius 0.97.
    NOTCH_2400HZ_R97 = 32767, -31163, 32767, 32767, -30228, 30830;
}
table! {
    /// Notch at 2.4 kHz, pole radius 0.95.
    NOTCH_2400HZ_R95 = 32767, -31163, 32767, 32767, -29605, 29572;
}
table! {
    /// Notch at 2.4 kHz, pole radius 0.90.
    NOTCH_2400HZ_R90 = 32767, -31163, 32767, 32767, -28047, 26541;
}
table! {
    /// Notch at 2.4 kHz, pole radius 0.85.
    NOTCH_2400HZ_R85 = 32767, -31163, 32767, 32767, -26489, 23674;
}
table! {
    /// Notch at 2.4 kHz, pole radius 0.80.
    NOTCH_2400HZ_R80 = 32767, -31163, 32767, 32767, -24930, 20971;
}
table! {
    /// Notch at 2.4 kHz, pole radius 0.75.
    NOTCH_2400HZ_R75 = 32767, -31163, 32767, 32767, -23372, 18431;
}

/// Every compiled-in set, paired with the name [`by_name`] resolves it under.
///
/// [`by_name`]: fn.by_name.html
pub const NAMED: &[(&str, &Coefficients)] = &[
    ("low_pass_300hz", &LOW_PASS_300HZ),
    ("low_pass_600hz", &LOW_PASS_600HZ),
    ("low_pass_1000hz", &LOW_PASS_1000HZ),
    ("low_pass_1200hz", &LOW_PASS_1200HZ),
    ("low_pass_2000hz", &LOW_PASS_2000HZ),
    ("low_pass_2400hz", &LOW_PASS_2400HZ),
    ("low_pass_4000hz", &LOW_PASS_4000HZ),
    ("low_pass_4800hz", &LOW_PASS_4800HZ),
    ("low_pass_9600hz", &LOW_PASS_9600HZ),
    ("high_pass_300hz", &HIGH_PASS_300HZ),
    ("high_pass_600hz", &HIGH_PASS_600HZ),
    ("high_pass_1000hz", &HIGH_PASS_1000HZ),
    ("high_pass_1200hz", &HIGH_PASS_1200HZ),
    ("high_pass_2000hz", &HIGH_PASS_2000HZ),
    ("high_pass_2400hz", &HIGH_PASS_2400HZ),
    ("high_pass_4000hz", &HIGH_PASS_4000HZ),
    ("high_pass_4800hz", &HIGH_PASS_4800HZ),
    ("high_pass_9600hz", &HIGH_PASS_9600HZ),
    ("band_pass_600hz_1200hz", &BAND_PASS_600HZ_1200HZ),
    ("band_pass_600hz_2400hz", &BAND_PASS_600HZ_2400HZ),
    ("band_pass_1200hz_2400hz", &BAND_PASS_1200HZ_2400HZ),
    ("band_pass_1200hz_4800hz", &BAND_PASS_1200HZ_4800HZ),
    ("band_pass_2000hz_2800hz", &BAND_PASS_2000HZ_2800HZ),
    ("band_pass_2400hz_4800hz", &BAND_PASS_2400HZ_4800HZ),
    ("band_pass_2400hz_9600hz", &BAND_PASS_2400HZ_9600HZ),
    ("band_pass_4800hz_9600hz", &BAND_PASS_4800HZ_9600HZ),
    ("band_pass_300hz_r9372", &BAND_PASS_300HZ_R9372),
    ("band_pass_600hz_r9372", &BAND_PASS_600HZ_R9372),
    ("band_pass_1200hz_r9372", &BAND_PASS_1200HZ_R9372),
    ("band_pass_2400hz_r9372", &BAND_PASS_2400HZ_R9372),
    ("band_pass_4800hz_r9372", &BAND_PASS_4800HZ_R9372),
    ("band_pass_9600hz_r9372", &BAND_PASS_9600HZ_R9372),
    ("band_pass_2400hz_r100", &BAND_PASS_2400HZ_R100),
    ("band_pass_2400hz_r97", &BAND_PASS_2400HZ_R97),
    ("band_pass_2400hz_r95", &BAND_PASS_2400HZ_R95),
    ("band_pass_2400hz_r90", &BAND_PASS_2400HZ_R90),
    ("band_pass_2400hz_r85", &BAND_PASS_2400HZ_R85),
    ("band_pass_2400hz_r80", &BAND_PASS_2400HZ_R80),
    ("band_pass_2400hz_r75", &BAND_PASS_2400HZ_R75),
    ("band_stop_600hz_1200hz", &BAND_STOP_600HZ_1200HZ),
    ("band_stop_600hz_2400hz", &BAND_STOP_600HZ_2400HZ),
    ("band_stop_1200hz_2400hz", &BAND_STOP_1200HZ_2400HZ),
    ("band_stop_1200hz_4800hz", &BAND_STOP_1200HZ_4800HZ),
    ("band_stop_2000hz_2800hz", &BAND_STOP_2000HZ_2800HZ),
    ("band_stop_2400hz_4800hz", &BAND_STOP_2400HZ_4800HZ),
    ("band_stop_2400hz_9600hz", &BAND_STOP_2400HZ_9600HZ),
    ("band_stop_4800hz_9600hz", &BAND_STOP_4800HZ_9600HZ),
    ("band_stop_9500hz_10500hz", &BAND_STOP_9500HZ_10500HZ),
    ("notch_300hz_r9372", &NOTCH_300HZ_R9372),
    ("notch_600hz_r9372", &NOTCH_600HZ_R9372),
    ("notch_1200hz_r9372", &NOTCH_1200HZ_R9372),
    ("notch_2400hz_r9372", &NOTCH_2400HZ_R9372),
    ("notch_4800hz_r9372", &NOTCH_4800HZ_R9372),
    ("notch_9600hz_r9372", &NOTCH_9600HZ_R9372),
    ("notch_2400hz_r100", &NOTCH_2400HZ_R100),
    ("notch_2400hz_r97", &NOTCH_2400HZ_R97),
    ("notch_2400hz_r95", &NOTCH_2400HZ_R95),
    ("notch_2400hz_r90", &NOTCH_2400HZ_R90),
    ("notch_2400hz_r85", &NOTCH_2400HZ_R85),
    ("notch_2400hz_r80", &NOTCH_2400HZ_R80),
    ("notch_2400hz_r75", &NOTCH_2400HZ_R75),
];

static INDEX: OnceCell<HashMap<&'static str, &'static Coefficients>> = OnceCell::new();

/// Looks up a compiled-in coefficient set by table name.
///
/// Names are the lowercase entries of [`NAMED`], e.g. `"low_pass_300hz"` or
/// `"notch_2400hz_r9372"`.
///
/// [`NAMED`]: constant.NAMED.html
pub fn by_name(name: &str) -> Option<&'static Coefficients> {
    let index = INDEX.get_or_init(|| NAMED.iter().copied().collect());
    index.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_name_finds_every_table() {
        for &(name, coeffs) in NAMED {
            assert_eq!(by_name(name), Some(coeffs), "missing {}", name);
        }
        assert_eq!(by_name("low_pass_50hz"), None);
    }

    #[test]
    fn every_table_uses_unity_a0() {
        for &(name, coeffs) in NAMED {
            assert_eq!(coeffs.a0, crate::UNITY, "{}", name);
        }
    }
}
