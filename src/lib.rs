#![deny(missing_docs)]

//! `iirq` is a crate for filtering 16-bit audio streams with fixed-point
//! (Q15) IIR filters. The main entry points are the fourth-order cascades
//! [`Df1Cascade`] and [`Df2Cascade`], and the standalone second-order filter
//! [`SecondOrder`].
//!
//! All three consume one signed 16-bit sample per call and return one sample,
//! synchronously; there is no buffering, batching or I/O inside the engine.
//! Coefficients are precomputed Q15 six-tuples (see [`Coefficients`]), either
//! picked from the compiled-in tables in [`coeffs`] or supplied by the
//! caller. The engine never designs a filter itself.
//!
//! [`Df1Cascade`]: struct.Df1Cascade.html
//! [`Df2Cascade`]: struct.Df2Cascade.html
//! [`SecondOrder`]: struct.SecondOrder.html
//! [`Coefficients`]: struct.Coefficients.html

mod biquad;
mod cascade;
pub mod coeffs;
pub mod gen;

#[cfg(feature = "dasp")]
mod signal;
#[cfg(feature = "dasp")]
pub use dasp;

pub use cascade::{Df1Cascade, Df2Cascade, Filter, SecondOrder};
pub use coeffs::Coefficients;
#[cfg(feature = "dasp")]
pub use signal::FilterSignal;

/// The Q15 unity constant: the integer 32767 stands for the real value 1.000.
///
/// Multiplying two Q15 values produces a double-width result that must be
/// shifted right by [`SCALE_SHIFT`] bits to return to sample scale.
///
/// [`SCALE_SHIFT`]: constant.SCALE_SHIFT.html
pub const UNITY: i16 = 32767;

/// Largest value the saturation policy lets through.
pub const SAMPLE_MAX: i16 = 32767;

/// Smallest value the saturation policy lets through.
///
/// Note that this is -32767, not `i16::MIN`: the clamp is symmetric.
pub const SAMPLE_MIN: i16 = -32767;

/// The shift undoing the Q15 coefficient scale after a multiply.
pub const SCALE_SHIFT: u32 = 15;

/// The direct form II headroom shift: stage inputs are divided by 128 before
/// the feedback recursion and the final output is scaled back up by the same
/// factor.
pub const HEADROOM_SHIFT: u32 = 7;
