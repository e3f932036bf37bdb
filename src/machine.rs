//! Machine constants and the `BesselFloat` trait.
//!
//! Everything the kernels need from the scalar type beyond ordinary field
//! arithmetic lives here: precision introspection, binary exponent access
//! for convergence tests, exact power-of-two scaling, and the
//! precision-dependent tuning constants.

use std::hash::Hash;
use std::sync::OnceLock;

use num_traits::{Float, FloatConst};

use crate::bessel::Bessel;

/// Exponent reported for a zero value by [`BesselFloat::exponent`].
///
/// Far enough below any representable exponent that comparisons against it
/// always read as "negligible", yet small enough in magnitude that sums and
/// differences of two exponents cannot overflow an `i32`.
pub const ZERO_EXPONENT: i32 = -(1 << 20);

/// Exponent reported for infinities and NaN by [`BesselFloat::exponent`].
pub const NONFINITE_EXPONENT: i32 = 1 << 20;

/// Floating-point trait for Bessel function computation.
///
/// Implemented for `f64`. A wider backend implements the same capability set
/// and supplies its own tuning constants; the kernels are written against
/// this trait only.
pub trait BesselFloat: Float + FloatConst + core::fmt::Debug + Send + Sync + 'static {
    /// Machine epsilon.
    const MACH_EPSILON: Self;
    /// Number of binary digits in the mantissa.
    const MACH_DIGITS: i32;

    /// Euler–Mascheroni constant γ.
    const EULER_GAMMA: Self;
    /// Apéry's constant ζ(3).
    const ZETA3: Self;

    /// Starting magnitude of Miller's backward recurrence.
    const MILLER_SEED: Self;
    /// Half-width of the band around integer orders where Y is obtained
    /// by interpolation instead of direct evaluation.
    const INTERPOLATION_WIDTH: Self;
    /// Fractional order below which Miller-Y switches to the small-α
    /// expansions of η₀ and ξ₁.
    const SMALL_ALPHA: Self;
    /// Degree of the Yoshida–Padé rational approximation of K.
    const PADE_DEGREE: usize;

    /// Exact hashable image of a value, used as a cache key.
    type Key: Copy + Eq + Hash + Send + Sync + core::fmt::Debug + 'static;

    /// Infallible conversion from f64.
    fn from_f64(x: f64) -> Self;

    /// Unbiased binary exponent (`ilogb`): `2^e <= |self| < 2^(e+1)`.
    ///
    /// Zero maps to [`ZERO_EXPONENT`], infinities and NaN map to
    /// [`NONFINITE_EXPONENT`].
    fn exponent(self) -> i32;

    /// Exact multiplication by `2^exp`.
    fn ldexp(self, exp: i32) -> Self;

    /// Cache key for this value. `+0` and `-0` share a key.
    fn key(self) -> Self::Key;

    /// Process-wide evaluator used by the crate-level free functions.
    fn shared() -> &'static Bessel<Self>;
}

impl BesselFloat for f64 {
    const MACH_EPSILON: f64 = f64::EPSILON;
    const MACH_DIGITS: i32 = 53;

    const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;
    const ZETA3: f64 = 1.202_056_903_159_594_3;

    const MILLER_SEED: f64 = 1e-100;
    const INTERPOLATION_WIDTH: f64 = 1.0 / 1024.0;
    const SMALL_ALPHA: f64 = 1.0 / 4096.0;
    const PADE_DEGREE: usize = 36;

    type Key = u64;

    #[inline]
    fn from_f64(x: f64) -> f64 {
        x
    }

    #[inline]
    fn exponent(self) -> i32 {
        if self == 0.0 {
            return ZERO_EXPONENT;
        }
        if !self.is_finite() {
            return NONFINITE_EXPONENT;
        }
        // x = mantissa * 2^exp with the mantissa an integer; works for
        // subnormals as well since the leading bit is located explicitly.
        let (mantissa, exp, _) = Float::integer_decode(self);
        i32::from(exp) + (63 - mantissa.leading_zeros() as i32)
    }

    #[inline]
    fn ldexp(self, exp: i32) -> f64 {
        // Beyond this range every finite nonzero input has already
        // overflowed or underflowed.
        let mut e = exp.clamp(-2200, 2200);
        let mut x = self;
        let up = f64::from_bits(((1000 + 1023) as u64) << 52);
        let down = f64::from_bits(((1023 - 1000) as u64) << 52);
        while e > 1000 {
            x *= up;
            e -= 1000;
        }
        while e < -1000 {
            x *= down;
            e += 1000;
        }
        x * f64::from_bits(((e + 1023) as u64) << 52)
    }

    #[inline]
    fn key(self) -> u64 {
        if self == 0.0 {
            0
        } else {
            self.to_bits()
        }
    }

    fn shared() -> &'static Bessel<f64> {
        static SHARED: OnceLock<Bessel<f64>> = OnceLock::new();
        SHARED.get_or_init(Bessel::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponent_matches_ilogb() {
        assert_eq!(1.0_f64.exponent(), 0);
        assert_eq!(1.5_f64.exponent(), 0);
        assert_eq!(2.0_f64.exponent(), 1);
        assert_eq!(0.75_f64.exponent(), -1);
        assert_eq!((-8.0_f64).exponent(), 3);
        assert_eq!(1e-300_f64.exponent(), -997);
        assert_eq!(f64::MIN_POSITIVE.exponent(), -1022);
        assert_eq!((f64::MIN_POSITIVE / 4.0).exponent(), -1024);
    }

    #[test]
    fn exponent_sentinels() {
        assert_eq!(0.0_f64.exponent(), ZERO_EXPONENT);
        assert_eq!((-0.0_f64).exponent(), ZERO_EXPONENT);
        assert_eq!(f64::INFINITY.exponent(), NONFINITE_EXPONENT);
        assert_eq!(f64::NAN.exponent(), NONFINITE_EXPONENT);
    }

    #[test]
    fn ldexp_is_exact() {
        assert_eq!(3.0_f64.ldexp(4), 48.0);
        assert_eq!(3.0_f64.ldexp(-1), 1.5);
        assert_eq!(1.0_f64.ldexp(1023), 2.0_f64.powi(1023));
        assert_eq!(1.0_f64.ldexp(-1022), f64::MIN_POSITIVE);
        assert_eq!(2.0_f64.powi(1000).ldexp(-2000), 2.0_f64.powi(-1000));
        assert_eq!(0.0_f64.ldexp(500), 0.0);
    }

    #[test]
    fn ldexp_saturates() {
        assert_eq!(1.0_f64.ldexp(5000), f64::INFINITY);
        assert_eq!(1.0_f64.ldexp(-5000), 0.0);
        assert_eq!(1.0_f64.ldexp(ZERO_EXPONENT), 0.0);
    }

    #[test]
    fn key_merges_signed_zero() {
        assert_eq!(0.0_f64.key(), (-0.0_f64).key());
        assert_ne!(0.5_f64.key(), (-0.5_f64).key());
        assert_eq!(0.25_f64.key(), 0.25_f64.key());
    }

    #[test]
    fn shared_evaluator_is_unique() {
        let a: *const Bessel<f64> = f64::shared();
        let b: *const Bessel<f64> = f64::shared();
        assert_eq!(a, b);
    }
}
