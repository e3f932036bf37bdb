//! Complex helpers and exact trigonometry in units of π.

use num_complex::Complex;

use crate::machine::{BesselFloat, ZERO_EXPONENT};

/// Multiply a complex number by i: (a+bi)·i = -b+ai.
#[inline]
pub(crate) fn mul_i<T: BesselFloat>(c: Complex<T>) -> Complex<T> {
    Complex::new(-c.im, c.re)
}

/// Multiply a complex number by -i: (a+bi)·(-i) = b-ai.
#[inline]
pub(crate) fn mul_neg_i<T: BesselFloat>(c: Complex<T>) -> Complex<T> {
    Complex::new(c.im, -c.re)
}

/// Exchange real and imaginary parts: `x + iy -> y + ix`.
///
/// For z in the first quadrant this is the reflection through the diagonal,
/// i.e. `conj(i·conj(z))`, which maps the ordinary Bessel problem onto the
/// modified one.
#[inline]
pub(crate) fn swap<T: BesselFloat>(z: Complex<T>) -> Complex<T> {
    Complex::new(z.im, z.re)
}

#[inline]
pub(crate) fn nan<T: BesselFloat>() -> Complex<T> {
    Complex::new(T::nan(), T::nan())
}

/// Binary exponent of a complex value: the larger exponent of its parts.
#[inline]
pub(crate) fn exponent<T: BesselFloat>(z: Complex<T>) -> i32 {
    z.re.exponent().max(z.im.exponent())
}

/// Exact scaling of both parts by `2^exp`.
#[inline]
pub(crate) fn ldexp<T: BesselFloat>(z: Complex<T>, exp: i32) -> Complex<T> {
    Complex::new(z.re.ldexp(exp), z.im.ldexp(exp))
}

/// Underflow-safe complex division `a / b`.
///
/// Normalizes `b` by its magnitude before forming the quotient, so a
/// divisor whose squared modulus underflows (Miller sums run at the scale
/// of the seed) still divides correctly. Equivalent to Fortran ZDIV in
/// TOMS 644.
#[inline]
pub(crate) fn zdiv<T: BesselFloat>(a: Complex<T>, b: Complex<T>) -> Complex<T> {
    let bm = T::one() / b.norm();
    let cc = b.re * bm;
    let cd = b.im * bm;
    Complex::new((a.re * cc + a.im * cd) * bm, (a.im * cc - a.re * cd) * bm)
}

/// `true` when `z` is exactly zero or its exponent is the zero sentinel.
#[inline]
pub(crate) fn is_zero<T: BesselFloat>(z: Complex<T>) -> bool {
    exponent(z) <= ZERO_EXPONENT
}

/// `true` when both components are finite.
#[inline]
pub(crate) fn is_finite<T: BesselFloat>(z: Complex<T>) -> bool {
    z.re.is_finite() && z.im.is_finite()
}

/// Nearest integer to `nu` when `nu` lies within machine epsilon of it.
#[inline]
pub(crate) fn nearly_integer<T: BesselFloat>(nu: T) -> Option<i64> {
    let n = nu.round();
    if (nu - n).abs() < T::MACH_EPSILON {
        n.to_i64()
    } else {
        None
    }
}

/// `c + s·a`, plus whether the sum no longer moves.
#[inline]
pub(crate) fn add<T: BesselFloat>(c: Complex<T>, s: Complex<T>, a: Complex<T>) -> (Complex<T>, bool) {
    let x = c + s * a;
    (x, x == c)
}

/// `c + s·(a + b)`, plus whether both `c + s·(a ± b)` equal `c`.
///
/// Testing both signs keeps a term pair whose halves cancel from being
/// mistaken for a converged sum.
#[inline]
pub(crate) fn add2<T: BesselFloat>(
    c: Complex<T>,
    s: Complex<T>,
    a: Complex<T>,
    b: Complex<T>,
) -> (Complex<T>, bool) {
    let x = c + s * (a + b);
    let y = c + s * (a - b);
    (x, x == c && y == c)
}

/// Compute sin(π·x) with exact values at half-integers.
///
/// Reduces the argument modulo 2 first, so `sinpi(n)` is exactly 0 for
/// any integer `n`, and `sinpi(n + 0.5)` is exactly ±1. This avoids the
/// rounding errors of `(x * PI).sin()` at half-integers, where
/// `sin(1.5 * PI)` is off by 1.8e-16.
///
/// Algorithm follows scipy/xsf: reduce to [0, 0.5], use symmetry.
#[inline]
pub(crate) fn sinpi<T: BesselFloat>(x: T) -> T {
    let zero = T::zero();
    let one = T::one();
    let two = T::from_f64(2.0);
    let half = T::from_f64(0.5);
    let one_half = T::from_f64(1.5);
    let pi = T::PI();

    // sinpi is odd: sinpi(-x) = -sinpi(x)
    let (ax, sign) = if x < zero { (-x, -one) } else { (x, one) };

    // Reduce to [0, 2): r = ax mod 2
    let r = ax % two;

    // Exact special values
    if r == zero || r == one {
        return zero;
    }
    if r == half {
        return sign;
    }
    if r == one_half {
        return -sign;
    }

    // Reduce to [0, 0.5] by symmetry
    let s = if r < half {
        (r * pi).sin()
    } else if r < one {
        ((one - r) * pi).sin()
    } else if r < one_half {
        -((r - one) * pi).sin()
    } else {
        -((two - r) * pi).sin()
    };

    sign * s
}

/// Compute cos(π·x) with exact values at integers and half-integers.
///
/// Same reduction as [`sinpi`]; `cospi(n + 0.5)` is exactly 0 and
/// `cospi(n)` exactly ±1.
#[inline]
pub(crate) fn cospi<T: BesselFloat>(x: T) -> T {
    let zero = T::zero();
    let one = T::one();
    let two = T::from_f64(2.0);
    let half = T::from_f64(0.5);
    let one_half = T::from_f64(1.5);
    let pi = T::PI();

    // cospi is even: reduce |x| to [0, 2)
    let r = x.abs() % two;

    if r == zero {
        return one;
    }
    if r == half || r == one_half {
        return zero;
    }
    if r == one {
        return -one;
    }

    if r < half {
        (r * pi).cos()
    } else if r < one {
        -((one - r) * pi).cos()
    } else if r < one_half {
        -((r - one) * pi).cos()
    } else {
        ((two - r) * pi).cos()
    }
}
