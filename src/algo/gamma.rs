//! The Gamma function for real arguments.
//!
//! Stirling's asymptotic series after shifting the argument upward with
//! Γ(x+1) = x·Γ(x), and the reflection formula below 1/2. The Bernoulli
//! coefficients are the ones of the classic DGAMLN routine.

#![allow(clippy::excessive_precision)]

use crate::machine::BesselFloat;
use crate::utils::sinpi;

/// Coefficients of the asymptotic expansion for ln(Γ(x)):
///   CF(k) = B_{2k} / (2k * (2k-1)),  k = 1, 2, ...
#[rustfmt::skip]
const CF_TABLE: [f64; 16] = [
     8.33333333333333333e-02,   // 1/12
    -2.77777777777777778e-03,   // -1/360
     7.93650793650793651e-04,
    -5.95238095238095238e-04,
     8.41750841750841751e-04,
    -1.91752691752691753e-03,
     6.41025641025641026e-03,
    -2.95506535947712418e-02,
     1.79644372368830573e-01,
    -1.39243221690590112e+00,
     1.34028640441683920e+01,
    -1.56848284626002017e+02,
     2.19310333333333333e+03,
    -3.61087712537249894e+04,
     6.91472268851313067e+05,
    -1.52382215394074162e+07,
];

/// Largest integer argument evaluated as an exact running product.
const FACTORIAL_LIMIT: f64 = 171.0;

/// Γ(x) for real `x`.
///
/// Returns +∞ at the poles (zero and the negative integers), so that the
/// reciprocal Γ used by the series kernels comes out as an exact zero there.
pub(crate) fn gamma<T: BesselFloat>(x: T) -> T {
    let one = T::one();
    let half = T::from_f64(0.5);

    if x.is_nan() {
        return x;
    }
    if x <= T::zero() && x == x.floor() {
        return T::infinity();
    }
    if x < half {
        // Γ(x)·Γ(1−x) = π / sin(πx)
        return T::PI() / (sinpi(x) * gamma(one - x));
    }
    if x == x.floor() && x <= T::from_f64(FACTORIAL_LIMIT) {
        let mut p = one;
        let mut k = T::from_f64(2.0);
        while k < x {
            p = p * k;
            k = k + one;
        }
        return p;
    }

    // Shift to where the truncated series reaches full precision.
    let threshold = T::from_f64((0.3 * f64::from(T::MACH_DIGITS)).max(10.0));
    let mut y = x;
    let mut shift = one;
    while y < threshold {
        shift = shift * y;
        y = y + one;
    }

    let r = one / y;
    let r2 = r * r;
    let mut power = r;
    let mut s = T::zero();
    for cf in CF_TABLE {
        let term = T::from_f64(cf) * power;
        s = s + term;
        if term.abs() <= s.abs() * T::MACH_EPSILON {
            break;
        }
        power = power * r2;
    }

    // y^(y-1/2) split in two halves so that large y does not overflow early.
    let root = y.powf((y - half) * half);
    // exp(-y) and exp(s) separately: rounding -y + s would cost an ulp of y.
    let stirling = root * ((-y).exp() * s.exp() * root) * T::TAU().sqrt();
    stirling / shift
}
