//! Cubic interpolation in the order across the band next to an integer.
//!
//! The fractional-order formulas for Y divide by sin(πν), so they
//! lose digits as ν approaches an integer n, while the integer-order
//! formulas only hold at n itself. Inside |ν − n| < h the value is taken
//! from the cubic through the orders n, n ± h, n ± 1.5h and n ± 2h (on the
//! side of ν), which are all far enough from n to be well conditioned.

use num_complex::Complex;

use crate::machine::BesselFloat;
use crate::utils::nearly_integer;

/// The integer `n` when `nu` is inside its interpolation band but not
/// already within machine epsilon of it.
pub(crate) fn anchor<T: BesselFloat>(nu: T, n: T) -> Option<T> {
    if nearly_integer(nu).is_some() {
        return None;
    }
    ((n - nu).abs() < T::INTERPOLATION_WIDTH).then_some(n)
}

/// `f(nu)` from the four samples at `n + {0, 1, 1.5, 2}·h·sign(nu − n)`.
pub(crate) fn cubic<T, F>(nu: T, n: T, f: F) -> Complex<T>
where
    T: BesselFloat,
    F: Fn(T) -> Complex<T>,
{
    let h = T::INTERPOLATION_WIDTH;
    let alpha = nu - n;
    let step = if alpha < T::zero() { -h } else { h };
    let y0 = f(n);
    let y1 = f(n + step);
    let y2 = f(n + step * T::from_f64(1.5));
    let y3 = f(n + step * T::from_f64(2.0));

    let t = alpha.abs() / h;
    let c = |p0: f64, p1: f64, p2: f64, q: f64| {
        (T::from_f64(p0) + t * (T::from_f64(p1) + t * T::from_f64(p2))) / T::from_f64(q)
    };
    // Lagrange basis for the nodes t = 0, 1, 3/2, 2, written as y0 + t·Σ w_i·y_i.
    let w0 = -c(13.0, -9.0, 2.0, 6.0);
    let w1 = c(6.0, -7.0, 2.0, 1.0);
    let w2 = -c(16.0, -24.0, 8.0, 3.0);
    let w3 = c(3.0, -5.0, 2.0, 2.0);
    y0 + (y0 * w0 + y1 * w1 + y2 * w2 + y3 * w3) * t
}
