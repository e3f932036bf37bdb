//! Large orders: continued fraction plus three-term recurrence.
//!
//! For |ν| at or above the direct order D, the ratio of consecutive orders
//! at ν comes from the continued fraction of the minimal solution, and the
//! recurrence is run downward from ν to the reference orders α + D − 1 and
//! α + D − 2 (α the fractional part), where the dispatcher evaluates the
//! function directly. K is dominant in the upward direction and is simply
//! recurred upward from the same reference orders.
//!
//! Both directions keep the running pair near unit size by stripping a
//! common power of two into a separate exponent sum.

use num_complex::Complex;

use crate::bessel::Bessel;
use crate::machine::{BesselFloat, ZERO_EXPONENT};
use crate::utils::{exponent, is_finite, is_zero, ldexp, mul_i, nan, nearly_integer, swap};

/// Sign of the recurrence f_{k−1} = (2k/z)·f_k ∓ f_{k+1}: `Minus` for J,
/// `Plus` for I.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sign {
    Minus,
    Plus,
}

impl Sign {
    #[inline]
    fn step<T: BesselFloat>(self, r: Complex<T>, f1: Complex<T>, f0: Complex<T>) -> Complex<T> {
        match self {
            Sign::Minus => r * f1 - f0,
            Sign::Plus => r * f1 + f0,
        }
    }
}

/// Recurrence evaluator bound to a dispatcher, which supplies the values at
/// the reference orders.
pub(crate) struct Recurrence<'a, T: BesselFloat> {
    bessel: &'a Bessel<T>,
    direct: T,
    fraction_terms: usize,
}

impl<'a, T: BesselFloat> Recurrence<'a, T> {
    pub(crate) fn new(bessel: &'a Bessel<T>) -> Self {
        let thresholds = bessel.thresholds();
        Recurrence {
            bessel,
            direct: T::from_f64(f64::from(thresholds.direct_order)),
            fraction_terms: thresholds.fraction_terms,
        }
    }

    /// f_ν/f_{ν−1} of the minimal solution, from the convergents of the
    /// continued fraction. `None` when the convergents vanish.
    fn ratio(&self, nu: T, v: Complex<T>, sign: Sign, start: usize) -> Option<Complex<T>> {
        let two = T::from_f64(2.0);
        let one = Complex::new(T::one(), T::zero());
        let zero = Complex::new(T::zero(), T::zero());
        let (mut a0, mut b0, mut a1, mut b1) = (one, zero, zero, one);
        if start == 1 {
            let r = v * (nu * two);
            (a0, b0, a1, b1) = (a1, b1, r * a1 + a0, r * b1 + b0);
        }

        let mut s = one;
        for i in start..=self.fraction_terms {
            let r = v * ((nu + T::from_f64(i as f64)) * two);
            (a0, b0, a1, b1) = (a1, b1, sign.step(r, a1, a0), sign.step(r, b1, b0));
            s = a1 / b1;

            let e = exponent(a1).max(exponent(b1));
            if e <= ZERO_EXPONENT {
                return None;
            }
            a0 = ldexp(a0, -e);
            a1 = ldexp(a1, -e);
            b0 = ldexp(b0, -e);
            b1 = ldexp(b1, -e);

            if i > 0 && i % 4 == 0 {
                let r0 = a0 * b1;
                let r1 = a1 * b0;
                // Written so that NaN also stops the iteration.
                if !((r0 - r1).norm() > r0.norm().min(r1.norm()) * T::MACH_EPSILON) {
                    break;
                }
            }
        }
        Some(s)
    }

    /// Runs the recurrence from order `n + α` down to the reference orders and
    /// scales the reference value `base` back up.
    fn downward<F>(&self, s: Complex<T>, n: T, alpha: T, v: Complex<T>, sign: Sign, base: F) -> Complex<T>
    where
        F: Fn(T) -> Complex<T>,
    {
        let one = Complex::new(T::one(), T::zero());
        let two = T::from_f64(2.0);
        let over = s.norm() > T::one();
        let (mut f0, mut f1) = if over { (one, s.inv()) } else { (s, one) };

        let stop = self.direct - T::one();
        let mut exp_sum = 0i32;
        let mut k = n - T::one();
        while k >= stop {
            let r = v * ((k + alpha) * two);
            (f0, f1) = (f1, sign.step(r, f1, f0));
            let (e0, e1) = (exponent(f0), exponent(f1));
            if !is_zero(f0) && !is_zero(f1) && ((e0 > 0 && e1 > 0) || (e0 < 0 && e1 < 0)) {
                let e = if e0 > 0 { e0.max(e1) } else { e0.min(e1) };
                exp_sum += e;
                f0 = ldexp(f0, -e);
                f1 = ldexp(f1, -e);
            }
            k = k - T::one();
        }

        let y = if f0.norm() >= f1.norm() {
            base(alpha + stop) / f0
        } else {
            base(alpha + stop - T::one()) / f1
        };
        let y = ldexp(y, -exp_sum);
        if over {
            y
        } else {
            y * s
        }
    }

    pub(crate) fn besselj(&self, nu: T, z: Complex<T>) -> Complex<T> {
        if nu > T::zero() {
            let n = nu.floor();
            let v = z.inv();
            return match self.ratio(nu, v, Sign::Minus, 1) {
                Some(s) => self.downward(s, n, nu - n, v, Sign::Minus, |o| self.bessel.eval_j(o, z)),
                None => nan(),
            };
        }
        if let Some(m) = nearly_integer(nu) {
            // J_{−m} = (−1)^m J_m
            let y = self.bessel.eval_j(T::from_f64(-m as f64), z);
            return if m % 2 == 0 { y } else { -y };
        }
        let half = T::from_f64(0.5);
        self.bessel.caches().trig.cis_pi(nu * half) * self.besseli(nu, swap(z)).conj()
    }

    pub(crate) fn besseli(&self, nu: T, z: Complex<T>) -> Complex<T> {
        let a = nu.abs();
        let n = a.floor();
        let v = z.inv();
        let s = match self.ratio(a, v, Sign::Plus, 0) {
            Some(s) => s,
            None => return nan(),
        };
        if !is_finite(s) {
            return Complex::new(T::zero(), T::zero());
        }
        let mut y = self.downward(s, n, a - n, v, Sign::Plus, |o| self.bessel.eval_i(o, z));
        if nu < T::zero() && a != n {
            // I_{−ν} = I_ν + (2/π) sin(πν) K_ν
            let sin = self.bessel.caches().trig.sinpi(a);
            y = y + self.bessel.eval_k(a, z) * (T::FRAC_2_PI() * sin);
        }
        y
    }

    pub(crate) fn bessely(&self, nu: T, z: Complex<T>) -> Complex<T> {
        let half = T::from_f64(0.5);
        if let Some(m) = nearly_integer(nu + half) {
            // Y_{m−1/2} = (−1)^m J_{1/2−m}
            let y = self.bessel.eval_j(-nu, z);
            return if m % 2 == 0 { y } else { -y };
        }
        let a = nu.abs();
        let c = self.bessel.caches().trig.cis_pi(a * half);
        let w = swap(z);
        let bi = self.bessel.eval_i(a, w);
        let bk = self.bessel.eval_k(a, w);
        if nu > T::zero() {
            mul_i(c * bi.conj()) - (c * bk).conj() * T::FRAC_2_PI()
        } else {
            let sin = self.bessel.caches().trig.sinpi(a);
            mul_i((c * bi).conj()) + (mul_i(c.conj()) * sin - c) * bk.conj() * T::FRAC_2_PI()
        }
    }

    pub(crate) fn besselk(&self, nu: T, z: Complex<T>) -> Complex<T> {
        let two = T::from_f64(2.0);
        let a = nu.abs();
        let n = a.floor();
        let alpha = a - n;
        let stop = self.direct - T::one();
        let mut k0 = self.bessel.eval_k(alpha + stop - T::one(), z);
        let mut k1 = self.bessel.eval_k(alpha + stop, z);
        if is_zero(k0) && is_zero(k1) {
            return Complex::new(T::zero(), T::zero());
        }

        let v = z.inv();
        let mut exp_sum = 0i32;
        let mut k = stop;
        while k < n {
            (k0, k1) = (k1, v * ((k + alpha) * two) * k1 + k0);
            let e = exponent(k1);
            if e > 0 {
                exp_sum += e;
                k0 = ldexp(k0, -e);
                k1 = ldexp(k1, -e);
            }
            k = k + T::one();
        }
        ldexp(k1, exp_sum)
    }
}
