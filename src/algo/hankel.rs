//! Hankel's asymptotic expansion for large |z|.
//!
//! a_0 = 1, a_k = a_{k-1}·(4ν² − (2k−1)²)/(8k). J and Y split the series in
//! 1/z into even and odd parts combined with cos ω and sin ω,
//! ω = z − (2ν+1)π/4. I and K use the alternating and the plain series.
//!
//! The series is asymptotic, not convergent: it is summed until the newest
//! term falls below the working precision relative to the sum. If that does
//! not happen within the term budget the result is NaN.

use num_complex::Complex;

use crate::cache::{Table, TrigCache};
use crate::machine::BesselFloat;
use crate::utils::{exponent, is_zero, nan};

/// Asymptotic coefficients of one order, with the trigonometric factors
/// the I combination needs.
pub(crate) struct HankelExpansion<T: BesselFloat> {
    nu: T,
    sin: T,
    cos: T,
    coef: Table<T>,
}

/// `true` once `term` no longer changes `sum` at working precision.
#[inline]
fn negligible<T: BesselFloat>(sum: Complex<T>, term: Complex<T>) -> bool {
    is_zero(term) || exponent(sum) - exponent(term) >= T::MACH_DIGITS
}

/// `true` when an asymptotic series has started to diverge: past half the
/// budget, a term larger than its predecessor means the optimal truncation
/// point has already been passed.
#[inline]
fn diverging<T: BesselFloat>(k: usize, terms: usize, term: Complex<T>, previous: Complex<T>) -> bool {
    2 * k > terms && exponent(term) > exponent(previous)
}

impl<T: BesselFloat> HankelExpansion<T> {
    pub(crate) fn new(nu: T, trig: &TrigCache<T>) -> Self {
        let (sin, cos) = trig.sin_cos_pi(nu);
        let four_nu2 = T::from_f64(4.0) * nu * nu;
        let mut a = T::one();
        HankelExpansion {
            nu,
            sin,
            cos,
            coef: Table::new(move |k| {
                if k > 0 {
                    let odd = T::from_f64((2 * k - 1) as f64);
                    a = a * (four_nu2 - odd * odd) / T::from_f64((8 * k) as f64);
                }
                a
            }),
        }
    }

    /// Even and odd parts for J and Y; the odd part is already divided by z.
    fn jy_coef(&self, z: Complex<T>, terms: usize) -> (Complex<T>, Complex<T>) {
        let v = (z * z).inv();
        let mut w = -v;
        let mut ce = Complex::new(self.coef.get(0), T::zero());
        let mut co = Complex::new(self.coef.get(1), T::zero());
        let mut prev = (ce, co);
        for k in 1..=terms {
            let de = w * self.coef.get(2 * k);
            let do_ = w * self.coef.get(2 * k + 1);
            ce = ce + de;
            co = co + do_;
            if negligible(ce, de) && negligible(co, do_) {
                return (ce, co / z);
            }
            if diverging(k, terms, de, prev.0) && diverging(k, terms, do_, prev.1) {
                break;
            }
            prev = (de, do_);
            w = -w * v;
        }
        (nan(), nan())
    }

    /// Σ a_k (±1/z)^k; `alternate` selects the I series.
    fn ik_coef(&self, z: Complex<T>, alternate: bool, terms: usize) -> Complex<T> {
        let v = if alternate { -z.inv() } else { z.inv() };
        let mut w = v;
        let mut c = Complex::new(self.coef.get(0), T::zero());
        let mut prev = c;
        for k in 1..=terms {
            let dc = w * self.coef.get(k);
            c = c + dc;
            if negligible(c, dc) {
                return c;
            }
            if diverging(k, terms, dc, prev) {
                break;
            }
            prev = dc;
            w = w * v;
        }
        nan()
    }

    fn omega(&self, z: Complex<T>) -> Complex<T> {
        let quarter_pi = T::FRAC_PI_4();
        z - (self.nu + self.nu + T::one()) * quarter_pi
    }

    pub(crate) fn besselj(&self, z: Complex<T>, terms: usize) -> Complex<T> {
        let (ce, co) = self.jy_coef(z, terms);
        let omega = self.omega(z);
        (z.inv() * T::FRAC_2_PI()).sqrt() * (omega.cos() * ce - omega.sin() * co)
    }

    pub(crate) fn bessely(&self, z: Complex<T>, terms: usize) -> Complex<T> {
        let (ce, co) = self.jy_coef(z, terms);
        let omega = self.omega(z);
        (z.inv() * T::FRAC_2_PI()).sqrt() * (omega.sin() * ce + omega.cos() * co)
    }

    /// The recessive e^{−z} part carries the sin(πν) correction that keeps I
    /// accurate off the real axis.
    pub(crate) fn besseli(&self, z: Complex<T>, terms: usize) -> Complex<T> {
        let ci = self.ik_coef(z, true, terms);
        let ck = self.ik_coef(z, false, terms);
        let phase = Complex::new(self.sin, -self.cos);
        (z.inv() * (T::FRAC_1_PI() * T::from_f64(0.5))).sqrt()
            * (z.exp() * ci - phase * (-z).exp() * ck)
    }

    pub(crate) fn besselk(&self, z: Complex<T>, terms: usize) -> Complex<T> {
        let ck = self.ik_coef(z, false, terms);
        (z.inv() * T::FRAC_PI_2()).sqrt() * (-z).exp() * ck
    }
}
