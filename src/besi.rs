//! I Bessel function: region dispatch.
//!
//! I_ν(conj z) = conj I_ν(z) for real ν
//! I_ν(−z) = e^{iπν}·I_ν(z) for Im z ≥ 0
//! I_{−ν}(z) = I_ν(z) + (2/π)·sin(πν)·K_ν(z) for non-integer ν
//!
//! In the first quadrant I needs no rotation: the series covers small
//! Im z relative to Re z, and Miller's algorithm the rest.

use num_complex::Complex;

use crate::bessel::Bessel;
use crate::machine::BesselFloat;
use crate::types::{Error, Function, Kernel};
use crate::utils::{is_zero, nearly_integer};

impl<T: BesselFloat> Bessel<T> {
    /// Modified Bessel function of the first kind, I_ν(z).
    pub fn besseli(&self, nu: T, z: Complex<T>) -> Result<Complex<T>, Error> {
        self.check_order(nu)?;
        if is_zero(z) {
            return Ok(self.at_origin(Function::I, nu));
        }
        Ok(self.observe(Function::I, nu, z, self.eval_i(nu, z)))
    }

    pub(crate) fn route_i(&self, nu: T, z: Complex<T>) -> Kernel {
        if !self.is_direct(nu) {
            Kernel::Recurrence
        } else if z.norm() >= T::from_f64(self.thresholds().hankel_i) {
            Kernel::Hankel
        } else if z.im <= self.series_limit(nu, z.re) {
            Kernel::PowerSeries
        } else {
            Kernel::MillerBackward
        }
    }

    pub(crate) fn eval_i(&self, nu: T, z: Complex<T>) -> Complex<T> {
        if nu < T::zero() && self.is_direct(nu) && nearly_integer(nu).is_none() {
            // I_{−a} = I_a + (2/π)·sin(πa)·K_a
            let a = -nu;
            let sin = self.caches().trig.sinpi(a);
            return self.eval_i(a, z) + self.eval_k(a, z) * (T::FRAC_2_PI() * sin);
        }
        if z.im < T::zero() {
            return self.eval_i(nu, z.conj()).conj();
        }
        if z.re < T::zero() {
            return self.caches().trig.cis_pi(nu) * self.eval_i(nu, -z);
        }
        let kernel = self.route_i(nu, z);
        log::trace!("I: nu = {nu:?}, z = {z:?} -> {kernel:?}");
        match kernel {
            Kernel::Recurrence => self.recurrence().besseli(nu, z),
            Kernel::Hankel => self.asymptotic(nu).besseli(z, self.thresholds().series_terms),
            Kernel::PowerSeries => self.series().besseli(nu, z),
            _ => self.miller().besseli(nu, z),
        }
    }
}
