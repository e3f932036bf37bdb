//! J Bessel function: region dispatch.
//!
//! J_ν(conj z) = conj J_ν(z) for real ν
//! J_ν(−z) = e^{iπν}·J_ν(z) for Im z ≥ 0
//! J_ν(z) = e^{iπν/2}·conj I_ν(x + iy) for z = y + ix in the first quadrant
//! J_{−ν}(z) = cos(πν)·J_ν(z) − sin(πν)·Y_ν(z) for non-integer ν

use num_complex::Complex;

use crate::bessel::Bessel;
use crate::machine::BesselFloat;
use crate::types::{Error, Function, Kernel};
use crate::utils::{is_zero, nearly_integer, swap};

impl<T: BesselFloat> Bessel<T> {
    /// Bessel function of the first kind, J_ν(z).
    ///
    /// Returns [`Error::OrderOutOfRange`] for non-finite ν or |ν| above
    /// [`Thresholds::max_order`](crate::Thresholds::max_order). A NaN value
    /// means the selected kernel did not converge.
    pub fn besselj(&self, nu: T, z: Complex<T>) -> Result<Complex<T>, Error> {
        self.check_order(nu)?;
        if is_zero(z) {
            return Ok(self.at_origin(Function::J, nu));
        }
        Ok(self.observe(Function::J, nu, z, self.eval_j(nu, z)))
    }

    /// Kernel for J at `z` in the closed first quadrant.
    pub(crate) fn route_j(&self, nu: T, z: Complex<T>) -> Kernel {
        let thresholds = self.thresholds();
        if !self.is_direct(nu) {
            Kernel::Recurrence
        } else if z.norm() >= T::from_f64(thresholds.hankel_j) {
            Kernel::Hankel
        } else if z.re <= self.series_limit(nu, z.im) {
            Kernel::PowerSeries
        } else if z.im <= T::from_f64(thresholds.miller_imag) {
            Kernel::MillerBackward
        } else {
            Kernel::Rotation
        }
    }

    pub(crate) fn eval_j(&self, nu: T, z: Complex<T>) -> Complex<T> {
        if nu < T::zero() && self.is_direct(nu) && nearly_integer(nu).is_none() {
            // J_{−a} = cos(πa)·J_a − sin(πa)·Y_a; the direct −ν series
            // cancels near the poles of Γ(k − a + 1).
            let a = -nu;
            let (sin, cos) = self.caches().trig.sin_cos_pi(a);
            return self.eval_j(a, z) * cos - self.eval_y(a, z) * sin;
        }
        if z.im < T::zero() {
            return self.eval_j(nu, z.conj()).conj();
        }
        if z.re < T::zero() {
            return self.caches().trig.cis_pi(nu) * self.eval_j(nu, -z);
        }
        let kernel = self.route_j(nu, z);
        log::trace!("J: nu = {nu:?}, z = {z:?} -> {kernel:?}");
        match kernel {
            Kernel::Recurrence => self.recurrence().besselj(nu, z),
            Kernel::Hankel => self.asymptotic(nu).besselj(z, self.thresholds().series_terms),
            Kernel::PowerSeries => self.series().besselj(nu, z),
            Kernel::MillerBackward => self.miller().besselj(nu, z),
            Kernel::Rotation | Kernel::YoshidaPade => {
                let c = self.caches().trig.cis_pi(nu * T::from_f64(0.5));
                c * self.eval_i(nu, swap(z)).conj()
            }
        }
    }
}
