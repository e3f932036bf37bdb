//! K Bessel function: region dispatch.
//!
//! K_{−ν} = K_ν, so only |ν| is dispatched.
//! K_ν(conj z) = conj K_ν(z)
//! K_ν(−z) = e^{−iπν}·K_ν(z) − iπ·I_ν(z) for Im z ≥ 0
//!
//! Between the series disc |z| ≤ 4 and the Hankel region, Yoshida's
//! rational approximation covers Re z ≥ min(2, Im z/2). The wedge left
//! next to the imaginary axis goes through I at z and Y at the swapped
//! argument: K_ν(z) = (π/2)·c·(−i·c·I_ν(z) − conj Y_ν(Im z + i·Re z)),
//! c = e^{−iπν/2}.

use num_complex::Complex;

use crate::bessel::Bessel;
use crate::machine::BesselFloat;
use crate::types::{Error, Function, Kernel};
use crate::utils::{is_zero, mul_neg_i, swap};

impl<T: BesselFloat> Bessel<T> {
    /// Modified Bessel function of the second kind, K_ν(z).
    ///
    /// K is singular at the origin, so z = 0 gives NaN.
    pub fn besselk(&self, nu: T, z: Complex<T>) -> Result<Complex<T>, Error> {
        self.check_order(nu)?;
        if is_zero(z) {
            return Ok(self.at_origin(Function::K, nu));
        }
        Ok(self.observe(Function::K, nu, z, self.eval_k(nu, z)))
    }

    /// Kernel for K with `nu >= 0`.
    pub(crate) fn route_k(&self, nu: T, z: Complex<T>) -> Kernel {
        let thresholds = self.thresholds();
        let r = z.norm();
        let half = T::from_f64(0.5);
        if !self.is_direct(nu) {
            Kernel::Recurrence
        } else if r >= T::from_f64(thresholds.hankel_k) {
            Kernel::Hankel
        } else if r <= T::from_f64(thresholds.k_series_radius) {
            Kernel::PowerSeries
        } else if z.re >= T::from_f64(thresholds.k_pade_real_cap).min(z.im * half) {
            Kernel::YoshidaPade
        } else {
            Kernel::Rotation
        }
    }

    pub(crate) fn eval_k(&self, nu: T, z: Complex<T>) -> Complex<T> {
        let nu = nu.abs();
        if z.im < T::zero() {
            return self.eval_k(nu, z.conj()).conj();
        }
        if z.re < T::zero() {
            let (sin, cos) = self.caches().trig.sin_cos_pi(nu);
            let w = -z;
            return Complex::new(cos, -sin) * self.eval_k(nu, w)
                - Complex::new(T::zero(), T::PI()) * self.eval_i(nu, w);
        }
        let kernel = self.route_k(nu, z);
        log::trace!("K: nu = {nu:?}, z = {z:?} -> {kernel:?}");
        match kernel {
            Kernel::Recurrence => self.recurrence().besselk(nu, z),
            Kernel::Hankel => self.asymptotic(nu).besselk(z, self.thresholds().series_terms),
            Kernel::PowerSeries => self.series().besselk(nu, z),
            Kernel::YoshidaPade => self.pade().besselk(nu, z),
            Kernel::Rotation | Kernel::MillerBackward => {
                let c = self.caches().trig.cis_pi(nu * T::from_f64(0.5)).conj();
                let bi = self.eval_i(nu, z);
                let by = self.eval_y(nu, swap(z));
                c * (mul_neg_i(c * bi) - by.conj()) * T::FRAC_PI_2()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::check;
    use crate::{Bessel, Function, Kernel};
    use num_complex::Complex64;

    #[test]
    fn besselk_regions() {
        let bessel = Bessel::<f64>::new();
        // (ν, z, K_ν(z), kernel, relative tolerance)
        let cases = [
            (0.3, (10.0, 5.0), (8.351190878825504e-06, 1.470596371089893e-05), Kernel::YoshidaPade, 2e-14),
            (1.6, (6.0, 20.0), (-0.00018547455982663945, -0.0006661604061721945), Kernel::YoshidaPade, 2e-14),
            (0.0, (1.0, 2.0), (-0.242345104491872, -0.17626718909269973), Kernel::PowerSeries, 2e-14),
            (1.0003, (2.0, 1.0), (0.03629004753663086, -0.12407832230993174), Kernel::PowerSeries, 2e-14),
            (0.8, (1.0, 10.0), (-0.03480788047982158, 0.14163980808037793), Kernel::Rotation, 2e-13),
            (3.5, (45.0, 10.0), (-4.535719827249578e-21, 3.9157859382545584e-21), Kernel::Hankel, 2e-14),
            (30.25, (6.0, 1.0), (7010435292577493.0, 1.730724963064843e+16), Kernel::Recurrence, 6e-14),
            (0.5, (-3.0, 1.0), (-10.53296246426264, -9.457888222129426), Kernel::PowerSeries, 2e-14),
            (-2.2, (5.0, 1.0), (0.00217457628496358, -0.005155474935320395), Kernel::YoshidaPade, 2e-14),
        ];
        for (nu, (x, y), (re, im), kernel, tol) in cases {
            let z = Complex64::new(x, y);
            assert_eq!(bessel.kernel(Function::K, nu, z), Ok(kernel), "nu = {nu}, z = {z}");
            check(bessel.besselk(nu, z).unwrap(), Complex64::new(re, im), tol);
        }
    }

    #[test]
    fn besselk_close_to_integer_order() {
        let bessel = Bessel::<f64>::new();
        // (ν, z, K_ν(z), relative tolerance)
        let cases = [
            (-0.001, (3.22949, -1.37335), (0.00019676137129667472, 0.02570167618088863), 2e-13),
            (0.999, (3.99, 0.0), (0.012624322878104836, 0.0), 1e-12),
            (2.75, (0.5, 0.5), (-8.577359130552491, -11.056391661863822), 2e-14),
            (15.1, (1.0, 2.0), (-5241046395.435003, 9835353505.707846), 2e-14),
            (3.0001, (0.001, 0.002), (-704529639.8464669, 128177244.16715243), 2e-14),
        ];
        for (nu, (x, y), (re, im), tol) in cases {
            let z = Complex64::new(x, y);
            assert_eq!(bessel.kernel(Function::K, nu, z), Ok(Kernel::PowerSeries), "nu = {nu}, z = {z}");
            check(bessel.besselk(nu, z).unwrap(), Complex64::new(re, im), tol);
        }
    }

    #[test]
    fn besselk_even_in_order() {
        let bessel = Bessel::<f64>::new();
        let z = Complex64::new(3.0, 9.0);
        assert_eq!(bessel.besselk(-1.7, z), bessel.besselk(1.7, z));
        assert_eq!(bessel.kernel(Function::K, -1.7, z), Ok(Kernel::YoshidaPade));
    }

    #[test]
    fn besselk_half_integer_closed_form() {
        // K_{1/2}(z) = √(π/(2z))·e^{−z}
        let bessel = Bessel::<f64>::new();
        for z in [
            Complex64::new(0.5, 0.5),
            Complex64::new(7.0, 3.0),
            Complex64::new(1.0, 12.0),
            Complex64::new(-2.0, 5.0),
        ] {
            let expected = (z.inv() * core::f64::consts::FRAC_PI_2).sqrt() * (-z).exp();
            check(bessel.besselk(0.5, z).unwrap(), expected, 1e-13);
        }
    }

    #[test]
    fn besselk_origin_is_nan() {
        let bessel = Bessel::<f64>::new();
        assert!(bessel.besselk(1.0, Complex64::new(0.0, 0.0)).unwrap().is_nan());
    }
}
