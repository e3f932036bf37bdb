//! Y Bessel function: region dispatch.
//!
//! Y_ν(conj z) = conj Y_ν(z) for real ν
//! Y_ν(−z) = e^{−iπν}·Y_ν(z) + 2i·cos(πν)·J_ν(z) for Im z ≥ 0
//!
//! Off the real axis the Miller and series regions end at Im z ≤ 8; beyond
//! that Y is rebuilt from I and K at the swapped argument w = Im z + i·Re z:
//! Y_ν(z) = i·c·conj I_ν(w) − (2/π)·conj(c·K_ν(w)), c = e^{iπν/2}.

use num_complex::Complex;

use crate::algo::interp;
use crate::bessel::Bessel;
use crate::machine::BesselFloat;
use crate::types::{Error, Function, Kernel};
use crate::utils::{is_zero, mul_i, swap};

impl<T: BesselFloat> Bessel<T> {
    /// Bessel function of the second kind, Y_ν(z).
    ///
    /// Y has a logarithmic branch point at the origin, so z = 0 gives NaN.
    pub fn bessely(&self, nu: T, z: Complex<T>) -> Result<Complex<T>, Error> {
        self.check_order(nu)?;
        if is_zero(z) {
            return Ok(self.at_origin(Function::Y, nu));
        }
        Ok(self.observe(Function::Y, nu, z, self.eval_y(nu, z)))
    }

    pub(crate) fn route_y(&self, nu: T, z: Complex<T>) -> Kernel {
        let thresholds = self.thresholds();
        if !self.is_direct(nu) {
            Kernel::Recurrence
        } else if z.norm() >= T::from_f64(thresholds.hankel_y) {
            Kernel::Hankel
        } else if z.re <= self.series_limit(nu, z.im) - T::from_f64(thresholds.y_series_bias) {
            Kernel::PowerSeries
        } else if z.im <= T::from_f64(thresholds.miller_imag) {
            Kernel::MillerBackward
        } else {
            Kernel::Rotation
        }
    }

    pub(crate) fn eval_y(&self, nu: T, z: Complex<T>) -> Complex<T> {
        if z.im < T::zero() {
            return self.eval_y(nu, z.conj()).conj();
        }
        if z.re < T::zero() {
            let (sin, cos) = self.caches().trig.sin_cos_pi(nu);
            let w = -z;
            let two_cos = cos + cos;
            return Complex::new(cos, -sin) * self.eval_y(nu, w)
                + Complex::new(T::zero(), two_cos) * self.eval_j(nu, w);
        }
        let kernel = self.route_y(nu, z);
        log::trace!("Y: nu = {nu:?}, z = {z:?} -> {kernel:?}");
        match kernel {
            Kernel::Recurrence => self.recurrence().bessely(nu, z),
            Kernel::Hankel => self.asymptotic(nu).bessely(z, self.thresholds().series_terms),
            Kernel::PowerSeries => {
                let series = self.series();
                match interp::anchor(nu, nu.round()) {
                    Some(n) => interp::cubic(nu, n, |o| series.bessely(o, z)),
                    None => series.bessely(nu, z),
                }
            }
            Kernel::MillerBackward => {
                let miller = self.miller();
                match interp::anchor(nu, nu.ceil()) {
                    Some(n) => interp::cubic(nu, n, |o| miller.bessely(o, z)),
                    None => miller.bessely(nu, z),
                }
            }
            Kernel::Rotation | Kernel::YoshidaPade => {
                let c = self.caches().trig.cis_pi(nu * T::from_f64(0.5));
                let w = swap(z);
                let bi = self.eval_i(nu, w);
                let bk = self.eval_k(nu, w);
                mul_i(c * bi.conj()) - (c * bk).conj() * T::FRAC_2_PI()
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
    fn bessely_regions() {
        let bessel = Bessel::<f64>::new();
        // (ν, z, Y_ν(z), kernel, relative tolerance)
        let cases = [
            (0.5, (2.0, 1.0), (0.46447163413218995, 0.47621033866924767), Kernel::PowerSeries, 2e-14),
            (1.0, (60.0, 5.0), (6.939719515667577, 3.164547798307772), Kernel::Hankel, 3e-14),
            (2.0004, (1.5, 0.5), (-0.8033937579448069, 0.34262689094459486), Kernel::PowerSeries, 2e-12),
            (0.7, (12.0, 3.0), (-1.6691909703309888, -1.5426325009994764), Kernel::MillerBackward, 5e-14),
            (3.9997, (12.0, 3.0), (-1.1241159163272485, 1.646200925746021), Kernel::MillerBackward, 9e-12),
            (1.3, (15.0, 20.0), (3312579.39015714, 37677704.59724285), Kernel::Rotation, 2e-14),
            (17.3, (10.0, 2.0), (37.89836227820398, 16.664586375724422), Kernel::Recurrence, 2e-13),
            (-16.5, (3.0, 2.0), (-1.8082091826680902e-10, -1.908904444425067e-11), Kernel::Recurrence, 2e-14),
            (-17.2, (5.0, 6.0), (-9.01552465760769, -518.0659320774761), Kernel::Recurrence, 3e-14),
            (-0.6, (-3.0, 2.0), (-1.5222098913003377, 0.01770609884742606), Kernel::PowerSeries, 2e-14),
            (0.0, (0.25, 0.0), (-0.9315730249300587, 0.0), Kernel::PowerSeries, 2e-14),
        ];
        for (nu, (x, y), (re, im), kernel, tol) in cases {
            let z = Complex64::new(x, y);
            assert_eq!(bessel.kernel(Function::Y, nu, z), Ok(kernel), "nu = {nu}, z = {z}");
            check(bessel.bessely(nu, z).unwrap(), Complex64::new(re, im), tol);
        }
    }

    #[test]
    fn bessely_series_up_to_the_boundary() {
        let bessel = Bessel::<f64>::new();
        // Re z within two units of the series limit.
        let cases = [
            (0.7, (7.0, 3.0), (-2.357145272196519, 1.6771242507166557)),
            (2.0, (7.0, 1.0), (-0.11322114459091488, -0.3278250042999409)),
        ];
        for (nu, (x, y), (re, im)) in cases {
            let z = Complex64::new(x, y);
            assert_eq!(bessel.kernel(Function::Y, nu, z), Ok(Kernel::PowerSeries));
            check(bessel.bessely(nu, z).unwrap(), Complex64::new(re, im), 5e-14);
        }
    }

    #[test]
    fn bessely_near_integer_orders_are_continuous() {
        let bessel = Bessel::<f64>::new();
        let z = Complex64::new(2.0, 0.5);
        let at = bessel.bessely(1.0, z).unwrap();
        let near = bessel.bessely(1.0 + 1e-7, z).unwrap();
        let slope = bessel.bessely(1.0 + 1e-3, z).unwrap() - at;
        // Y is smooth in ν; the offset is about 1e-4 of the 1e-3 step.
        assert!((near - at).norm() < 1e-3 * slope.norm());
    }

    #[test]
    fn bessely_origin_is_nan() {
        let bessel = Bessel::<f64>::new();
        assert!(bessel.bessely(0.0, Complex64::new(0.0, 0.0)).unwrap().is_nan());
    }
}

