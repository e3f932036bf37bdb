//! Complex Bessel functions of arbitrary real order.
//!
//! J, Y, I, K and the Hankel functions H^(1), H^(2) for complex z and real ν
//! with |ν| ≤ 256, computed by choosing, per function and per region of the
//! (ν, z) plane, among five kernels:
//!
//! - the ascending power series (small |z| relative to ν),
//! - Miller's backward recurrence with fitted start indices (moderate |z|
//!   near the real axis),
//! - Hankel's asymptotic expansion (large |z|),
//! - Yoshida's rational approximation (K in the mid annulus),
//! - a continued fraction plus three-term recurrence (|ν| ≥ 16).
//!
//! Negative Re z and Im z are reduced to the first quadrant by reflection,
//! and the remaining region next to the imaginary axis is mapped onto the
//! modified (or ordinary) functions by a 45° rotation. Region boundaries are
//! named fields of [`Thresholds`].
//!
//! Every evaluation goes through a [`Bessel`] evaluator, which owns the
//! coefficient caches the kernels grow on demand. The free functions use one
//! process-wide evaluator per scalar type.
//!
//! ```
//! use multibessel::{besselk, hankel1};
//! use num_complex::Complex64;
//!
//! let z = Complex64::new(2.0, 0.0);
//! let k = besselk(0.5, z).unwrap();
//! let expected = (core::f64::consts::FRAC_PI_2 / 2.0).sqrt() * (-2.0_f64).exp();
//! assert!((k.re - expected).abs() < 1e-14 * expected);
//!
//! // H^(1)_{1/2}(x) = −i·√(2/(πx))·e^{ix}
//! let h = hankel1(0.5, z).unwrap();
//! let closed = Complex64::new(0.0, -(1.0 / core::f64::consts::PI).sqrt()) * Complex64::new(0.0, 2.0).exp();
//! assert!((h - closed).norm() < 1e-14);
//! ```
//!
//! Non-convergence is reported as a NaN value (and a `log` warning); only an
//! unsupported order is an [`Error`].

mod algo;
mod besh;
mod besi;
mod besj;
mod besk;
mod besy;
mod bessel;
mod cache;
pub mod config;
pub mod machine;
pub mod types;
mod utils;

pub use bessel::Bessel;
pub use config::{MillerFit, PowerSeriesBoundary, Thresholds};
pub use machine::BesselFloat;
pub use types::{Error, Function, HankelKind, Kernel};

use num_complex::Complex;

/// Bessel function of the first kind, J_ν(z).
pub fn besselj<T: BesselFloat>(nu: T, z: Complex<T>) -> Result<Complex<T>, Error> {
    T::shared().besselj(nu, z)
}

/// Bessel function of the second kind, Y_ν(z).
pub fn bessely<T: BesselFloat>(nu: T, z: Complex<T>) -> Result<Complex<T>, Error> {
    T::shared().bessely(nu, z)
}

/// Modified Bessel function of the first kind, I_ν(z).
pub fn besseli<T: BesselFloat>(nu: T, z: Complex<T>) -> Result<Complex<T>, Error> {
    T::shared().besseli(nu, z)
}

/// Modified Bessel function of the second kind, K_ν(z).
pub fn besselk<T: BesselFloat>(nu: T, z: Complex<T>) -> Result<Complex<T>, Error> {
    T::shared().besselk(nu, z)
}

/// Hankel function, H_ν^(m)(z).
pub fn hankel<T: BesselFloat>(kind: HankelKind, nu: T, z: Complex<T>) -> Result<Complex<T>, Error> {
    T::shared().hankel(kind, nu, z)
}

/// Hankel function of the first kind, H_ν^(1)(z).
pub fn hankel1<T: BesselFloat>(nu: T, z: Complex<T>) -> Result<Complex<T>, Error> {
    T::shared().hankel1(nu, z)
}

/// Hankel function of the second kind, H_ν^(2)(z).
pub fn hankel2<T: BesselFloat>(nu: T, z: Complex<T>) -> Result<Complex<T>, Error> {
    T::shared().hankel2(nu, z)
}

#[cfg(test)]
pub(crate) mod testing {
    use num_complex::Complex64;

    /// Asserts `|got − expected| ≤ tol·|expected|`.
    #[track_caller]
    pub(crate) fn check(got: Complex64, expected: Complex64, tol: f64) {
        let err = (got - expected).norm() / expected.norm();
        assert!(
            err <= tol,
            "got {got}, expected {expected}, rel err {err:.3e} > {tol:.0e}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::check;
    use num_complex::Complex64;

    // Points spread over every kernel, including reflected arguments.
    const POINTS: [(f64, (f64, f64)); 7] = [
        (0.3, (1.0, 1.0)),
        (1.7, (20.0, 2.0)),
        (2.5, (15.0, 20.0)),
        (0.0, (50.0, 10.0)),
        (17.2, (8.0, 3.0)),
        (-0.4, (-6.0, 2.0)),
        (5.5, (3.0, 30.0)),
    ];

    #[test]
    fn wronskian_j_y() {
        // J_{ν+1}Y_ν − J_νY_{ν+1} = 2/(πz)
        let bessel = Bessel::<f64>::new();
        for (nu, (x, y)) in POINTS {
            let z = Complex64::new(x, y);
            let a = bessel.besselj(nu + 1.0, z).unwrap() * bessel.bessely(nu, z).unwrap();
            let b = bessel.besselj(nu, z).unwrap() * bessel.bessely(nu + 1.0, z).unwrap();
            let expected = (z * core::f64::consts::PI).inv() * 2.0;
            let residual = (a - b - expected).norm() / (a.norm() + b.norm());
            assert!(residual < 5e-14, "nu = {nu}, z = {z}: {residual:.3e}");
        }
    }

    #[test]
    fn wronskian_i_k() {
        // I_νK_{ν+1} + I_{ν+1}K_ν = 1/z
        let bessel = Bessel::<f64>::new();
        for (nu, (x, y)) in POINTS {
            let z = Complex64::new(x, y);
            let a = bessel.besseli(nu, z).unwrap() * bessel.besselk(nu + 1.0, z).unwrap();
            let b = bessel.besseli(nu + 1.0, z).unwrap() * bessel.besselk(nu, z).unwrap();
            let residual = (a + b - z.inv()).norm() / (a.norm() + b.norm());
            assert!(residual < 5e-14, "nu = {nu}, z = {z}: {residual:.3e}");
        }
    }

    #[test]
    fn three_term_recurrence() {
        // J_{ν−1} + J_{ν+1} = (2ν/z)·J_ν
        let bessel = Bessel::<f64>::new();
        for (nu, (x, y)) in [
            (0.6, (3.0, 2.0)),
            (4.3, (20.0, 1.0)),
            (7.5, (10.0, 12.0)),
            (18.25, (6.0, 6.0)),
            (1.2, (60.0, 5.0)),
        ] {
            let z = Complex64::new(x, y);
            let lower = bessel.besselj(nu - 1.0, z).unwrap();
            let upper = bessel.besselj(nu + 1.0, z).unwrap();
            let middle = bessel.besselj(nu, z).unwrap() * (2.0 * nu) / z;
            let scale = (lower + upper).norm().max(upper.norm());
            assert!(
                (lower + upper - middle).norm() < 5e-14 * scale,
                "nu = {nu}, z = {z}"
            );
        }
    }

    #[test]
    fn kernels_agree_across_boundaries() {
        let default = Bessel::<f64>::new();

        let hankel_earlier = Bessel::<f64>::with_thresholds(Thresholds {
            hankel_k: 30.0,
            ..Thresholds::default()
        })
        .unwrap();
        let z = Complex64::new(35.0, 5.0);
        assert_eq!(default.kernel(Function::K, 0.7, z), Ok(Kernel::YoshidaPade));
        assert_eq!(hankel_earlier.kernel(Function::K, 0.7, z), Ok(Kernel::Hankel));
        check(
            default.besselk(0.7, z).unwrap(),
            hankel_earlier.besselk(0.7, z).unwrap(),
            1e-14,
        );

        let direct_up_to_20 = Bessel::<f64>::with_thresholds(Thresholds {
            direct_order: 20,
            ..Thresholds::default()
        })
        .unwrap();
        let z = Complex64::new(6.0, 2.0);
        assert_eq!(default.kernel(Function::J, 17.5, z), Ok(Kernel::Recurrence));
        assert_ne!(direct_up_to_20.kernel(Function::J, 17.5, z), Ok(Kernel::Recurrence));
        check(
            direct_up_to_20.besselj(17.5, z).unwrap(),
            default.besselj(17.5, z).unwrap(),
            1e-14,
        );
        let z = Complex64::new(3.0, 1.0);
        check(
            direct_up_to_20.besseli(18.3, z).unwrap(),
            default.besseli(18.3, z).unwrap(),
            1e-14,
        );
    }

    #[test]
    fn hankel_functions() {
        let bessel = Bessel::<f64>::new();
        // H^(1)_{1/2}(x) = −i·√(2/(πx))·e^{ix}
        for x in [0.5, 2.0, 9.0, 70.0] {
            let z = Complex64::new(x, 0.0);
            let amplitude = (2.0 / (core::f64::consts::PI * x)).sqrt();
            let closed = Complex64::new(0.0, -amplitude) * Complex64::new(0.0, x).exp();
            check(bessel.hankel1(0.5, z).unwrap(), closed, 3e-14);
            check(bessel.hankel2(0.5, z).unwrap(), closed.conj(), 3e-14);
        }
        let z = Complex64::new(3.0, 0.0);
        assert_eq!(
            bessel.hankel(HankelKind::First, 1.3, z),
            bessel.hankel1(1.3, z)
        );
        assert!(bessel.hankel2(0.0, Complex64::new(0.0, 0.0)).unwrap().is_nan());
        assert_eq!(bessel.hankel1(1e3, z), Err(Error::OrderOutOfRange));
    }

    #[test]
    fn concurrent_evaluation_matches_serial() {
        let serial = Bessel::<f64>::new();
        let inputs: Vec<(f64, Complex64)> = (0..40)
            .map(|k| {
                let t = f64::from(k);
                (0.37 * t - 5.0, Complex64::new(1.5 * t - 20.0, 0.8 * t - 10.0))
            })
            .collect();
        let expected: Vec<Complex64> = inputs
            .iter()
            .map(|&(nu, z)| serial.besselk(nu, z).unwrap() + serial.besselj(nu, z).unwrap())
            .collect();

        let shared = Bessel::<f64>::new();
        std::thread::scope(|s| {
            for offset in 0..8 {
                let shared = &shared;
                let inputs = &inputs;
                let expected = &expected;
                s.spawn(move || {
                    for i in (0..inputs.len()).map(|i| (i + 5 * offset) % inputs.len()) {
                        let (nu, z) = inputs[i];
                        let got = shared.besselk(nu, z).unwrap() + shared.besselj(nu, z).unwrap();
                        assert_eq!(got.re.to_bits(), expected[i].re.to_bits());
                        assert_eq!(got.im.to_bits(), expected[i].im.to_bits());
                    }
                });
            }
        });
    }

    #[test]
    fn free_functions_use_shared_evaluator() {
        let z = Complex64::new(1.0, 1.0);
        assert_eq!(besselj(0.0, z), f64::shared().besselj(0.0, z));
        assert_eq!(bessely(1.5, z), Bessel::new().bessely(1.5, z));
        assert_eq!(besseli(2.0, z), Bessel::new().besseli(2.0, z));
        assert_eq!(hankel(HankelKind::Second, 0.5, z), hankel2(0.5, z));
        assert_eq!(besselk(300.0, z), Err(Error::OrderOutOfRange));
    }
}
