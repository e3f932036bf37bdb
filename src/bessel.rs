//! The evaluator: configuration plus shared coefficient caches.
//!
//! The per-function dispatch lives next to each public entry point in
//! `besj.rs`, `besy.rs`, `besi.rs`, `besk.rs` and `besh.rs`. This module
//! holds what they share: order validation, the z = 0 limits, kernel
//! constructors and the diagnostics hook.

use std::fmt;
use std::sync::Arc;

use num_complex::Complex;

use crate::algo::hankel::HankelExpansion;
use crate::algo::miller::MillerBackward;
use crate::algo::pade::YoshidaPade;
use crate::algo::recurrence::Recurrence;
use crate::algo::series::PowerSeries;
use crate::cache::Caches;
use crate::config::Thresholds;
use crate::machine::BesselFloat;
use crate::types::{Error, Function, Kernel};
use crate::utils::{is_finite, nan, nearly_integer};

/// Complex Bessel function evaluator.
///
/// Holds the region thresholds and the coefficient caches every evaluation
/// fills as a side effect. Clones share the caches; they are released when
/// the last clone is dropped. All methods take `&self` and the evaluator is
/// `Send + Sync`, so one instance can serve any number of threads.
///
/// ```
/// use multibessel::Bessel;
/// use num_complex::Complex64;
///
/// let bessel = Bessel::<f64>::new();
/// let j = bessel.besselj(0.0, Complex64::new(1.0, 1.0)).unwrap();
/// assert!((j - Complex64::new(0.9376084768060293, -0.4965299476091221)).norm() < 1e-14);
/// ```
#[derive(Clone)]
pub struct Bessel<T: BesselFloat> {
    thresholds: Thresholds,
    caches: Arc<Caches<T>>,
}

impl<T: BesselFloat> Default for Bessel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: BesselFloat> fmt::Debug for Bessel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bessel")
            .field("thresholds", &self.thresholds)
            .finish_non_exhaustive()
    }
}

impl<T: BesselFloat> Bessel<T> {
    /// Evaluator with the default thresholds and empty caches.
    pub fn new() -> Self {
        Bessel {
            thresholds: Thresholds::default(),
            caches: Arc::new(Caches::new()),
        }
    }

    /// Evaluator with custom thresholds.
    ///
    /// Returns [`Error::InvalidThresholds`] naming the first unusable field.
    pub fn with_thresholds(thresholds: Thresholds) -> Result<Self, Error> {
        thresholds.validate()?;
        Ok(Bessel {
            thresholds,
            caches: Arc::new(Caches::new()),
        })
    }

    /// The region boundaries and fits this evaluator dispatches with.
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// The kernel that answers `function` at (ν, z), after the reflections
    /// onto the first quadrant.
    ///
    /// Evaluating the function may call further kernels for the reference
    /// values a rotation or recurrence needs; only the outermost choice is
    /// reported.
    pub fn kernel(&self, function: Function, nu: T, z: Complex<T>) -> Result<Kernel, Error> {
        self.check_order(nu)?;
        let z = Complex::new(z.re.abs(), z.im.abs());
        Ok(match function {
            Function::J => self.route_j(nu, z),
            Function::Y => self.route_y(nu, z),
            Function::I => self.route_i(nu, z),
            Function::K => self.route_k(nu.abs(), z),
        })
    }

    pub(crate) fn caches(&self) -> &Caches<T> {
        &self.caches
    }

    pub(crate) fn check_order(&self, nu: T) -> Result<(), Error> {
        let max = T::from_f64(self.thresholds.max_order);
        if nu.is_finite() && nu.abs() <= max {
            Ok(())
        } else {
            Err(Error::OrderOutOfRange)
        }
    }

    /// J and I at z = 0: 1 for ν = 0, 0 where the function vanishes there.
    /// Every other order, and every Y and K, has no finite value at the
    /// origin and gives NaN.
    pub(crate) fn at_origin(&self, function: Function, nu: T) -> Complex<T> {
        let regular = match function {
            Function::J | Function::I => nu > T::zero() || nearly_integer(nu).is_some(),
            Function::Y | Function::K => false,
        };
        match (regular, nu == T::zero()) {
            (true, true) => Complex::new(T::one(), T::zero()),
            (true, false) => Complex::new(T::zero(), T::zero()),
            (false, _) => nan(),
        }
    }

    /// Logs a non-finite result of a finite input.
    pub(crate) fn observe<L: fmt::Display>(&self, label: L, nu: T, z: Complex<T>, value: Complex<T>) -> Complex<T> {
        if !is_finite(value) && is_finite(z) {
            log::warn!("{label}: no finite value for nu = {nu:?}, z = {z:?} (got {value:?})");
        }
        value
    }

    pub(crate) fn is_direct(&self, nu: T) -> bool {
        nu.abs() < T::from_f64(f64::from(self.thresholds.direct_order))
    }

    /// Upper edge of the power-series region for the other component `x`.
    pub(crate) fn series_limit(&self, nu: T, x: T) -> T {
        self.thresholds.series.limit(nu, x)
    }

    pub(crate) fn series(&self) -> PowerSeries<'_, T> {
        PowerSeries::new(&self.caches, self.thresholds.series_terms)
    }

    pub(crate) fn miller(&self) -> MillerBackward<'_, T> {
        MillerBackward::new(&self.caches, self.thresholds.miller, self.thresholds.miller_floor())
    }

    pub(crate) fn asymptotic(&self, nu: T) -> Arc<HankelExpansion<T>> {
        self.caches.hankel(nu)
    }

    pub(crate) fn pade(&self) -> YoshidaPade<'_, T> {
        YoshidaPade::new(&self.caches)
    }

    pub(crate) fn recurrence(&self) -> Recurrence<'_, T> {
        Recurrence::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn evaluator_is_send_and_sync() {
        fn assert_send_sync<S: Send + Sync>() {}
        assert_send_sync::<Bessel<f64>>();
    }

    #[test]
    fn order_range() {
        let bessel = Bessel::<f64>::new();
        assert_eq!(bessel.check_order(256.0), Ok(()));
        assert_eq!(bessel.check_order(-256.0), Ok(()));
        assert_eq!(bessel.check_order(256.5), Err(Error::OrderOutOfRange));
        assert_eq!(bessel.check_order(f64::NAN), Err(Error::OrderOutOfRange));
        assert_eq!(bessel.check_order(f64::INFINITY), Err(Error::OrderOutOfRange));
    }

    #[test]
    fn thresholds_are_kept_as_given() {
        let thresholds = Thresholds {
            k_series_radius: 3.5,
            ..Thresholds::default()
        };
        let bessel = Bessel::<f64>::with_thresholds(thresholds.clone()).unwrap();
        assert_eq!(bessel.thresholds(), &thresholds);
    }

    #[test]
    fn invalid_thresholds_are_rejected() {
        let thresholds = Thresholds {
            hankel_k: -1.0,
            ..Thresholds::default()
        };
        assert_eq!(
            Bessel::<f64>::with_thresholds(thresholds).unwrap_err(),
            Error::InvalidThresholds("hankel_k")
        );
    }

    #[test]
    fn origin_limits() {
        let bessel = Bessel::<f64>::new();
        assert_eq!(bessel.at_origin(Function::J, 0.0), Complex64::new(1.0, 0.0));
        assert_eq!(bessel.at_origin(Function::I, 2.5), Complex64::new(0.0, 0.0));
        assert_eq!(bessel.at_origin(Function::J, -3.0), Complex64::new(0.0, 0.0));
        assert!(bessel.at_origin(Function::J, -0.5).is_nan());
        assert!(bessel.at_origin(Function::Y, 1.0).is_nan());
        assert!(bessel.at_origin(Function::K, 0.0).is_nan());
    }

    #[test]
    fn clones_share_caches() {
        let a = Bessel::<f64>::new();
        let b = a.clone();
        a.besselj(0.3, Complex64::new(50.0, 1.0)).unwrap();
        assert!(Arc::ptr_eq(&a.caches, &b.caches));
        assert_eq!(b.caches().hankel.len(), 1);
    }
}
