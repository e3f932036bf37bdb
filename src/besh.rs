//! Hankel functions.
//!
//! H^(1)_ν(z) = J_ν(z) + i·Y_ν(z)
//! H^(2)_ν(z) = J_ν(z) − i·Y_ν(z)
//!
//! Both parts go through their own dispatch, so H inherits the accuracy of
//! J and Y in every region. For real ν and real z > 0, H^(2) = conj H^(1).

use num_complex::Complex;

use crate::bessel::Bessel;
use crate::machine::BesselFloat;
use crate::types::{Error, HankelKind};
use crate::utils::{is_zero, mul_i, nan};

impl<T: BesselFloat> Bessel<T> {
    /// Hankel function of the given kind, H^(kind)_ν(z).
    pub fn hankel(&self, kind: HankelKind, nu: T, z: Complex<T>) -> Result<Complex<T>, Error> {
        self.check_order(nu)?;
        let label = match kind {
            HankelKind::First => "H1",
            HankelKind::Second => "H2",
        };
        if is_zero(z) {
            return Ok(nan());
        }
        let j = self.eval_j(nu, z);
        let iy = mul_i(self.eval_y(nu, z));
        let h = match kind {
            HankelKind::First => j + iy,
            HankelKind::Second => j - iy,
        };
        Ok(self.observe(label, nu, z, h))
    }

    /// Hankel function of the first kind, H^(1)_ν(z).
    pub fn hankel1(&self, nu: T, z: Complex<T>) -> Result<Complex<T>, Error> {
        self.hankel(HankelKind::First, nu, z)
    }

    /// Hankel function of the second kind, H^(2)_ν(z).
    pub fn hankel2(&self, nu: T, z: Complex<T>) -> Result<Complex<T>, Error> {
        self.hankel(HankelKind::Second, nu, z)
    }
}
