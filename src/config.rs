//! Region boundaries and iteration budgets of the dispatcher.
//!
//! All values are empirical: they were fitted offline by comparing every
//! kernel against 40-digit reference values on grids of ν ∈ [-16, 16] and
//! |z| ≤ 64, and choosing the boundary where the next kernel becomes the more
//! accurate one. They are tuned for `f64`; a wider backend needs its own fit.
//! Moving a boundary does not change correctness, only which kernel answers
//! (and hence the attainable accuracy) near it.

use crate::machine::BesselFloat;
use crate::types::Error;

/// Boundary of the power-series region:
/// `Re z <= constant + per_order·|ν| + x·(slope − slope_per_order·|ν|)`,
/// where `x` is the other component of the reduced argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerSeriesBoundary {
    pub constant: f64,
    pub per_order: f64,
    pub slope: f64,
    pub slope_per_order: f64,
}

impl PowerSeriesBoundary {
    /// Largest real part still routed to the power series.
    pub fn limit<T: BesselFloat>(&self, nu: T, x: T) -> T {
        let a = nu.abs();
        T::from_f64(self.constant)
            + a * T::from_f64(self.per_order)
            + x * (T::from_f64(self.slope) - a * T::from_f64(self.slope_per_order))
    }
}

/// Fitted Miller iteration counts.
///
/// The recurrence is started at a fixed, even index chosen from `z` alone;
/// the kernel never tests for convergence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MillerFit {
    /// J and Y: `m = jy_constant + jy_real·Re z`.
    pub jy_constant: f64,
    pub jy_real: f64,
    /// I: `m = i_constant + i_real·Re z + i_imag·Im z + i_cross·Re z·Im z`.
    pub i_constant: f64,
    pub i_real: f64,
    pub i_imag: f64,
    pub i_cross: f64,
}

impl MillerFit {
    pub(crate) fn jy_iterations<T: BesselFloat>(&self, re: T, floor: usize) -> usize {
        let re = re.to_f64().unwrap_or(0.0);
        even_iterations(self.jy_constant + self.jy_real * re, floor)
    }

    pub(crate) fn i_iterations<T: BesselFloat>(&self, re: T, im: T, floor: usize) -> usize {
        let re = re.to_f64().unwrap_or(0.0);
        let im = im.to_f64().unwrap_or(0.0);
        let m = self.i_constant + self.i_real * re + self.i_imag * im + self.i_cross * re * im;
        even_iterations(m, floor)
    }
}

fn even_iterations(m: f64, floor: usize) -> usize {
    // NaN casts to 0 and is then lifted by the floor.
    let m = (m.ceil() as usize).max(floor);
    m + (m & 1)
}

/// Named, overridable thresholds of the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    /// Largest supported |ν|.
    pub max_order: f64,
    /// Orders with |ν| at or above this go through the recurrence kernel,
    /// which anchors at the orders just below it.
    pub direct_order: u32,
    /// |z| from which J uses the Hankel expansion.
    pub hankel_j: f64,
    /// |z| from which Y uses the Hankel expansion.
    pub hankel_y: f64,
    /// |z| from which I uses the Hankel expansion.
    pub hankel_i: f64,
    /// |z| from which K uses the Hankel expansion.
    pub hankel_k: f64,
    /// Largest Im z handled by Miller's algorithm for J and Y.
    pub miller_imag: f64,
    /// |z| up to which K uses the power series.
    pub k_series_radius: f64,
    /// K uses the Padé kernel when `Re z >= min(k_pade_real_cap, Im z / 2)`.
    pub k_pade_real_cap: f64,
    /// Power-series region boundary.
    pub series: PowerSeriesBoundary,
    /// Amount by which the Y series region is shrunk relative to J.
    ///
    /// Zero by default: in the two units inside the boundary the series
    /// keeps Y within 3e-13 in f64, against 3e-12 for Miller's algorithm.
    pub y_series_bias: f64,
    /// Miller iteration count fits.
    pub miller: MillerFit,
    /// Term budget of the power series and the Hankel expansion.
    pub series_terms: usize,
    /// Iteration budget of the continued fraction in the recurrence kernel.
    pub fraction_terms: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            max_order: 256.0,
            direct_order: 16,
            hankel_j: 46.5,
            hankel_y: 46.5,
            hankel_i: 46.25,
            hankel_k: 44.5,
            miller_imag: 8.0,
            k_series_radius: 4.0,
            k_pade_real_cap: 2.0,
            series: PowerSeriesBoundary {
                constant: 6.0,
                per_order: 0.459,
                slope: 0.420,
                slope_per_order: 0.0144,
            },
            y_series_bias: 0.0,
            miller: MillerFit {
                jy_constant: 38.029,
                jy_real: 1.6342,
                i_constant: 33.612,
                i_real: 1.3557,
                i_imag: 1.8485,
                i_cross: -0.043649,
            },
            series_terms: 256,
            fraction_terms: 1024,
        }
    }
}

impl Thresholds {
    /// Checks that every threshold is usable.
    pub fn validate(&self) -> Result<(), Error> {
        fn positive(v: f64, field: &'static str) -> Result<(), Error> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidThresholds(field))
            }
        }

        positive(self.max_order, "max_order")?;
        positive(self.hankel_j, "hankel_j")?;
        positive(self.hankel_y, "hankel_y")?;
        positive(self.hankel_i, "hankel_i")?;
        positive(self.hankel_k, "hankel_k")?;
        positive(self.k_series_radius, "k_series_radius")?;
        positive(self.k_pade_real_cap, "k_pade_real_cap")?;
        if !(self.miller_imag.is_finite() && self.miller_imag >= 0.0) {
            return Err(Error::InvalidThresholds("miller_imag"));
        }
        if self.direct_order < 2 || f64::from(self.direct_order) > self.max_order.max(2.0) {
            return Err(Error::InvalidThresholds("direct_order"));
        }
        let series = &self.series;
        if ![
            series.constant,
            series.per_order,
            series.slope,
            series.slope_per_order,
            self.y_series_bias,
        ]
        .iter()
        .all(|v| v.is_finite())
        {
            return Err(Error::InvalidThresholds("series"));
        }
        let miller = &self.miller;
        if ![
            miller.jy_constant,
            miller.jy_real,
            miller.i_constant,
            miller.i_real,
            miller.i_imag,
            miller.i_cross,
        ]
        .iter()
        .all(|v| v.is_finite())
        {
            return Err(Error::InvalidThresholds("miller"));
        }
        if self.series_terms == 0 {
            return Err(Error::InvalidThresholds("series_terms"));
        }
        if self.fraction_terms < 4 {
            return Err(Error::InvalidThresholds("fraction_terms"));
        }
        Ok(())
    }

    /// Smallest Miller start index: the recurrence must begin above every
    /// order the base kernels are asked for.
    pub(crate) fn miller_floor(&self) -> usize {
        2 * (self.direct_order as usize + 2)
    }
}
