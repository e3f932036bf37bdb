//! Yoshida's rational approximation of K_ν(z) in the mid annulus.
//!
//! K_ν(z) ≈ √(π/(2z))·e^{−z}·C(1/z)/D(1/z), where the numerator and
//! denominator coefficients of degree `m` follow in closed form from a
//! triangular grid e[i][j] and ν². The grid itself is a set of exact
//! rationals built from the shifted Legendre polynomial of degree `m`.
//! Orders of 2 and above are reached by the upward recurrence from the
//! fractional part α and α + 1.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use num_bigint::{BigInt, Sign};
use num_complex::Complex;
use num_traits::Zero;
use parking_lot::Mutex;

use crate::algo::legendre::shifted_legendre;
use crate::cache::{Caches, KeyedCache};
use crate::machine::BesselFloat;

/// The grid of degree `m` as integers over a common denominator:
/// e[i][j] = numer[i][j]·2^(2j−3i) / numer[0][0].
struct ExactGrid {
    numer: Vec<Vec<BigInt>>,
}

static EXACT_GRIDS: OnceLock<Mutex<HashMap<usize, Arc<ExactGrid>>>> = OnceLock::new();

/// Coefficients of Π_{l=1..k}(x − root(l)) for k = 0..=m, low degree first.
fn product_polynomials(m: usize, root: impl Fn(usize) -> u64) -> Vec<Vec<BigInt>> {
    let mut polys: Vec<Vec<BigInt>> = Vec::with_capacity(m + 1);
    polys.push(vec![BigInt::from(1)]);
    for k in 1..=m {
        let a = BigInt::from(root(k));
        let prev = &polys[k - 1];
        let mut next = vec![BigInt::zero(); k + 1];
        next[0] = -(&a * &prev[0]);
        for l in 1..k {
            next[l] = &prev[l - 1] - &a * &prev[l];
        }
        next[k] = BigInt::from(1);
        polys.push(next);
    }
    polys
}

impl ExactGrid {
    fn build(m: usize) -> Self {
        let legendre = shifted_legendre(m);
        let ps = product_polynomials(m, |k| ((2 * k - 1) * (2 * k - 1)) as u64);
        let qs = product_polynomials(m, |k| ((2 * (m - k) + 3) * (2 * (m - k) + 3)) as u64);
        let mut factorial = vec![BigInt::from(1)];
        for k in 1..=m {
            let next = &factorial[k - 1] * k;
            factorial.push(next);
        }
        // weight[i][k] = P*_m[m−k]·(m−k)!·m!/(i−k)!
        let weight = |i: usize, k: usize| -> BigInt {
            &legendre[m - k] * &factorial[m - k] * (&factorial[m] / &factorial[i - k])
        };
        let mut numer = Vec::with_capacity(m + 1);
        for i in 0..=m {
            let mut row = Vec::with_capacity(i + 1);
            for j in 0..=i {
                let mut sum = BigInt::zero();
                for l in 0..=j {
                    for k in (j - l)..=(i - l) {
                        sum += weight(i, k) * &ps[i - k][l] * &qs[k][j - l];
                    }
                }
                row.push(sum);
            }
            numer.push(row);
        }
        ExactGrid { numer }
    }

    fn shared(m: usize) -> Arc<ExactGrid> {
        let grids = EXACT_GRIDS.get_or_init(|| Mutex::new(HashMap::new()));
        let mut grids = grids.lock();
        Arc::clone(grids.entry(m).or_insert_with(|| {
            log::debug!("building exact Padé grid of degree {m}");
            Arc::new(ExactGrid::build(m))
        }))
    }

    fn to_float<T: BesselFloat>(&self) -> Vec<Vec<T>> {
        let den = &self.numer[0][0];
        self.numer
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .map(|(j, num)| ratio_to_float::<T>(num, den).ldexp(2 * j as i32 - 3 * i as i32))
                    .collect()
            })
            .collect()
    }
}

/// `num / den` rounded to the working precision.
fn ratio_to_float<T: BesselFloat>(num: &BigInt, den: &BigInt) -> T {
    if num.is_zero() {
        return T::zero();
    }
    // Keep 64 guard bits in the integer quotient.
    let bits = i64::from(T::MACH_DIGITS) + 64;
    let shift = den.bits() as i64 - num.bits() as i64 + bits;
    let quotient = if shift >= 0 {
        (num << shift as usize) / den
    } else {
        num / (den << (-shift) as usize)
    };
    let (sign, digits) = quotient.to_u32_digits();
    let radix = T::from_f64(4_294_967_296.0);
    let magnitude = digits
        .iter()
        .rev()
        .fold(T::zero(), |acc, &d| acc * radix + T::from_f64(f64::from(d)));
    let value = if sign == Sign::Minus { -magnitude } else { magnitude };
    value.ldexp(-(shift as i32))
}

/// Numerator and denominator coefficients for one order, highest power of
/// 1/z first.
pub(crate) struct PadeCoefficients<T> {
    numer: Vec<T>,
    denom: Vec<T>,
}

impl<T: BesselFloat> PadeCoefficients<T> {
    fn new(nu: T, grid: &[Vec<T>]) -> Self {
        let m = grid.len() - 1;
        let sq = nu * nu;
        let half = T::from_f64(0.5);
        let mut numer = Vec::with_capacity(m + 1);
        let mut denom = Vec::with_capacity(m + 1);
        let mut product = T::one();
        for (i, row) in grid.iter().enumerate() {
            if i > 0 {
                let a = T::from_f64((m - i + 1) as f64) + half;
                product = product * (a * a - sq);
            }
            denom.push(row[i] * product);
            let mut c = T::zero();
            let mut power = T::one();
            for &e in row {
                c = c + e * power;
                power = power * sq;
            }
            numer.push(c);
        }
        numer.reverse();
        denom.reverse();
        PadeCoefficients { numer, denom }
    }

    fn value(&self, z: Complex<T>) -> Complex<T> {
        let t = z.inv();
        let zero = Complex::new(T::zero(), T::zero());
        let (c, d) = self
            .numer
            .iter()
            .zip(&self.denom)
            .fold((zero, zero), |(c, d), (&a, &b)| (c * t + a, d * t + b));
        (t * T::FRAC_PI_2()).sqrt() * c / d * (-z).exp()
    }
}

/// The Padé grid in the working type plus per-order coefficients.
pub(crate) struct PadeTables<T: BesselFloat> {
    grid: OnceLock<Arc<Vec<Vec<T>>>>,
    orders: KeyedCache<T::Key, Arc<PadeCoefficients<T>>>,
}

impl<T: BesselFloat> PadeTables<T> {
    pub(crate) fn new() -> Self {
        PadeTables {
            grid: OnceLock::new(),
            orders: KeyedCache::new(),
        }
    }

    fn grid(&self) -> &Arc<Vec<Vec<T>>> {
        self.grid
            .get_or_init(|| Arc::new(ExactGrid::shared(T::PADE_DEGREE).to_float()))
    }

    pub(crate) fn coefficients(&self, nu: T) -> Arc<PadeCoefficients<T>> {
        let grid = Arc::clone(self.grid());
        self.orders.get_or_insert_with(nu.key(), || {
            log::debug!("building Padé coefficients for nu = {nu:?}");
            Arc::new(PadeCoefficients::new(nu, &grid))
        })
    }
}

/// K_ν(z) for ν ≥ 0 by the rational approximation.
pub(crate) struct YoshidaPade<'a, T: BesselFloat> {
    caches: &'a Caches<T>,
}

impl<'a, T: BesselFloat> YoshidaPade<'a, T> {
    pub(crate) fn new(caches: &'a Caches<T>) -> Self {
        YoshidaPade { caches }
    }

    fn base(&self, nu: T, z: Complex<T>) -> Complex<T> {
        self.caches.pade.coefficients(nu).value(z)
    }

    pub(crate) fn besselk(&self, nu: T, z: Complex<T>) -> Complex<T> {
        let two = T::from_f64(2.0);
        if nu < two {
            return self.base(nu, z);
        }
        let n = nu.floor();
        let alpha = nu - n;
        let v = z.inv();
        let mut k0 = self.base(alpha, z);
        let mut k1 = self.base(alpha + T::one(), z);
        let mut k = T::one();
        while k < n {
            let k2 = v * ((k + alpha) * two) * k1 + k0;
            k0 = k1;
            k1 = k2;
            k = k + T::one();
        }
        k1
    }
}
