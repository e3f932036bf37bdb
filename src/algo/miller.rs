//! Miller's backward recurrence.
//!
//! The three-term recurrence `f_{k-1} = 2(k+α)/z · f_k ∓ f_{k+1}` is run
//! downward from a tiny seed at a fixed even index `m`. The result is the
//! minimal solution up to a constant, which is fixed by a normalisation sum
//! λ built from the φ (J), ψ (I) tables. Y reuses the same sweep, adding the
//! η/ξ sums of the Neumann-type expansion.
//!
//! `m` comes from the fitted [`MillerFit`](crate::config::MillerFit); there is
//! no convergence test inside the sweep.

use std::sync::Arc;

use num_complex::Complex;

use crate::algo::gamma::gamma;
use crate::cache::{Caches, KeyedCache, Table, TrigCache};
use crate::config::MillerFit;
use crate::machine::BesselFloat;
use crate::utils::{nearly_integer, zdiv};

/// Normalisation tables keyed by the fractional order α ∈ [0, 1).
pub(crate) struct MillerTables<T: BesselFloat> {
    phi: KeyedCache<T::Key, Arc<Table<T>>>,
    psi: KeyedCache<T::Key, Arc<Table<T>>>,
    eta: KeyedCache<T::Key, Arc<Table<T>>>,
    xi: KeyedCache<T::Key, Arc<Table<T>>>,
}

impl<T: BesselFloat> MillerTables<T> {
    pub(crate) fn new() -> Self {
        MillerTables {
            phi: KeyedCache::new(),
            psi: KeyedCache::new(),
            eta: KeyedCache::new(),
            xi: KeyedCache::new(),
        }
    }

    /// φ_0 = Γ(1+α), φ_m = Γ(α+m)/m! · (α+2m).
    fn phi(&self, alpha: T) -> Arc<Table<T>> {
        self.phi.get_or_insert_with(alpha.key(), || {
            log::debug!("building Miller phi table for alpha = {alpha:?}");
            let mut g = T::one();
            Arc::new(Table::new(move |m| {
                let one = T::one();
                let mf = T::from_f64(m as f64);
                match m {
                    0 => {
                        g = gamma(one + alpha);
                        g
                    }
                    1 => g * (alpha + T::from_f64(2.0)),
                    _ => {
                        g = g * (alpha + mf - one) / mf;
                        g * (alpha + mf + mf)
                    }
                }
            }))
        })
    }

    /// ψ_0 = Γ(1+α), ψ_m = 2·Γ(2α+m)/(m!·Γ(2α)) · Γ(1+α)·(α+m).
    fn psi(&self, alpha: T) -> Arc<Table<T>> {
        self.psi.get_or_insert_with(alpha.key(), || {
            log::debug!("building Miller psi table for alpha = {alpha:?}");
            let mut g = T::one();
            Arc::new(Table::new(move |m| {
                let one = T::one();
                let two = T::from_f64(2.0);
                let mf = T::from_f64(m as f64);
                match m {
                    0 => {
                        g = gamma(one + alpha);
                        g
                    }
                    1 => {
                        g = g * two;
                        g * (one + alpha)
                    }
                    _ => {
                        g = g * (two * alpha + mf - one) / mf;
                        g * (alpha + mf)
                    }
                }
            }))
        })
    }

    /// η_m, the even-index weights of the Y expansion. Index 0 is unused.
    fn eta(&self, alpha: T) -> Arc<Table<T>> {
        self.eta.get_or_insert_with(alpha.key(), || {
            let mut g = T::one();
            Arc::new(Table::new(move |m| {
                let one = T::one();
                let two = T::from_f64(2.0);
                let mf = T::from_f64(m as f64);
                if m == 0 {
                    return T::nan();
                }
                if alpha == T::zero() {
                    let e = two / mf;
                    return if m % 2 == 1 { e } else { -e };
                }
                if m == 1 {
                    let c = gamma(one + alpha);
                    g = c * c / (one - alpha);
                } else {
                    g = -g * (alpha + mf - one) * (two * alpha + mf - one) / (mf * (mf - alpha));
                }
                g * (alpha + mf + mf)
            }))
        })
    }

    /// ξ_m, the weights of the Y₁ companion sum. Indices 0 and 1 are unused.
    fn xi(&self, alpha: T) -> Arc<Table<T>> {
        let eta = self.eta(alpha);
        self.xi.get_or_insert_with(alpha.key(), || {
            Arc::new(Table::new(move |m| {
                if m < 2 {
                    return T::nan();
                }
                let h = m / 2;
                if alpha != T::zero() {
                    return if m % 2 == 0 {
                        eta.get(h)
                    } else {
                        (eta.get(h) - eta.get(h + 1)) * T::from_f64(0.5)
                    };
                }
                if m % 2 == 0 {
                    return T::nan();
                }
                let hf = T::from_f64(h as f64);
                let xi = (hf + hf + T::one()) / (hf * (hf + T::one()));
                if m & 2 != 0 {
                    xi
                } else {
                    -xi
                }
            }))
        })
    }
}

/// Split `nu` into `floor(nu)` and the fractional part α ∈ [0, 1).
fn split_order<T: BesselFloat>(nu: T) -> (i64, T) {
    let n = nu.floor();
    (n.to_i64().unwrap_or(0), nu - n)
}

/// Miller evaluator bound to an evaluator's caches.
pub(crate) struct MillerBackward<'a, T: BesselFloat> {
    tables: &'a MillerTables<T>,
    trig: &'a TrigCache<T>,
    fit: MillerFit,
    floor: usize,
}

impl<'a, T: BesselFloat> MillerBackward<'a, T> {
    pub(crate) fn new(caches: &'a Caches<T>, fit: MillerFit, floor: usize) -> Self {
        MillerBackward {
            tables: &caches.miller,
            trig: &caches.trig,
            fit,
            floor,
        }
    }

    pub(crate) fn besselj(&self, nu: T, z: Complex<T>) -> Complex<T> {
        let m = self.fit.jy_iterations(z.re, self.floor);
        self.besselj_from(nu, z, m)
    }

    pub(crate) fn bessely(&self, nu: T, z: Complex<T>) -> Complex<T> {
        let m = self.fit.jy_iterations(z.re, self.floor);
        self.bessely_from(nu, z, m)
    }

    pub(crate) fn besseli(&self, nu: T, z: Complex<T>) -> Complex<T> {
        let m = self.fit.i_iterations(z.re, z.im, self.floor);
        self.besseli_from(nu, z, m)
    }

    /// J_ν(z) with the recurrence started at index `m` (even).
    pub(crate) fn besselj_from(&self, nu: T, z: Complex<T>, m: usize) -> Complex<T> {
        if let Some(n) = nearly_integer(nu) {
            return self.besselj_integer(n, z, m);
        }
        let (n, alpha) = split_order(nu);
        let phi = self.tables.phi(alpha);
        let two = T::from_f64(2.0);
        let v = z.inv();

        let mut f0 = Complex::new(T::MILLER_SEED, T::zero());
        let mut f1 = Complex::new(T::zero(), T::zero());
        let mut fn_ = f1;
        let mut lambda = f1;
        for k in (1..=m).rev() {
            if k % 2 == 0 {
                lambda = lambda + f0 * phi.get(k / 2);
            }
            let next = v * f0 * (two * (T::from_f64(k as f64) + alpha)) - f1;
            f1 = f0;
            f0 = next;
            if n >= 0 && k - 1 == n as usize {
                fn_ = f0;
            }
        }
        lambda = (lambda + f0 * phi.get(0)) * (v * two).powf(alpha);
        if n >= 0 {
            return zdiv(fn_, lambda);
        }

        let mut k = 0i64;
        while k > n {
            let next = v * f0 * (two * (T::from_f64(k as f64) + alpha)) - f1;
            f1 = f0;
            f0 = next;
            k -= 1;
        }
        zdiv(f0, lambda)
    }

    fn besselj_integer(&self, n: i64, z: Complex<T>, m: usize) -> Complex<T> {
        if n < 0 {
            // J_{-n} = (-1)^n J_n
            let y = self.besselj_integer(-n, z, m);
            return if n % 2 == 0 { y } else { -y };
        }
        let n = n as usize;
        let two = T::from_f64(2.0);
        let v = z.inv();

        let mut f0 = Complex::new(T::MILLER_SEED, T::zero());
        let mut f1 = Complex::new(T::zero(), T::zero());
        let mut fn_ = f1;
        let mut lambda = f1;
        for k in (1..=m).rev() {
            if k % 2 == 0 {
                lambda = lambda + f0;
            }
            let next = v * f0 * T::from_f64((2 * k) as f64) - f1;
            f1 = f0;
            f0 = next;
            if k - 1 == n {
                fn_ = f0;
            }
        }
        lambda = lambda * two + f0;
        zdiv(fn_, lambda)
    }

    /// I_ν(z) with the recurrence started at index `m` (even).
    pub(crate) fn besseli_from(&self, nu: T, z: Complex<T>, m: usize) -> Complex<T> {
        if let Some(n) = nearly_integer(nu) {
            return self.besseli_integer(n.unsigned_abs() as usize, z, m);
        }
        let (n, alpha) = split_order(nu);
        let psi = self.tables.psi(alpha);
        let two = T::from_f64(2.0);
        let v = z.inv();

        let mut g0 = Complex::new(T::MILLER_SEED, T::zero());
        let mut g1 = Complex::new(T::zero(), T::zero());
        let mut gn = g1;
        let mut lambda = g1;
        for k in (1..=m).rev() {
            lambda = lambda + g0 * psi.get(k);
            let next = v * g0 * (two * (T::from_f64(k as f64) + alpha)) + g1;
            g1 = g0;
            g0 = next;
            if n >= 0 && k - 1 == n as usize {
                gn = g0;
            }
        }
        lambda = (lambda + g0 * psi.get(0)) * (v * two).powf(alpha);
        if n >= 0 {
            return zdiv(gn, lambda) * z.exp();
        }

        let mut k = 0i64;
        while k > n {
            let next = v * g0 * (two * (T::from_f64(k as f64) + alpha)) + g1;
            g1 = g0;
            g0 = next;
            k -= 1;
        }
        zdiv(g0, lambda) * z.exp()
    }

    fn besseli_integer(&self, n: usize, z: Complex<T>, m: usize) -> Complex<T> {
        let v = z.inv();
        let mut g0 = Complex::new(T::MILLER_SEED, T::zero());
        let mut g1 = Complex::new(T::zero(), T::zero());
        let mut gn = g1;
        let mut lambda = g1;
        for k in (1..=m).rev() {
            lambda = lambda + g0;
            let next = v * g0 * T::from_f64((2 * k) as f64) + g1;
            g1 = g0;
            g0 = next;
            if k - 1 == n {
                gn = g0;
            }
        }
        lambda = lambda * T::from_f64(2.0) + g0;
        zdiv(gn, lambda) * z.exp()
    }

    /// Y_ν(z) with the recurrence started at index `m` (even).
    pub(crate) fn bessely_from(&self, nu: T, z: Complex<T>, m: usize) -> Complex<T> {
        if let Some(n) = nearly_integer(nu) {
            return self.bessely_integer(n, z, m);
        }
        let (n, alpha) = split_order(nu);
        let one = T::one();
        let two = T::from_f64(2.0);
        let phi = self.tables.phi(alpha);
        let eta = self.tables.eta(alpha);
        let xi = self.tables.xi(alpha);
        let v = z.inv();
        let zero = Complex::new(T::zero(), T::zero());

        let mut f0 = Complex::new(T::MILLER_SEED, T::zero());
        let mut f1 = zero;
        let mut lambda = zero;
        let mut se = zero;
        let mut sxe = zero;
        let mut sxo = zero;
        for k in (1..=m).rev() {
            if k % 2 == 0 {
                lambda = lambda + f0 * phi.get(k / 2);
                se = se + f0 * eta.get(k / 2);
                sxe = sxe + f0 * xi.get(k);
            } else if k >= 3 {
                sxo = sxo + f0 * xi.get(k);
            }
            let next = v * f0 * (two * (T::from_f64(k as f64) + alpha)) - f1;
            f1 = f0;
            f0 = next;
        }

        let s = (v * two).powf(alpha);
        let sqs = s * s;
        lambda = (lambda + f0 * phi.get(0)) * s;

        let (sin, cos) = self.trig.sin_cos_pi(alpha);
        let rcot = cos / sin;
        let rg = phi.get(0);
        let r = sqs * (two * T::FRAC_1_PI());
        let p = sqs * (rg * rg * T::FRAC_1_PI());

        let (eta0, xi1) = if alpha > T::SMALL_ALPHA {
            (
                -p / alpha + rcot,
                p * ((alpha * (alpha + one) + one) / (alpha * (alpha - one))) + rcot,
            )
        } else {
            (eta0_small_alpha(alpha, z), xi1_small_alpha(alpha, z))
        };
        let xi0 = -(v * p) * two;

        let mut y0 = r * se + eta0 * f0;
        let mut y1 = r * (v * sxe * (T::from_f64(3.0) * alpha) + sxo) + xi0 * f0 + xi1 * f1;
        match n {
            0 => zdiv(y0, lambda),
            1 => zdiv(y1, lambda),
            _ if n > 1 => {
                for k in 1..n {
                    let next = v * y1 * (two * (T::from_f64(k as f64) + alpha)) - y0;
                    y0 = y1;
                    y1 = next;
                }
                zdiv(y1, lambda)
            }
            _ => {
                let mut k = 0i64;
                while k > n {
                    let next = v * y0 * (two * (T::from_f64(k as f64) + alpha)) - y1;
                    y1 = y0;
                    y0 = next;
                    k -= 1;
                }
                zdiv(y0, lambda)
            }
        }
    }

    fn bessely_integer(&self, n: i64, z: Complex<T>, m: usize) -> Complex<T> {
        if n < 0 {
            // Y_{-n} = (-1)^n Y_n
            let y = self.bessely_integer(-n, z, m);
            return if n % 2 == 0 { y } else { -y };
        }
        let one = T::one();
        let two = T::from_f64(2.0);
        let eta = self.tables.eta(T::zero());
        let xi = self.tables.xi(T::zero());
        let v = z.inv();
        let zero = Complex::new(T::zero(), T::zero());

        let mut f0 = Complex::new(T::MILLER_SEED, T::zero());
        let mut f1 = zero;
        let mut lambda = zero;
        let mut se = zero;
        let mut sx = zero;
        for k in (1..=m).rev() {
            if k % 2 == 0 {
                lambda = lambda + f0;
                se = se + f0 * eta.get(k / 2);
            } else if k >= 3 {
                sx = sx + f0 * xi.get(k);
            }
            let next = v * f0 * T::from_f64((2 * k) as f64) - f1;
            f1 = f0;
            f0 = next;
        }
        lambda = lambda * two + f0;

        let c = (z * T::from_f64(0.5)).ln() + T::EULER_GAMMA;
        let mut y0 = se + f0 * c;
        let mut y1 = sx - v * f0 + (c - one) * f1;
        let scale = lambda * T::PI() / two;
        if n == 0 {
            return zdiv(y0, scale);
        }
        for k in 1..n {
            let next = v * y1 * T::from_f64((2 * k) as f64) - y0;
            y0 = y1;
            y1 = next;
        }
        zdiv(y1, scale)
    }
}

/// η₀ to third order in α, for α too small to divide by.
fn eta0_small_alpha<T: BesselFloat>(alpha: T, x: Complex<T>) -> Complex<T> {
    let k = |v: f64| T::from_f64(v);
    let l = x.ln();
    let lh = (x * k(0.5)).ln();
    let (ln2, g, z3) = (T::LN_2(), T::EULER_GAMMA, T::ZETA3);
    let sqpi = T::PI() * T::PI();
    let sq = ln2 * ln2;
    let cb = sq * ln2;
    let qd = sq * sq;

    let r0 = lh + g;
    let r1 = (l * (-l + ln2 * k(2.0)) - sq) * k(4.0) - sqpi - (lh * k(2.0) + g) * g * k(4.0);
    let r2 = (l * ((l + ln2 * k(-3.0)) * l + sq * k(3.0)) - cb) * k(4.0)
        + (lh + g) * sqpi
        + (((l + ln2 * k(-2.0)) * l + sq) * k(3.0) + (lh * k(3.0) + g) * g) * g * k(4.0)
        + z3 * k(2.0);
    let r3 = (l * (l * (l * (-l + ln2 * k(4.0)) + sq * k(-6.0)) + cb * k(4.0)) - qd) * k(16.0)
        - (lh + g) * (z3 * k(32.0))
        - ((l * (l - ln2 * k(2.0)) + sq + (lh * k(2.0) + g) * g) * k(8.0) + sqpi) * sqpi
        + ((l * (l * (-l + ln2 * k(3.0)) - sq * k(3.0)) + cb) * k(4.0)
            + ((l * (l - ln2 * k(2.0)) + sq) * k(-6.0) + (lh * k(-4.0) - g) * g) * g)
            * g
            * k(16.0);

    combine_small_alpha(alpha, r0, r1, r2, r3)
}

/// ξ₁ to third order in α, for α too small to divide by.
fn xi1_small_alpha<T: BesselFloat>(alpha: T, x: Complex<T>) -> Complex<T> {
    let k = |v: f64| T::from_f64(v);
    let l = x.ln();
    let lm1 = l - T::one();
    let hm1 = (x * k(0.5)).ln() - T::one();
    let (ln2, g, z3) = (T::LN_2(), T::EULER_GAMMA, T::ZETA3);
    let sqpi = T::PI() * T::PI();
    let sq = ln2 * ln2;
    let cb = sq * ln2;
    let qd = sq * sq;

    let r0 = hm1 + g;
    let r1 = (lm1 * (ln2 * k(2.0)) + l * (-l + k(2.0)) - sq) * k(4.0)
        - sqpi
        - (hm1 * k(2.0) + g) * g * k(4.0)
        - k(6.0);
    let r2 = lm1 * (sq * k(12.0))
        + l * ((l * k(4.0) - k(12.0)) * l + k(18.0))
        + (l * (-l + k(2.0)) * k(12.0) - k(18.0)) * ln2
        + (hm1 + g) * sqpi
        + ((l * (l - k(2.0)) - lm1 * (ln2 * k(2.0)) + sq) * k(12.0)
            + k(18.0)
            + (hm1 * k(12.0) + g * k(4.0)) * g)
            * g
        + (z3 * k(2.0) - cb * k(4.0) - k(9.0));
    let r3 = lm1 * (cb * k(64.0))
        + (l * (-l + k(2.0)) * k(96.0) - k(144.0)) * sq
        + (l * ((l * k(2.0) - k(6.0)) * l + k(9.0)) * k(32.0) - k(144.0)) * ln2
        + l * (((-l + k(4.0)) * l - k(9.0)) * l + k(9.0)) * k(16.0)
        + (hm1 + g) * (z3 * k(-32.0))
        + ((lm1 * (ln2 * k(2.0)) + l * (-l + k(2.0)) - (hm1 * k(2.0) + g) * g - sq) * k(8.0)
            - k(12.0)
            - sqpi)
            * sqpi
        + ((lm1 * (sq * k(-3.0)) + cb) * k(64.0)
            + (l * (l - k(2.0)) * k(192.0) + k(288.0)) * ln2
            + l * ((l * k(-2.0) + k(6.0)) * l - k(9.0)) * k(32.0)
            + k(144.0)
            + ((lm1 * (ln2 * k(2.0)) + l * (-l + k(2.0)) - sq) * k(96.0)
                - k(144.0)
                + (hm1 * k(-64.0) - g * k(16.0)) * g)
                * g)
            * g
        - (qd * k(16.0) + k(72.0));

    combine_small_alpha(alpha, r0, r1, r2, r3)
}

fn combine_small_alpha<T: BesselFloat>(
    alpha: T,
    r0: Complex<T>,
    r1: Complex<T>,
    r2: Complex<T>,
    r3: Complex<T>,
) -> Complex<T> {
    let k = |v: f64| T::from_f64(v);
    (r0 * k(48.0) + (r1 * k(12.0) + (r2 * k(8.0) + r3 * alpha) * alpha) * alpha)
        / (k(24.0) * T::PI())
}
