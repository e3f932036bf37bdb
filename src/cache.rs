//! Shared coefficient caches.
//!
//! Two building blocks cover every table the kernels use:
//!
//! - [`KeyedCache`]: a map from an exact key (the bit pattern of ν or α, or a
//!   small integer) to an immutable value. Lookups take a read lock; a miss
//!   takes the write lock and constructs the value inside `entry`, so two
//!   threads racing on the same key end up sharing one value.
//! - [`Table`]: an append-only sequence produced by a recurrence. Entries are
//!   published through a read-write lock, and growth is serialised by a mutex
//!   around the generator, so an index that has been read once never changes.
//!
//! [`Caches`] bundles the tables of every kernel. It lives inside an
//! evaluator; nothing here is global except the exact Padé integer grid,
//! which does not depend on the scalar type.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use num_complex::Complex;
use parking_lot::{Mutex, RwLock};

use crate::algo::hankel::HankelExpansion;
use crate::algo::miller::MillerTables;
use crate::algo::pade::PadeTables;
use crate::algo::series::SeriesTables;
use crate::machine::BesselFloat;
use crate::utils::{cospi, sinpi};

/// Thread-safe lookup-or-insert map. Entries are never evicted.
pub(crate) struct KeyedCache<K, V> {
    map: RwLock<HashMap<K, V>>,
}

impl<K: Eq + Hash, V: Clone> KeyedCache<K, V> {
    pub(crate) fn new() -> Self {
        KeyedCache {
            map: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the value for `key`, building it with `init` on first use.
    ///
    /// `init` runs under this cache's write lock and must not touch the same
    /// cache.
    pub(crate) fn get_or_insert_with<F>(&self, key: K, init: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(v) = self.map.read().get(&key) {
            return v.clone();
        }
        self.map.write().entry(key).or_insert_with(init).clone()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.map.read().len()
    }
}

type Generator<T> = Box<dyn FnMut(usize) -> T + Send>;

/// Lazily grown coefficient sequence.
///
/// The generator is called exactly once per index, in increasing index
/// order, so it may carry running products between calls.
pub(crate) struct Table<T> {
    values: RwLock<Vec<T>>,
    generator: Mutex<Generator<T>>,
}

impl<T: Copy + Send + Sync> Table<T> {
    pub(crate) fn new<F>(generator: F) -> Self
    where
        F: FnMut(usize) -> T + Send + 'static,
    {
        Table {
            values: RwLock::new(Vec::new()),
            generator: Mutex::new(Box::new(generator)),
        }
    }

    /// Entry `index`, growing the table up to it if needed.
    #[inline]
    pub(crate) fn get(&self, index: usize) -> T {
        if let Some(&v) = self.values.read().get(index) {
            return v;
        }
        self.grow(index)
    }

    #[cold]
    fn grow(&self, index: usize) -> T {
        let mut guard = self.generator.lock();
        // Another thread may have grown the table while we waited.
        let start = {
            let values = self.values.read();
            if let Some(&v) = values.get(index) {
                return v;
            }
            values.len()
        };
        let generate: &mut (dyn FnMut(usize) -> T + Send) = &mut **guard;
        let mut fresh = Vec::with_capacity(index + 1 - start);
        for k in start..=index {
            fresh.push(generate(k));
        }
        let mut values = self.values.write();
        values.extend_from_slice(&fresh);
        values[index]
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.values.read().len()
    }
}

/// Memoised `(sin πx, cos πx)` pairs keyed by the exact angle.
pub(crate) struct TrigCache<T: BesselFloat> {
    pairs: KeyedCache<T::Key, (T, T)>,
}

impl<T: BesselFloat> TrigCache<T> {
    pub(crate) fn new() -> Self {
        TrigCache {
            pairs: KeyedCache::new(),
        }
    }

    pub(crate) fn sin_cos_pi(&self, x: T) -> (T, T) {
        self.pairs
            .get_or_insert_with(x.key(), || (sinpi(x), cospi(x)))
    }

    pub(crate) fn sinpi(&self, x: T) -> T {
        self.sin_cos_pi(x).0
    }

    /// e^{iπx}.
    pub(crate) fn cis_pi(&self, x: T) -> Complex<T> {
        let (sin, cos) = self.sin_cos_pi(x);
        Complex::new(cos, sin)
    }
}

/// Every coefficient cache of an evaluator.
pub(crate) struct Caches<T: BesselFloat> {
    pub(crate) trig: TrigCache<T>,
    pub(crate) series: SeriesTables<T>,
    pub(crate) miller: MillerTables<T>,
    pub(crate) hankel: KeyedCache<T::Key, Arc<HankelExpansion<T>>>,
    pub(crate) pade: PadeTables<T>,
}

impl<T: BesselFloat> Caches<T> {
    pub(crate) fn new() -> Self {
        Caches {
            trig: TrigCache::new(),
            series: SeriesTables::new(),
            miller: MillerTables::new(),
            hankel: KeyedCache::new(),
            pade: PadeTables::new(),
        }
    }

    /// Asymptotic coefficients for order `nu`.
    pub(crate) fn hankel(&self, nu: T) -> Arc<HankelExpansion<T>> {
        self.hankel.get_or_insert_with(nu.key(), || {
            log::debug!("building Hankel coefficients for nu = {nu:?}");
            Arc::new(HankelExpansion::new(nu, &self.trig))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn keyed_cache_builds_once() {
        let cache: KeyedCache<u32, Arc<String>> = KeyedCache::new();
        let builds = AtomicUsize::new(0);
        for _ in 0..3 {
            let v = cache.get_or_insert_with(7, || {
                builds.fetch_add(1, Ordering::SeqCst);
                Arc::new("seven".to_string())
            });
            assert_eq!(v.as_str(), "seven");
        }
        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn keyed_cache_concurrent_single_build() {
        let cache: KeyedCache<u64, Arc<Vec<u64>>> = KeyedCache::new();
        let builds = AtomicUsize::new(0);
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for key in 0..16u64 {
                        let v = cache.get_or_insert_with(key, || {
                            builds.fetch_add(1, Ordering::SeqCst);
                            Arc::new(vec![key; 4])
                        });
                        assert_eq!(v[3], key);
                    }
                });
            }
        });
        assert_eq!(builds.load(Ordering::SeqCst), 16);
    }

    #[test]
    fn table_calls_generator_in_order() {
        let mut running = 1u64;
        let table = Table::new(move |k| {
            if k > 0 {
                running *= k as u64;
            }
            running
        });
        assert_eq!(table.get(5), 120);
        assert_eq!(table.len(), 6);
        assert_eq!(table.get(0), 1);
        assert_eq!(table.get(3), 6);
        assert_eq!(table.get(10), 3_628_800);
        assert_eq!(table.len(), 11);
    }

    #[test]
    fn table_concurrent_growth_is_consistent() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let table = Table::new(move |k| {
            counter.fetch_add(1, Ordering::SeqCst);
            (k * k) as f64
        });
        std::thread::scope(|s| {
            for t in 0..8 {
                let table = &table;
                s.spawn(move || {
                    for k in (0..200).rev().skip(t) {
                        assert_eq!(table.get(k), (k * k) as f64);
                    }
                });
            }
        });
        assert_eq!(calls.load(Ordering::SeqCst), 200);
    }

    #[test]
    fn trig_cache_matches_direct() {
        let trig: TrigCache<f64> = TrigCache::new();
        assert_eq!(trig.sinpi(0.5), 1.0);
        assert_eq!(trig.cis_pi(1.0), Complex::new(-1.0, 0.0));
        let (s, c) = trig.sin_cos_pi(0.3);
        assert_eq!(s, sinpi(0.3));
        assert_eq!(c, cospi(0.3));
        assert_eq!(trig.pairs.len(), 3);
    }
}
