//! Bounded, process-wide LRU memoization for `add_points`, `double_point`,
//! `multiply_point`, and `mmi`. Capacity is resolved once from
//! `LRU_CACHE_MAXSIZE` (default 1024) and frozen for the process after first
//! use (§5 of the specification); a capacity of zero disables caching
//! entirely.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use dashu::integer::UBig;
use lru::LruCache;
use once_cell::sync::OnceCell;

use crate::point::Point;

static CONFIGURED_CAPACITY: OnceCell<usize> = OnceCell::new();

/// Resolves `LRU_CACHE_MAXSIZE` from the environment exactly once per
/// process. Missing or unparseable values fall back to the default (1024).
fn configured_capacity() -> usize {
    *CONFIGURED_CAPACITY.get_or_init(|| {
        std::env::var("LRU_CACHE_MAXSIZE")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(1024)
    })
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub(crate) enum Op {
    Add(Point, Point),
    Double(Point),
    Multiply(UBig, Point),
    Mmi(UBig, UBig),
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
    curve_id: String,
    op: Op,
}

impl CacheKey {
    pub fn new(curve_id: &str, op: Op) -> Self {
        CacheKey {
            curve_id: curve_id.to_string(),
            op,
        }
    }
}

#[derive(Clone)]
pub(crate) enum CacheValue {
    Point(Point),
    Scalar(UBig),
}

impl CacheValue {
    pub fn into_point(self) -> Point {
        match self {
            CacheValue::Point(p) => p,
            _ => unreachable!("cache value type mismatch"),
        }
    }

    pub fn into_scalar(self) -> UBig {
        match self {
            CacheValue::Scalar(s) => s,
            _ => unreachable!("cache value type mismatch"),
        }
    }
}

/// A bounded LRU cache, or no cache at all when capacity is zero. Safe to
/// share across threads via a mutex; all inputs are pure values so memoized
/// results are observationally equivalent to recomputation.
pub(crate) struct ArithmeticCache {
    inner: Option<Mutex<LruCache<CacheKey, CacheValue>>>,
}

impl ArithmeticCache {
    pub fn new(capacity: usize) -> Self {
        match NonZeroUsize::new(capacity) {
            Some(nz) => ArithmeticCache {
                inner: Some(Mutex::new(LruCache::new(nz))),
            },
            None => ArithmeticCache { inner: None },
        }
    }

    pub fn get_or_insert_with(&self, key: CacheKey, f: impl FnOnce() -> CacheValue) -> CacheValue {
        let Some(mutex) = &self.inner else {
            return f();
        };

        {
            let mut cache = mutex.lock().expect("cache mutex poisoned");
            if let Some(hit) = cache.get(&key) {
                log::trace!("arithmetic cache hit");
                return hit.clone();
            }
        }

        let value = f();

        let mut cache = mutex.lock().expect("cache mutex poisoned");
        cache.put(key, value.clone());
        log::trace!("arithmetic cache miss; result stored");
        value
    }

    /// Like [`Self::get_or_insert_with`], but for a computation that can
    /// fail (`mmi` on non-coprime inputs). Failures are never cached — only
    /// successful results are memoized.
    pub fn get_or_try_insert_with(
        &self,
        key: CacheKey,
        f: impl FnOnce() -> crate::error::Result<CacheValue>,
    ) -> crate::error::Result<CacheValue> {
        let Some(mutex) = &self.inner else {
            return f();
        };

        {
            let mut cache = mutex.lock().expect("cache mutex poisoned");
            if let Some(hit) = cache.get(&key) {
                log::trace!("arithmetic cache hit");
                return Ok(hit.clone());
            }
        }

        let value = f()?;

        let mut cache = mutex.lock().expect("cache mutex poisoned");
        cache.put(key, value.clone());
        log::trace!("arithmetic cache miss; result stored");
        Ok(value)
    }
}

static GLOBAL_CACHE: OnceCell<ArithmeticCache> = OnceCell::new();

/// Returns the process-wide arithmetic cache, initializing it from
/// `LRU_CACHE_MAXSIZE` on first access.
pub(crate) fn global_cache() -> &'static ArithmeticCache {
    GLOBAL_CACHE.get_or_init(|| ArithmeticCache::new(configured_capacity()))
}
