//! Resolved-path cache using moka
//!
//! Memoizes routes by `(start, end)` so the graph search runs once per pair
//! until the graph changes. Invalidation is all-or-nothing: any new edge may
//! shorten any route.

use crate::converter::{Hop, Path};
use crate::error::{VersError, VersResult};
use crate::version::Version;
use moka::sync::Cache;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics for cache performance monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of entries in cache
    pub entry_count: u64,
    /// Lookups served from the cache
    pub hits: u64,
    /// Lookups that had to search the graph
    pub misses: u64,
}

/// Cache of resolved conversion paths
pub struct PathCache<T> {
    inner: Cache<(Version, Version), Path<T>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<T: 'static> PathCache<T> {
    /// Create new cache with max capacity
    ///
    /// A capacity of 0 is raised to 1; moka would otherwise store nothing.
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity.max(1)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Get the cached route for `(start, end)`
    #[must_use]
    pub fn get(&self, start: &Version, end: &Version) -> Option<Path<T>> {
        self.inner.get(&(start.clone(), end.clone()))
    }

    /// Get the route for `(start, end)`, searching with `resolve` on a miss
    ///
    /// `resolve` must return hops in execution order. A failed search is
    /// not cached.
    ///
    /// # Errors
    /// Returns [`VersError::NoPathFound`] if `resolve` finds nothing.
    pub fn get_or_resolve<F>(&self, start: &Version, end: &Version, resolve: F) -> VersResult<Path<T>>
    where
        F: FnOnce() -> Option<Vec<Hop<T>>>,
    {
        let key = (start.clone(), end.clone());
        if let Some(path) = self.inner.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(path);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let hops = resolve().ok_or_else(|| VersError::no_path(start, end))?;
        tracing::debug!(%start, %end, hops = hops.len(), "resolved conversion path");

        let path: Path<T> = hops.into();
        self.inner.insert(key, Path::clone(&path));
        Ok(path)
    }

    /// Invalidate all entries
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Get cache statistics
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.inner.run_pending_tasks();
        CacheStats {
            entry_count: self.inner.entry_count(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl<T: 'static> Default for PathCache<T> {
    /// Create cache with default capacity (10,000 entries)
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl<T> fmt::Debug for PathCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathCache")
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::{from_fn, ConverterRef};
    use std::sync::Arc;

    fn hop(a: i64, b: i64) -> Hop<()> {
        let conv: ConverterRef<()> = Arc::new(from_fn(|_: &mut ()| None));
        Hop::new(a.into(), b.into(), conv)
    }

    #[test]
    fn miss_then_hit() {
        let cache = PathCache::new(100);
        let (a, b) = (Version::from(1), Version::from(2));
        let mut calls = 0;

        let first = cache
            .get_or_resolve(&a, &b, || {
                calls += 1;
                Some(vec![hop(1, 2)])
            })
            .unwrap();
        let second = cache
            .get_or_resolve(&a, &b, || unreachable!("should use cached path"))
            .unwrap();

        assert_eq!(calls, 1);
        assert!(Arc::ptr_eq(&first, &second));
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses, stats.entry_count), (1, 1, 1));
    }

    #[test]
    fn failed_resolution_is_not_cached() {
        let cache: PathCache<()> = PathCache::new(100);
        let (a, b) = (Version::from(1), Version::from(2));

        let err = cache.get_or_resolve(&a, &b, || None).unwrap_err();
        assert!(err.is_no_path());
        assert!(cache.get(&a, &b).is_none());

        let path = cache.get_or_resolve(&a, &b, || Some(vec![hop(1, 2)])).unwrap();
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn zero_capacity_still_serves_hits() {
        let cache = PathCache::new(0);
        let (a, b) = (Version::from(1), Version::from(2));

        cache.get_or_resolve(&a, &b, || Some(vec![hop(1, 2)])).unwrap();
        cache
            .get_or_resolve(&a, &b, || unreachable!("should use cached path"))
            .unwrap();

        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses), (1, 1));
    }

    #[test]
    fn keys_are_directional() {
        let cache = PathCache::new(100);
        let (a, b) = (Version::from(1), Version::from(2));
        cache.get_or_resolve(&a, &b, || Some(vec![hop(1, 2)])).unwrap();
        assert!(cache.get(&b, &a).is_none());
    }

    #[test]
    fn invalidate_all_clears_everything() {
        let cache = PathCache::new(100);
        for i in 0..5 {
            let (a, b) = (Version::from(i), Version::from(i + 1));
            cache.get_or_resolve(&a, &b, || Some(vec![hop(i, i + 1)])).unwrap();
        }
        assert_eq!(cache.stats().entry_count, 5);

        cache.invalidate_all();
        for i in 0..5 {
            assert!(cache.get(&Version::from(i), &Version::from(i + 1)).is_none());
        }
    }
}
