//! Conversion service
//!
//! [`Vers`] owns the version graph and its path cache, and runs resolved
//! paths against objects:
//! - Registration mutates the graph and clears the cache
//! - Conversion resolves a path (cached or searched) and applies each
//!   converter in order, awaiting one before starting the next
//! - Inference-based entry points ask a [`VersionSource`] for the
//!   object's current version first

use crate::cache::{CacheStats, PathCache};
use crate::config::VersConfig;
use crate::converter::{Converter, ConverterRef, Hop, Path};
use crate::error::{VersError, VersResult};
use crate::graph::VersionGraph;
use crate::infer::{PropertyVersion, VersionSource, Versioned};
use crate::resolver::find_path;
use crate::version::Version;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Graph and cache, guarded together so a registration never races a lookup
struct State<T> {
    graph: VersionGraph<T>,
    cache: PathCache<T>,
}

/// Converts objects of type `T` between registered versions
///
/// Share across tasks with `Arc<Vers<T>>`; every method takes `&self`.
pub struct Vers<T> {
    state: RwLock<State<T>>,
    source: Arc<dyn VersionSource<T>>,
}

impl<T> Vers<T>
where
    T: Versioned + Send + Sync + 'static,
{
    /// Create a converter that reads each object's own version property
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(VersConfig::default())
    }

    /// Create with configuration, reading each object's own version property
    #[inline]
    #[must_use]
    pub fn with_config(config: VersConfig) -> Self {
        Self::with_source(config, PropertyVersion)
    }
}

impl<T> Default for Vers<T>
where
    T: Versioned + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Vers<T>
where
    T: Send + Sync + 'static,
{
    /// Create with configuration and a custom version source
    #[must_use]
    pub fn with_source(config: VersConfig, source: impl VersionSource<T> + 'static) -> Self {
        let graph = match config.latest {
            Some(latest) => VersionGraph::with_latest(latest),
            None => VersionGraph::new(),
        };
        Self {
            state: RwLock::new(State {
                graph,
                cache: PathCache::new(config.path_cache_capacity),
            }),
            source: Arc::new(source),
        }
    }

    /// Register a one-way converter `from -> to`
    pub fn add_converter(
        &self,
        from: impl Into<Version>,
        to: impl Into<Version>,
        forward: impl Converter<T> + 'static,
    ) {
        self.register(from.into(), to.into(), Arc::new(forward), None);
    }

    /// Register `from -> to` together with its inverse `to -> from`
    pub fn add_converters(
        &self,
        from: impl Into<Version>,
        to: impl Into<Version>,
        forward: impl Converter<T> + 'static,
        back: impl Converter<T> + 'static,
    ) {
        self.register(from.into(), to.into(), Arc::new(forward), Some(Arc::new(back)));
    }

    /// Register shared converter handles
    ///
    /// Replaces any converter already registered for the same ordered pair
    /// and clears every cached path.
    pub fn register(
        &self,
        from: Version,
        to: Version,
        forward: ConverterRef<T>,
        back: Option<ConverterRef<T>>,
    ) {
        let mut state = self.state.write();
        tracing::debug!(%from, %to, bidirectional = back.is_some(), "registering converter");
        state.graph.add_converter(from, to, forward, back);
        state.cache.invalidate_all();
    }

    /// Convert `obj` from `current` to `target`
    ///
    /// Identical versions return `obj` untouched without consulting the
    /// graph.
    ///
    /// # Errors
    /// - [`VersError::NoPathFound`] if no route exists
    /// - [`VersError::ConverterFailed`] if a converter fails; later
    ///   converters do not run and in-place changes already made remain
    pub async fn from_to(
        &self,
        current: impl Into<Version>,
        target: impl Into<Version>,
        obj: T,
    ) -> VersResult<T> {
        let current = current.into();
        let target = target.into();
        if current == target {
            return Ok(obj);
        }
        let path = self.resolve(&current, &target)?;
        Self::apply(&path, obj).await
    }

    /// Convert `obj` from `current` to the latest version
    ///
    /// # Errors
    /// As [`from_to`](Self::from_to), plus [`VersError::NoLatestVersion`].
    pub async fn from_to_latest(&self, current: impl Into<Version>, obj: T) -> VersResult<T> {
        let latest = self.latest_version().ok_or(VersError::NoLatestVersion)?;
        self.from_to(current, latest, obj).await
    }

    /// Convert `obj` to `target`, inferring its current version
    ///
    /// # Errors
    /// As [`from_to`](Self::from_to), plus [`VersError::VersionUndetermined`]
    /// before any path is resolved.
    pub async fn to(&self, target: impl Into<Version>, obj: T) -> VersResult<T> {
        let target = target.into();
        let current = self.current_version(&obj).await?;
        self.from_to(current, target, obj).await
    }

    /// Convert `obj` to the latest version, inferring its current version
    ///
    /// # Errors
    /// As [`to`](Self::to), plus [`VersError::NoLatestVersion`].
    pub async fn to_latest(&self, obj: T) -> VersResult<T> {
        let latest = self.latest_version().ok_or(VersError::NoLatestVersion)?;
        self.to(latest, obj).await
    }

    /// Current version of `obj` according to the configured source
    ///
    /// # Errors
    /// [`VersError::VersionUndetermined`] if the source yields nothing,
    /// [`VersError::ExtractionFailed`] if it fails.
    pub async fn current_version(&self, obj: &T) -> VersResult<Version> {
        self.source
            .version_of(obj)
            .await
            .map_err(VersError::ExtractionFailed)?
            .ok_or(VersError::VersionUndetermined)
    }

    /// Resolved route from `start` to `end`, in execution order
    ///
    /// Identical versions yield an empty path.
    ///
    /// # Errors
    /// [`VersError::NoPathFound`] if no route exists.
    pub fn path(&self, start: impl Into<Version>, end: impl Into<Version>) -> VersResult<Path<T>> {
        let start = start.into();
        let end = end.into();
        if start == end {
            return Ok(Vec::new().into());
        }
        self.resolve(&start, &end)
    }

    /// Latest known version, explicit or discovered
    #[must_use]
    pub fn latest_version(&self) -> Option<Version> {
        self.state.read().graph.latest().cloned()
    }

    /// Path cache statistics
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.state.read().cache.stats()
    }

    /// Number of registered converters
    #[must_use]
    pub fn converter_count(&self) -> usize {
        self.state.read().graph.edge_count()
    }

    fn resolve(&self, start: &Version, end: &Version) -> VersResult<Path<T>> {
        let state = self.state.read();
        state
            .cache
            .get_or_resolve(start, end, || find_path(&state.graph, start, end))
    }

    async fn apply(path: &[Hop<T>], mut obj: T) -> VersResult<T> {
        for hop in path {
            tracing::trace!(from = %hop.from, to = %hop.to, "applying converter");
            match hop.converter.convert(&mut obj).await {
                Ok(Some(next)) => obj = next,
                Ok(None) => {}
                Err(source) => {
                    return Err(VersError::converter_failed(
                        hop.from.clone(),
                        hop.to.clone(),
                        source,
                    ))
                }
            }
        }
        Ok(obj)
    }

    /// Drop every edge without touching the cache
    #[cfg(test)]
    fn wipe_graph(&self) {
        self.state.write().graph.clear_edges();
    }
}

impl<T> fmt::Debug for Vers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Vers")
            .field("graph", &state.graph)
            .field("cache", &state.cache)
            .finish_non_exhaustive()
    }
}
