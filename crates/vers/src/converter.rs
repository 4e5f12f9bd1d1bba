//! Converter capability
//!
//! A converter moves an object one step between two versions. It may
//! replace the object, mutate it in place, or both, and it may suspend.
//! Returning `Ok(None)` forwards the (possibly mutated) input to the next
//! step; returning `Ok(Some(next))` replaces it.

use crate::error::BoxError;
use crate::version::Version;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Transformation between two versions of `T`
///
/// Implement this directly for converters that need to await, or use one
/// of the adapters: [`from_fn`], [`try_from_fn`], [`from_async_fn`].
#[async_trait::async_trait]
pub trait Converter<T>: Send + Sync {
    /// Convert `obj`, either in place (return `None`) or by replacement
    async fn convert(&self, obj: &mut T) -> Result<Option<T>, BoxError>;
}

/// Shared handle to a registered converter
pub type ConverterRef<T> = Arc<dyn Converter<T>>;

/// Converter backed by a synchronous, infallible closure
#[derive(Clone)]
pub struct FnConverter<F>(F);

#[async_trait::async_trait]
impl<T, F> Converter<T> for FnConverter<F>
where
    T: Send,
    F: Fn(&mut T) -> Option<T> + Send + Sync,
{
    async fn convert(&self, obj: &mut T) -> Result<Option<T>, BoxError> {
        Ok((self.0)(obj))
    }
}

/// Wrap a synchronous closure as a converter
///
/// ```rust,ignore
/// let up = from_fn(|doc: &mut Doc| {
///     doc.version = 2;
///     None
/// });
/// ```
pub fn from_fn<T, F>(f: F) -> FnConverter<F>
where
    F: Fn(&mut T) -> Option<T> + Send + Sync,
{
    FnConverter(f)
}

/// Converter backed by a synchronous closure that may fail
#[derive(Clone)]
pub struct TryFnConverter<F>(F);

#[async_trait::async_trait]
impl<T, F, E> Converter<T> for TryFnConverter<F>
where
    T: Send,
    F: Fn(&mut T) -> Result<Option<T>, E> + Send + Sync,
    E: Into<BoxError>,
{
    async fn convert(&self, obj: &mut T) -> Result<Option<T>, BoxError> {
        (self.0)(obj).map_err(Into::into)
    }
}

/// Wrap a fallible synchronous closure as a converter
pub fn try_from_fn<T, F, E>(f: F) -> TryFnConverter<F>
where
    F: Fn(&mut T) -> Result<Option<T>, E> + Send + Sync,
    E: Into<BoxError>,
{
    TryFnConverter(f)
}

/// Converter backed by an async closure that takes the object by value
#[derive(Clone)]
pub struct AsyncFnConverter<F>(F);

#[async_trait::async_trait]
impl<T, F, Fut, E> Converter<T> for AsyncFnConverter<F>
where
    T: Clone + Send,
    F: Fn(T) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    E: Into<BoxError>,
{
    async fn convert(&self, obj: &mut T) -> Result<Option<T>, BoxError> {
        let next = (self.0)(obj.clone()).await.map_err(Into::into)?;
        Ok(Some(next))
    }
}

/// Wrap an async closure as a converter
///
/// The closure receives a clone of the object and resolves to its
/// replacement.
pub fn from_async_fn<T, F, Fut, E>(f: F) -> AsyncFnConverter<F>
where
    T: Clone,
    F: Fn(T) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    E: Into<BoxError>,
{
    AsyncFnConverter(f)
}

/// One edge of a resolved path
pub struct Hop<T> {
    /// Version the converter reads
    pub from: Version,
    /// Version the converter produces
    pub to: Version,
    /// The registered converter
    pub converter: ConverterRef<T>,
}

impl<T> Hop<T> {
    /// Create a hop for the edge `from -> to`
    #[inline]
    #[must_use]
    pub fn new(from: Version, to: Version, converter: ConverterRef<T>) -> Self {
        Self {
            from,
            to,
            converter,
        }
    }
}

impl<T> Clone for Hop<T> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            converter: Arc::clone(&self.converter),
        }
    }
}

impl<T> fmt::Debug for Hop<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Resolved route, in execution order
pub type Path<T> = Arc<[Hop<T>]>;
