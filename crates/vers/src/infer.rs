//! Version inference
//!
//! Works out which version an object is currently at, for conversions
//! where the caller names only the target.

use crate::error::BoxError;
use crate::version::Version;
use serde_json::Value;

/// Source of an object's current version
///
/// `Ok(None)` means the version is undetermined. Zero and the empty string
/// are determined versions.
#[async_trait::async_trait]
pub trait VersionSource<T>: Send + Sync {
    /// Extract the current version of `obj`
    async fn version_of(&self, obj: &T) -> Result<Option<Version>, BoxError>;
}

/// State of an object's own version property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionField {
    /// The object has no version property
    Absent,
    /// The property exists but holds no usable version
    Null,
    /// The property holds a version
    Present(Version),
}

/// Objects that carry their own version property
pub trait Versioned {
    /// Read the version property
    fn version_field(&self) -> VersionField;
}

impl Versioned for Value {
    /// Reads the `version` key; non-integer numbers and other JSON kinds are `Null`
    fn version_field(&self) -> VersionField {
        match self.get("version") {
            None => VersionField::Absent,
            Some(Value::Number(n)) => n
                .as_i64()
                .map_or(VersionField::Null, |n| VersionField::Present(Version::Int(n))),
            Some(Value::String(s)) => VersionField::Present(Version::Text(s.clone())),
            Some(_) => VersionField::Null,
        }
    }
}

/// Default source: the object's version property, or `1` when it has none
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyVersion;

#[async_trait::async_trait]
impl<T> VersionSource<T> for PropertyVersion
where
    T: Versioned + Sync,
{
    async fn version_of(&self, obj: &T) -> Result<Option<Version>, BoxError> {
        Ok(match obj.version_field() {
            VersionField::Absent => Some(Version::initial()),
            VersionField::Null => None,
            VersionField::Present(v) => Some(v),
        })
    }
}

/// Source backed by a synchronous closure
#[derive(Clone)]
pub struct FnVersionSource<F>(F);

#[async_trait::async_trait]
impl<T, F> VersionSource<T> for FnVersionSource<F>
where
    T: Sync,
    F: Fn(&T) -> Option<Version> + Send + Sync,
{
    async fn version_of(&self, obj: &T) -> Result<Option<Version>, BoxError> {
        Ok((self.0)(obj))
    }
}

/// Wrap a synchronous extractor as a version source
pub fn version_fn<T, F>(f: F) -> FnVersionSource<F>
where
    F: Fn(&T) -> Option<Version> + Send + Sync,
{
    FnVersionSource(f)
}
