//! Error types for version conversion
//!
//! Every failure of a conversion surfaces as a [`VersError`]:
//! - Route lookups that find no chain of converters
//! - Objects whose current version cannot be determined
//! - Converters that fail part-way along a path

use crate::version::Version;

/// Opaque error returned by caller-supplied converters and version extractors
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while converting an object between versions
#[derive(Debug, thiserror::Error)]
pub enum VersError {
    /// No chain of registered converters connects the two versions
    #[error("No translation path found to convert {from} to {to}")]
    NoPathFound {
        /// Requested starting version
        from: Version,
        /// Requested target version
        to: Version,
    },

    /// The object's current version could not be extracted
    #[error("Could not determine the current version")]
    VersionUndetermined,

    /// A latest-version conversion was requested before any latest version is known
    #[error("no latest version is known: register a converter or configure one explicitly")]
    NoLatestVersion,

    /// The version extractor itself failed
    #[error("version extraction failed: {0}")]
    ExtractionFailed(#[source] BoxError),

    /// A converter along the resolved path failed
    #[error("converter {from} -> {to} failed: {source}")]
    ConverterFailed {
        /// Version the failing converter starts from
        from: Version,
        /// Version the failing converter produces
        to: Version,
        /// Error returned by the converter
        #[source]
        source: BoxError,
    },
}

impl VersError {
    /// Create a no-path error for the given pair
    pub fn no_path(from: impl Into<Version>, to: impl Into<Version>) -> Self {
        Self::NoPathFound {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create a converter failure for the hop `from -> to`
    pub fn converter_failed(from: Version, to: Version, source: impl Into<BoxError>) -> Self {
        Self::ConverterFailed {
            from,
            to,
            source: source.into(),
        }
    }

    /// Check if the error came from route resolution
    #[inline]
    #[must_use]
    pub fn is_no_path(&self) -> bool {
        matches!(self, Self::NoPathFound { .. })
    }

    /// Check if the error came from version inference
    #[inline]
    #[must_use]
    pub fn is_undetermined(&self) -> bool {
        matches!(self, Self::VersionUndetermined | Self::ExtractionFailed(_))
    }

    /// Check if the error was raised by a caller-supplied converter
    #[inline]
    #[must_use]
    pub fn is_converter_failure(&self) -> bool {
        matches!(self, Self::ConverterFailed { .. })
    }
}

/// Result type alias for conversion operations
pub type VersResult<T> = Result<T, VersError>;
