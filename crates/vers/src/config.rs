//! Converter configuration

use crate::version::Version;
use serde::{Deserialize, Serialize};

/// Configuration for a [`Vers`](crate::Vers) instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersConfig {
    /// Fixed latest version; when unset it is discovered from registrations
    pub latest: Option<Version>,
    /// Maximum number of cached paths; 0 is treated as 1
    pub path_cache_capacity: u64,
}

impl VersConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With an explicit latest version
    #[inline]
    #[must_use]
    pub fn with_latest(mut self, latest: impl Into<Version>) -> Self {
        self.latest = Some(latest.into());
        self
    }

    /// With path cache capacity
    #[inline]
    #[must_use]
    pub fn with_path_cache_capacity(mut self, capacity: u64) -> Self {
        self.path_cache_capacity = capacity;
        self
    }
}

impl Default for VersConfig {
    fn default() -> Self {
        Self {
            latest: None,
            path_cache_capacity: 10_000,
        }
    }
}
