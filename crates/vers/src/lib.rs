//! Vers - versioned object conversion
//!
//! Store many schema versions of a data object and move instances between
//! any two of them without writing every version-to-version hop by hand.
//!
//! # Core Operations
//!
//! - **Register**: add converters between pairs of versions, optionally in
//!   both directions
//! - **Resolve**: find the shortest chain of registered converters between
//!   two versions, cached per pair until the graph changes
//! - **Convert**: apply the chain to an object, one converter at a time
//!
//! # Architecture
//!
//! ```text
//! add_converter → VersionGraph ──invalidates──→ PathCache
//!                      ↑                            │ miss
//!                      └────── find_path ←──────────┘
//! from_to / to → PathCache → Path → converter 1 → converter 2 → … → object
//!       ↑
//!   VersionSource (to / to_latest only)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::{json, Value};
//! use vers::prelude::*;
//!
//! # async fn example() -> Result<(), VersError> {
//! let vers: Vers<Value> = Vers::new();
//! vers.add_converters(
//!     1,
//!     2,
//!     from_fn(|obj: &mut Value| {
//!         obj["version"] = json!(2);
//!         None
//!     }),
//!     from_fn(|obj: &mut Value| {
//!         obj["version"] = json!(1);
//!         None
//!     }),
//! );
//!
//! let upgraded = vers.to_latest(json!({ "version": 1 })).await?;
//! assert_eq!(upgraded["version"], 2);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod cache;
pub mod config;
pub mod converter;
pub mod error;
pub mod graph;
pub mod infer;
pub mod resolver;
pub mod vers;
pub mod version;

// Re-exports for convenience
pub use cache::{CacheStats, PathCache};
pub use config::VersConfig;
pub use converter::{
    from_async_fn, from_fn, try_from_fn, Converter, ConverterRef, Hop, Path,
};
pub use error::{BoxError, VersError, VersResult};
pub use graph::VersionGraph;
pub use infer::{version_fn, PropertyVersion, VersionField, VersionSource, Versioned};
pub use resolver::find_path;
pub use vers::Vers;
pub use version::Version;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for registering converters and converting objects
    pub use crate::converter::{from_async_fn, from_fn, try_from_fn, Converter};
    pub use crate::error::{BoxError, VersError, VersResult};
    pub use crate::infer::{version_fn, VersionField, VersionSource, Versioned};
    pub use crate::{Vers, VersConfig, Version};
}
