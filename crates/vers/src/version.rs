//! Version identifiers
//!
//! A [`Version`] is an opaque label for one revision of an object schema.
//! Integers and strings may both be used, and both may appear in the same
//! graph. Only equality matters for routing; ordering is consulted solely to
//! discover the latest version.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Identifier of a schema revision
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Version {
    /// Numeric revision
    Int(i64),
    /// Named or dotted revision, e.g. `"2.1.0"` or `"catfish"`
    Text(String),
}

impl Version {
    /// Version assumed for objects that carry no version at all
    #[inline]
    #[must_use]
    pub fn initial() -> Self {
        Self::Int(1)
    }

    /// Compare two versions for latest-version discovery
    ///
    /// Integers compare numerically. Strings compare segment by segment on
    /// `.`, numerically where both segments are unsigned integers and
    /// lexicographically otherwise. Mixed families are incomparable.
    #[must_use]
    pub fn compare_latest(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => Some(compare_dotted(a, b)),
            _ => None,
        }
    }

    /// Numeric value, if this is an integer version
    #[inline]
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Text value, if this is a string version
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Text(s) => Some(s),
        }
    }
}

fn compare_dotted(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ord = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    _ => l.cmp(r),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Version {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Version {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Version {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for Version {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Version {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&Version> for Version {
    fn from(value: &Version) -> Self {
        value.clone()
    }
}
