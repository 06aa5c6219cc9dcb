//! Error types for arcache.
//!
//! Cache operations themselves never fail: a miss is `None`, not an error.
//! Errors only appear on two side paths:
//!
//! - [`ConfigError`]: a fallible constructor (`try_new`, `try_build`) was
//!   given a configuration it refuses, such as zero capacity.
//! - [`InvariantError`]: a `check_invariants` walk found internal state that
//!   contradicts the policy's invariants.
//!
//! ## Example Usage
//!
//! ```
//! use arcache::error::ConfigError;
//! use arcache::policy::arc::ArcCache;
//!
//! let ok: Result<ArcCache<u64, u64>, ConfigError> = ArcCache::try_new(64);
//! assert!(ok.is_ok());
//!
//! let err = ArcCache::<u64, u64>::try_new(0).unwrap_err();
//! assert!(err.to_string().contains("capacity"));
//! ```

use std::fmt;

/// Error returned when a cache's internal invariants do not hold.
///
/// Produced by `check_invariants` on
/// [`LinkedMap`](crate::ds::LinkedMap) and every policy type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Which invariant failed.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

/// Error returned when a cache configuration is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }

    pub(crate) fn zero_capacity(policy: &str) -> Self {
        Self(format!("{policy} capacity must be greater than zero"))
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}
