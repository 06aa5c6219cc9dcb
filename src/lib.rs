//! arcache: interchangeable in-memory cache eviction policies.
//!
//! LRU, LFU and ARC share one trait contract ([`traits::CoreCache`]), so a
//! caller written against the contract can swap policies freely. ARC is the
//! centerpiece: it tunes its own recency/frequency split from ghost hits.
//!
//! ```
//! use arcache::prelude::*;
//!
//! let mut cache = ArcCache::new(2);
//! cache.insert(1, "one");
//! cache.insert(2, "two");
//! assert_eq!(cache.get(&1), Some(&"one"));
//! assert_eq!(cache.len(), 2);
//! ```
//!
//! Policies never install a `tracing` subscriber; they only emit `trace!`
//! events on eviction and ghost hits and a `debug!` event on `clear`.

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

#[cfg(feature = "concurrency")]
pub mod sync;

pub mod prelude;
pub mod traits;
