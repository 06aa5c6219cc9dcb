//! Eviction policies. Each type owns its storage and implements the
//! [`CoreCache`](crate::traits::CoreCache) contract.

pub mod arc;
pub mod lfu;
pub mod lru;

pub use arc::{ArcCache, Residency};
pub use lfu::LfuCache;
pub use lru::LruCache;
