pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
pub use crate::ds::{GhostList, LinkedMap};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::{ArcMetricsSnapshot, CacheMetricsSnapshot, MetricsSnapshotProvider};
pub use crate::policy::arc::{ArcCache, Residency};
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lru::LruCache;
#[cfg(feature = "concurrency")]
pub use crate::sync::SharedCache;
pub use crate::traits::{
    CoreCache, LfuCacheTrait, LruCacheTrait, MutableCache, ReadOnlyCache,
};
