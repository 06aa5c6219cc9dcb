//! Optional per-policy counters, enabled with the `metrics` feature.

pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use metrics_impl::{ArcMetrics, CacheMetrics};
pub use snapshot::{ArcMetricsSnapshot, CacheMetricsSnapshot};
pub use traits::{ArcMetricsRecorder, CoreMetricsRecorder, MetricsSnapshotProvider};
