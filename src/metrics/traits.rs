//! # Metrics Trait Hierarchy
//!
//! Recording and snapshotting are split into small traits so that policy code
//! only ever *writes* counters, while benches and tests only *read* them.
//!
//! ```text
//!                 ┌─────────────────────────────┐
//!                 │     CoreMetricsRecorder     │
//!                 │  get_hit/get_miss/insert    │
//!                 │  evicted_entry/clear        │
//!                 └──────────────┬──────────────┘
//!                                │
//!                                ▼
//!                 ┌─────────────────────────────┐
//!                 │     ArcMetricsRecorder      │
//!                 │  promotions, ghost hits,    │
//!                 │  p moves, T1/T2 evictions   │
//!                 └─────────────────────────────┘
//!
//!   MetricsSnapshotProvider<S>: copy counters + gauges out as a plain struct
//! ```

/// Counters shared by every policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// ARC-specific signals.
pub trait ArcMetricsRecorder: CoreMetricsRecorder {
    fn record_t1_to_t2_promotion(&mut self);
    fn record_b1_ghost_hit(&mut self);
    fn record_b2_ghost_hit(&mut self);
    fn record_p_increase(&mut self);
    fn record_p_decrease(&mut self);
    fn record_t1_eviction(&mut self);
    fn record_t2_eviction(&mut self);
}

/// Produces a point-in-time copy of a cache's metrics.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}
