//! Timing seam for remote calls.
//!
//! The envelope reports the wall-clock duration of every round trip here,
//! keyed by operation name, success and failure alike. Callers that do not
//! collect metrics plug in [`NoopMetrics`].

use std::time::Duration;

/// Receives one measurement per remote call.
pub trait MetricsSink: Send + Sync {
    fn record(&self, operation: &str, elapsed: Duration);
}

/// Discards every measurement.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetrics;

impl MetricsSink for NoopMetrics {
    fn record(&self, _operation: &str, _elapsed: Duration) {}
}
