//! Structured logging and metrics for index reads.
//!
//! Scoped to the scan and posting-list operations the planner/FTS core
//! actually issues against this crate's traits — the donor's wider
//! put/delete/transaction metric set has no counterpart once the core is
//! read-only.
//!
//! # Usage
//!
//! ```rust
//! use storage::{track_operation, record_error, OperationType};
//!
//! let result = track_operation(OperationType::TripleScan, || -> Result<String, String> {
//!     Ok("success".to_string())
//! });
//! assert!(result.is_ok());
//!
//! let error = "test error";
//! record_error(OperationType::TripleScan, &error);
//! ```

use std::time::Instant;
use metrics::{counter, histogram};
use tracing::{debug, error, instrument};

/// Operation type for metrics tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    /// A triple-index scan (any `ScanVariant`).
    TripleScan,
    /// A word- or entity-posting-list read.
    PostingRead,
}

impl OperationType {
    /// Get metric name for this operation.
    pub fn metric_name(&self) -> &'static str {
        match self {
            OperationType::TripleScan => "storage.triple_scan",
            OperationType::PostingRead => "storage.posting_read",
        }
    }

    /// Get counter name for this operation.
    pub fn counter_name(&self) -> String {
        format!("{}.count", self.metric_name())
    }

    /// Get latency histogram name for this operation.
    pub fn latency_name(&self) -> String {
        format!("{}.latency_ms", self.metric_name())
    }

    /// Get error counter name for this operation.
    pub fn error_name(&self) -> String {
        format!("{}.errors", self.metric_name())
    }
}

/// Track an operation with automatic timing and metrics.
#[instrument(level = "debug", skip(f))]
pub fn track_operation<F, T, E>(op_type: OperationType, f: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    E: std::fmt::Debug,
{
    let start = Instant::now();

    let counter_name = op_type.counter_name();
    let latency_name = op_type.latency_name();
    let error_name = op_type.error_name();

    counter!(counter_name.clone()).increment(1);

    let result = f();

    let duration_ms = start.elapsed().as_micros() as f64 / 1000.0;
    histogram!(latency_name.clone()).record(duration_ms);

    match &result {
        Ok(_) => {
            debug!(op = ?op_type, latency_ms = duration_ms, "operation completed");
        }
        Err(e) => {
            counter!(error_name.clone()).increment(1);
            error!(op = ?op_type, latency_ms = duration_ms, error = ?e, "operation failed");
        }
    }

    result
}

/// Record an error for monitoring.
#[instrument(level = "error")]
pub fn record_error(op_type: OperationType, error: &dyn std::fmt::Debug) {
    let error_name = op_type.error_name();
    counter!(error_name.clone()).increment(1);
    tracing::error!(op = ?op_type, error = ?error, "operation error recorded");
}
