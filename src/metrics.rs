use std::sync::atomic::{AtomicU64, Ordering};

use crate::summarizer::SummaryOutcome;

/// Thread-safe counters describing summarization activity.
#[derive(Default)]
pub struct SummaryMetrics {
    documents_summarized: AtomicU64,
    chunks_summarized: AtomicU64,
    model_calls: AtomicU64,
    recombination_passes: AtomicU64,
    failures: AtomicU64,
}

impl SummaryMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed summarization.
    pub fn record_summary(&self, outcome: &SummaryOutcome) {
        self.documents_summarized.fetch_add(1, Ordering::Relaxed);
        self.chunks_summarized
            .fetch_add(outcome.chunk_count as u64, Ordering::Relaxed);
        self.model_calls
            .fetch_add(outcome.model_calls as u64, Ordering::Relaxed);
        if outcome.recombined {
            self.recombination_passes.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a request that ended in an error.
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            documents_summarized: self.documents_summarized.load(Ordering::Relaxed),
            chunks_summarized: self.chunks_summarized.load(Ordering::Relaxed),
            model_calls: self.model_calls.load(Ordering::Relaxed),
            recombination_passes: self.recombination_passes.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of summarization counters used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Documents summarized successfully since startup.
    pub documents_summarized: u64,
    /// Chunks sent to the model across all documents.
    pub chunks_summarized: u64,
    /// Total model invocations, including recombination passes.
    pub model_calls: u64,
    /// Documents whose partial summaries needed a recombination pass.
    pub recombination_passes: u64,
    /// Requests rejected or failed for any reason.
    pub failures: u64,
}
