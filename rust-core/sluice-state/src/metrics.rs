// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Adapter counters exposed to the host engine.
//
// The host registers these against its own metrics bucket (the bucket
// interval lives in the configuration surface; registration is a host
// concern). Counters are bump-only atomics so partitions can share them
// without locking.

use std::sync::atomic::{AtomicU64, Ordering};

/// Read/write/exception counters for one backing map adapter.
#[derive(Debug, Default)]
pub struct MapMetrics {
    reads: AtomicU64,
    writes: AtomicU64,
    exceptions: AtomicU64,
}

/// A point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Keys read across all successful `multi_get` batches.
    pub reads: u64,
    /// Keys written across all successful `multi_put` batches.
    pub writes: u64,
    /// Failed store batches (reads and writes).
    pub exceptions: u64,
}

impl MapMetrics {
    /// Create zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `n` keys read by a successful batch.
    pub fn add_reads(&self, n: u64) {
        self.reads.fetch_add(n, Ordering::Relaxed);
    }

    /// Record `n` keys written by a successful batch.
    pub fn add_writes(&self, n: u64) {
        self.writes.fetch_add(n, Ordering::Relaxed);
    }

    /// Record one failed store batch.
    pub fn incr_exceptions(&self) {
        self.exceptions.fetch_add(1, Ordering::Relaxed);
    }

    /// Copy out the current counter values.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            reads: self.reads.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            exceptions: self.exceptions.load(Ordering::Relaxed),
        }
    }
}
