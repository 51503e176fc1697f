// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Error types for the Sluice store client layer.
//
// Connectivity faults must always surface to the caller: a failed address
// resolution never produces a usable-looking but broken handle.

use thiserror::Error;

/// Errors that can occur when talking to the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The configured host list is empty or contains a blank entry.
    #[error("invalid host list: {0}")]
    InvalidHostList(String),

    /// Address resolution or connection establishment failed.
    #[error("connection to [{hosts}] failed: {message}")]
    Connect {
        /// The comma-joined host list that was being connected to.
        hosts: String,
        /// Driver-reported failure detail.
        message: String,
    },

    /// An ordered bulk write failed. Operations before `index` (when known)
    /// were applied; nothing after it was.
    #[error("bulk write failed{}: {message}", .index.map(|i| format!(" at operation {i}")).unwrap_or_default())]
    BulkWrite {
        /// Position of the failing operation within the bulk call, if the
        /// driver can attribute the failure to one.
        index: Option<usize>,
        /// Driver-reported failure detail.
        message: String,
    },

    /// A read against a collection failed at the protocol level.
    #[error("query failed: {0}")]
    Query(String),

    /// An I/O error in the underlying transport.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other driver-level failure.
    #[error("driver error: {0}")]
    Driver(String),
}
