// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Error types for the Sluice state layer.
//
// The taxonomy follows the call contract: store faults propagate from the
// client crate, mapper and length-mismatch faults are caller-contract
// violations that abort the whole call, and configuration faults name the
// offending property. Per-key non-uniqueness is deliberately NOT an error
// here; the adapter resolves it to an absent entry.

use thiserror::Error;

use sluice_store::StoreError;

/// Errors that can occur in the state adapter.
#[derive(Debug, Error)]
pub enum StateError {
    /// A connectivity or protocol fault from the store layer.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A row mapper failed to translate between tuples and documents.
    /// Mapper faults are caller-contract violations and abort the call.
    #[error("row mapper fault: {0}")]
    Mapper(String),

    /// `multi_put` was called with key and value lists of different
    /// lengths.
    #[error("key/value length mismatch: {keys} keys, {values} values")]
    LengthMismatch {
        /// Number of keys passed.
        keys: usize,
        /// Number of values passed.
        values: usize,
    },

    /// A required configuration property is absent.
    #[error("missing configuration property: {0}")]
    MissingProperty(&'static str),

    /// A configuration property is present but malformed.
    #[error("invalid value {value:?} for property {key}: {message}")]
    InvalidProperty {
        /// The property name.
        key: &'static str,
        /// The raw value that failed to parse.
        value: String,
        /// Parse failure detail.
        message: String,
    },
}
