// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Driver capability traits for the Sluice store layer.
//
// These traits define what the state adapter needs from a document-store
// driver and nothing more: address resolution, database/collection handle
// lookup, predicate reads, and ordered bulk writes. Connection pooling,
// timeouts, and the wire protocol all live behind this boundary, inside
// the driver implementation.

use std::sync::Arc;

use async_trait::async_trait;

use crate::document::Document;
use crate::error::StoreError;

/// One operation inside an ordered bulk write.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Unconditionally insert a document. Duplicate suppression, if any,
    /// is the store's own unique-index behavior, not logic here.
    Insert {
        /// The document to insert.
        document: Document,
    },
    /// Apply `update` to every document matching `filter`, merging the
    /// update document's fields into each match.
    Update {
        /// Equality predicate selecting the documents to update.
        filter: Document,
        /// Fields to merge into each matching document.
        update: Document,
    },
}

/// Result of one ordered bulk write: a single store round-trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkSummary {
    /// Number of documents inserted.
    pub inserted: u64,
    /// Number of documents modified by updates.
    pub modified: u64,
}

/// Resolves a host list into a live store connection.
///
/// Implementations must fail with a [`StoreError`] when resolution fails;
/// returning a handle that is not actually connected is a contract
/// violation the rest of the stack cannot recover from.
#[async_trait]
pub trait StoreDriver: Send + Sync {
    /// Establish a connection to the cluster at `hosts`.
    async fn connect(&self, hosts: &[String]) -> Result<Arc<dyn StoreConnection>, StoreError>;
}

impl std::fmt::Debug for dyn StoreConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn StoreConnection")
    }
}

impl std::fmt::Debug for dyn DatabaseHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn DatabaseHandle")
    }
}

impl std::fmt::Debug for dyn CollectionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn CollectionHandle")
    }
}

/// A live connection to a store cluster.
pub trait StoreConnection: Send + Sync {
    /// Access the database named `name`. Databases spring into existence
    /// on first write, so this is infallible handle construction.
    fn database(&self, name: &str) -> Arc<dyn DatabaseHandle>;
}

/// A handle to one database within the store.
pub trait DatabaseHandle: Send + Sync {
    /// The database name this handle refers to.
    fn name(&self) -> &str;

    /// Access the collection named `name` within this database.
    fn collection(&self, name: &str) -> Arc<dyn CollectionHandle>;
}

/// A handle to one collection; the unit reads and bulk writes target.
///
/// Implementations must be safe to call concurrently from multiple state
/// partitions sharing one handle.
#[async_trait]
pub trait CollectionHandle: Send + Sync {
    /// Return every document matching `filter`, optionally reduced to the
    /// fields named by `projection`.
    async fn find(
        &self,
        filter: &Document,
        projection: Option<&Document>,
    ) -> Result<Vec<Document>, StoreError>;

    /// Execute `ops` as one ordered bulk call. An empty `ops` slice is a
    /// valid no-op and must succeed with an all-zero summary.
    async fn bulk_write(&self, ops: &[WriteOp]) -> Result<BulkSummary, StoreError>;
}
