// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The mutation log and committer.
//
// `DocState` accumulates free-form CRUD operations between commits and
// flushes them in bounded-size chunks, each chunk one ordered bulk write.
// Chunk boundaries are a performance knob only; they carry no
// transactional meaning across chunks. A chunk failure aborts the rest of
// the commit: already-flushed chunks stay applied, unflushed operations
// are dropped and must be re-derived by the caller on retry.

use std::sync::Arc;

use tracing::debug;

use sluice_store::{CollectionHandle, Document, StoreClient, WriteOp};

use crate::error::StateError;
use crate::operation::CrudOperation;

/// Default maximum operations per commit chunk.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 100;

/// A per-partition mutation log against one collection.
///
/// Instances are owned by a single partition and are not shared; the
/// collection handle they hold may be shared freely.
pub struct DocState {
    collection: Arc<dyn CollectionHandle>,
    max_batch_size: usize,
    operations: Vec<CrudOperation>,
}

impl DocState {
    /// Resolve `database`/`collection` through the shared client and build
    /// a state with the default chunk size.
    pub async fn new(
        client: &StoreClient,
        database: &str,
        collection: &str,
    ) -> Result<Self, StateError> {
        Self::with_batch_size(client, database, collection, DEFAULT_MAX_BATCH_SIZE).await
    }

    /// As [`DocState::new`], with an explicit chunk size. A zero size is
    /// clamped to one operation per chunk.
    pub async fn with_batch_size(
        client: &StoreClient,
        database: &str,
        collection: &str,
        max_batch_size: usize,
    ) -> Result<Self, StateError> {
        let collection = client.collection(database, collection).await?;
        Ok(Self::with_collection(collection, max_batch_size))
    }

    /// Build a state over an already-resolved collection handle.
    pub fn with_collection(collection: Arc<dyn CollectionHandle>, max_batch_size: usize) -> Self {
        Self {
            collection,
            max_batch_size: max_batch_size.max(1),
            operations: Vec::new(),
        }
    }

    /// Append a pending operation to the log. No I/O.
    pub fn add_operation(&mut self, operation: CrudOperation) {
        self.operations.push(operation);
    }

    /// Number of operations currently pending.
    pub fn pending_len(&self) -> usize {
        self.operations.len()
    }

    /// First half of the engine's two-phase commit notification. Retained
    /// for interface compatibility; changes no state.
    pub fn begin_commit(&mut self, _txid: u64) {}

    /// Flush the pending log in insertion order, one ordered bulk write
    /// per chunk of at most `max_batch_size` operations.
    ///
    /// Query operations count toward chunk boundaries but contribute no
    /// writes. The trailing chunk is always flushed, even when it carries
    /// no operations; drivers accept the empty bulk call as a no-op. On a
    /// chunk failure the error propagates, later chunks are never sent,
    /// and the drained log is not restored.
    pub async fn commit(&mut self, txid: u64) -> Result<(), StateError> {
        debug!(txid, pending = self.operations.len(), "committing");
        let operations = std::mem::take(&mut self.operations);

        let mut chunk: Vec<WriteOp> = Vec::new();
        let mut chunk_ops = 0usize;
        for operation in operations {
            if let Some(write) = operation.into_write_op() {
                chunk.push(write);
            }
            chunk_ops += 1;
            if chunk_ops >= self.max_batch_size {
                self.collection.bulk_write(&chunk).await?;
                chunk.clear();
                chunk_ops = 0;
            }
        }
        // The trailing chunk is flushed unconditionally.
        self.collection.bulk_write(&chunk).await?;
        Ok(())
    }

    /// An immediate, unbatched read, independent of the pending log.
    pub async fn execute(
        &self,
        filter: &Document,
        projection: Option<&Document>,
    ) -> Result<Vec<Document>, StateError> {
        Ok(self.collection.find(filter, projection).await?)
    }
}
