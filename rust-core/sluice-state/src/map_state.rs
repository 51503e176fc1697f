// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The backing map adapter.
//
// `DocMapState` translates batched key/value state operations into
// document-store calls through the row mapper. It holds no cache and no
// retry logic: the consistency engine above it owns both. A call either
// fully succeeds or fully fails, with one tolerated per-key exception:
// a key whose predicate matches more than one stored document reads as
// absent, and the batch still returns one entry per requested key.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use sluice_store::{CollectionHandle, StoreClient, WriteOp};

use crate::config::MapOptions;
use crate::error::StateError;
use crate::key::RowKey;
use crate::mapper::RowMapper;
use crate::metrics::MapMetrics;

/// The keyed batch storage capability a consistency engine builds upon.
///
/// `multi_get` returns one entry per requested key, in request order.
/// `multi_put` writes each pair as one ordered bulk call. Neither
/// operation retries, caches, or merges; the engine composing this
/// capability owns those concerns.
#[async_trait]
pub trait BackingMap: Send + Sync {
    /// The opaque value payload.
    type Value: Clone + Send + Sync + 'static;

    /// Read one optional value per key, preserving order and length.
    async fn multi_get(&self, keys: &[RowKey]) -> Result<Vec<Option<Self::Value>>, StateError>;

    /// Write one value per key as a single ordered bulk operation.
    /// The two slices must have equal length.
    async fn multi_put(&self, keys: &[RowKey], values: &[Self::Value]) -> Result<(), StateError>;
}

/// The document-store backing map.
pub struct DocMapState<M: RowMapper> {
    mapper: Arc<M>,
    collection: Arc<dyn CollectionHandle>,
    metrics: Arc<MapMetrics>,
}

impl<M: RowMapper> DocMapState<M> {
    /// Resolve the target collection through the shared client and build
    /// the adapter. The collection handle is resolved once and reused for
    /// the adapter's lifetime.
    pub async fn new(
        client: &StoreClient,
        mapper: Arc<M>,
        options: &MapOptions,
    ) -> Result<Self, StateError> {
        let collection = client
            .collection(&options.database, &options.collection)
            .await?;
        Ok(Self::with_collection(mapper, collection))
    }

    /// Build the adapter over an already-resolved collection handle.
    pub fn with_collection(mapper: Arc<M>, collection: Arc<dyn CollectionHandle>) -> Self {
        Self {
            mapper,
            collection,
            metrics: Arc::new(MapMetrics::new()),
        }
    }

    /// The adapter's counters, for host metrics registration.
    pub fn metrics(&self) -> Arc<MapMetrics> {
        Arc::clone(&self.metrics)
    }
}

#[async_trait]
impl<M: RowMapper> BackingMap for DocMapState<M> {
    type Value = M::Value;

    async fn multi_get(&self, keys: &[RowKey]) -> Result<Vec<Option<M::Value>>, StateError> {
        let mut values = Vec::with_capacity(keys.len());
        for key in keys {
            let predicate = self.mapper.retrieve(key)?;
            let docs = match self.collection.find(&predicate, None).await {
                Ok(docs) => docs,
                Err(e) => {
                    self.metrics.incr_exceptions();
                    return Err(e.into());
                }
            };
            match docs.as_slice() {
                [] => values.push(None),
                [doc] => values.push(Some(self.mapper.decode(doc)?)),
                _ => {
                    // Data-integrity fault, tolerated per key: the entry
                    // reads as absent and the batch still succeeds.
                    error!(?key, matches = docs.len(), "found non-unique value for key");
                    values.push(None);
                }
            }
        }
        self.metrics.add_reads(keys.len() as u64);
        debug!(keys = keys.len(), "multi_get complete");
        Ok(values)
    }

    async fn multi_put(&self, keys: &[RowKey], values: &[M::Value]) -> Result<(), StateError> {
        if keys.len() != values.len() {
            return Err(StateError::LengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        debug!(keys = keys.len(), "multi_put");

        let mut ops = Vec::with_capacity(keys.len());
        for (key, value) in keys.iter().zip(values) {
            ops.push(WriteOp::Insert {
                document: self.mapper.map(key, value)?,
            });
        }

        if let Err(e) = self.collection.bulk_write(&ops).await {
            self.metrics.incr_exceptions();
            return Err(e.into());
        }
        self.metrics.add_writes(keys.len() as u64);
        Ok(())
    }
}
