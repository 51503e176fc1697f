// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory store driver for Sluice.
//
// Databases map to collections map to plain document vectors, all behind a
// single `RwLock`. Inserts append unconditionally, so duplicate documents
// for one logical key are representable (the state layer must tolerate
// them). Intended for testing, development, and small ephemeral datasets.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{self, Document};
use crate::driver::{
    BulkSummary, CollectionHandle, DatabaseHandle, StoreConnection, StoreDriver, WriteOp,
};
use crate::error::StoreError;

type Collections = HashMap<String, Vec<Document>>;

/// Shared in-memory storage: database name -> collection name -> documents.
///
/// Cloning shares the underlying data, so a test can keep a handle to the
/// store it hands to a [`MemoryDriver`] and inspect what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<HashMap<String, Collections>>>,
}

impl MemoryStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the documents currently held by `database`/`collection`.
    pub async fn documents(&self, database: &str, collection: &str) -> Vec<Document> {
        let data = self.data.read().await;
        data.get(database)
            .and_then(|colls| colls.get(collection))
            .cloned()
            .unwrap_or_default()
    }

    /// Number of documents in `database`/`collection`.
    pub async fn len(&self, database: &str, collection: &str) -> usize {
        self.documents(database, collection).await.len()
    }

    /// True if `database`/`collection` holds no documents.
    pub async fn is_empty(&self, database: &str, collection: &str) -> bool {
        self.len(database, collection).await == 0
    }
}

/// An in-memory [`StoreDriver`] over a [`MemoryStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryDriver {
    store: MemoryStore,
}

impl MemoryDriver {
    /// Create a driver with its own private store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a driver over an existing store, sharing its data.
    pub fn with_store(store: MemoryStore) -> Self {
        Self { store }
    }

    /// The store behind this driver.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }
}

#[async_trait]
impl StoreDriver for MemoryDriver {
    async fn connect(&self, hosts: &[String]) -> Result<Arc<dyn StoreConnection>, StoreError> {
        if hosts.is_empty() {
            return Err(StoreError::InvalidHostList("empty host list".to_string()));
        }
        if let Some(blank) = hosts.iter().find(|h| h.trim().is_empty()) {
            return Err(StoreError::InvalidHostList(format!(
                "blank host entry {blank:?}"
            )));
        }
        Ok(Arc::new(MemoryConnection {
            store: self.store.clone(),
        }))
    }
}

struct MemoryConnection {
    store: MemoryStore,
}

impl StoreConnection for MemoryConnection {
    fn database(&self, name: &str) -> Arc<dyn DatabaseHandle> {
        Arc::new(MemoryDatabase {
            store: self.store.clone(),
            name: name.to_string(),
        })
    }
}

struct MemoryDatabase {
    store: MemoryStore,
    name: String,
}

impl DatabaseHandle for MemoryDatabase {
    fn name(&self) -> &str {
        &self.name
    }

    fn collection(&self, name: &str) -> Arc<dyn CollectionHandle> {
        Arc::new(MemoryCollection {
            store: self.store.clone(),
            database: self.name.clone(),
            name: name.to_string(),
        })
    }
}

struct MemoryCollection {
    store: MemoryStore,
    database: String,
    name: String,
}

#[async_trait]
impl CollectionHandle for MemoryCollection {
    async fn find(
        &self,
        filter: &Document,
        projection: Option<&Document>,
    ) -> Result<Vec<Document>, StoreError> {
        let data = self.store.data.read().await;
        let docs = data
            .get(&self.database)
            .and_then(|colls| colls.get(&self.name));
        let Some(docs) = docs else {
            return Ok(Vec::new());
        };
        let results = docs
            .iter()
            .filter(|doc| document::matches(filter, doc))
            .map(|doc| match projection {
                Some(fields) => document::project(doc, fields),
                None => doc.clone(),
            })
            .collect();
        Ok(results)
    }

    async fn bulk_write(&self, ops: &[WriteOp]) -> Result<BulkSummary, StoreError> {
        let mut data = self.store.data.write().await;
        let docs = data
            .entry(self.database.clone())
            .or_default()
            .entry(self.name.clone())
            .or_default();

        let mut summary = BulkSummary::default();
        for op in ops {
            match op {
                WriteOp::Insert { document } => {
                    docs.push(document.clone());
                    summary.inserted += 1;
                }
                WriteOp::Update { filter, update } => {
                    for doc in docs.iter_mut().filter(|d| document::matches(filter, d)) {
                        for (k, v) in update {
                            doc.insert(k.clone(), v.clone());
                        }
                        summary.modified += 1;
                    }
                }
            }
        }
        Ok(summary)
    }
}
