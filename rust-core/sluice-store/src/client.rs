// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Store connection manager.
//
// One `StoreClient` is shared by reference across every state partition of
// a process. It owns exactly one physical connection, established lazily on
// first use, and memoizes one database handle per name. Both the connection
// slot and the handle cache are mutex-guarded so concurrent partitions
// never construct duplicates.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::driver::{CollectionHandle, DatabaseHandle, StoreConnection, StoreDriver};
use crate::error::StoreError;

/// Process-wide connection manager for one document-store cluster.
///
/// # Example
///
/// ```rust
/// use sluice_store::{MemoryDriver, StoreClient};
///
/// # tokio_test::block_on(async {
/// let client = StoreClient::new(
///     Box::new(MemoryDriver::new()),
///     vec!["localhost:27017".to_string()],
/// );
/// let coll = client.collection("test", "words").await.unwrap();
/// coll.bulk_write(&[]).await.unwrap();
/// # });
/// ```
pub struct StoreClient {
    driver: Box<dyn StoreDriver>,
    hosts: Vec<String>,
    connection: Mutex<Option<Arc<dyn StoreConnection>>>,
    databases: Mutex<HashMap<String, Arc<dyn DatabaseHandle>>>,
}

impl StoreClient {
    /// Create a client for the cluster at `hosts`. No connection is made
    /// until the first handle is requested.
    pub fn new(driver: Box<dyn StoreDriver>, hosts: Vec<String>) -> Self {
        Self {
            driver,
            hosts,
            connection: Mutex::new(None),
            databases: Mutex::new(HashMap::new()),
        }
    }

    /// The host list this client connects to.
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// Return the shared connection, establishing it on first use.
    ///
    /// A resolution failure propagates and leaves the slot empty, so the
    /// next call retries instead of reusing a broken handle.
    async fn connection(&self) -> Result<Arc<dyn StoreConnection>, StoreError> {
        let mut slot = self.connection.lock().await;
        if let Some(conn) = slot.as_ref() {
            return Ok(Arc::clone(conn));
        }
        debug!(hosts = ?self.hosts, "establishing store connection");
        let conn = self.driver.connect(&self.hosts).await?;
        *slot = Some(Arc::clone(&conn));
        Ok(conn)
    }

    /// Return the handle for database `name`, creating and memoizing it on
    /// first request. The same name always yields the same handle.
    pub async fn database(&self, name: &str) -> Result<Arc<dyn DatabaseHandle>, StoreError> {
        let mut databases = self.databases.lock().await;
        if let Some(db) = databases.get(name) {
            return Ok(Arc::clone(db));
        }
        debug!(database = name, "constructing database handle");
        let conn = self.connection().await?;
        let db = conn.database(name);
        databases.insert(name.to_string(), Arc::clone(&db));
        Ok(db)
    }

    /// Return the collection handle for `collection` in `database`. Thin
    /// pass-through; not cached beyond what the driver itself caches.
    pub async fn collection(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<Arc<dyn CollectionHandle>, StoreError> {
        let db = self.database(database).await?;
        Ok(db.collection(collection))
    }
}

impl std::fmt::Debug for StoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreClient")
            .field("hosts", &self.hosts)
            .finish_non_exhaustive()
    }
}
