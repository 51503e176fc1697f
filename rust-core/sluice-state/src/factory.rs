// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The consistency selector.
//
// Nothing here implements consistency. The factories decide which mode the
// externally supplied consistency engine should build, construct the
// backing map adapter, inject the fixed-capacity local cache in front of
// it, and hand the cache-wrapped map across the capability boundary. The
// same multi_get/multi_put contract holds regardless of the mode wrapping
// it; the adapter stays mode-agnostic.

use std::sync::Arc;

use tracing::debug;

use sluice_store::{StoreClient, StoreDriver};

use crate::cache::CachedMap;
use crate::config::{MapOptions, StateConfig};
use crate::error::StateError;
use crate::key::{KeyPart, RowKey};
use crate::map_state::{BackingMap, DocMapState};
use crate::mapper::RowMapper;
use crate::metrics::MapMetrics;
use crate::state::DocState;

/// The three interchangeable consistency levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateType {
    /// No consistency guarantees; raw values.
    NonTransactional,
    /// Values carry one transaction id; safe under replay of identical
    /// batches.
    Transactional,
    /// Values carry last-committed and in-flight versions; safe under
    /// partial replay.
    Opaque,
}

/// The externally supplied engine that layers versioning and merge
/// semantics over a backing map. The adapter never performs merge logic
/// itself; it only satisfies the [`BackingMap`] capability this trait
/// consumes.
pub trait ConsistencyEngine: Send + Sync {
    /// The value payload the engine stores through the map.
    type Value: Clone + Send + Sync + 'static;
    /// The engine's finished map-state object, including its aggregation
    /// wrapper keyed by the global key.
    type MapState;

    /// Wrap `map` with the semantics of `mode`. `global_key` is the fixed
    /// key under which the engine aggregates a single logical state cell.
    fn build(
        &self,
        mode: StateType,
        map: Box<dyn BackingMap<Value = Self::Value>>,
        global_key: RowKey,
    ) -> Self::MapState;
}

/// Builds one cache-wrapped backing map per partition and hands it to the
/// consistency engine.
pub struct MapStateFactory<M: RowMapper> {
    mapper: Arc<M>,
    mode: StateType,
    options: MapOptions,
}

impl<M: RowMapper + 'static> MapStateFactory<M> {
    /// An opaque-mode factory with default options.
    pub fn opaque(mapper: Arc<M>) -> Self {
        Self::with_options(mapper, StateType::Opaque, MapOptions::default())
    }

    /// A transactional-mode factory with default options.
    pub fn transactional(mapper: Arc<M>) -> Self {
        Self::with_options(mapper, StateType::Transactional, MapOptions::default())
    }

    /// A non-transactional-mode factory with default options.
    pub fn non_transactional(mapper: Arc<M>) -> Self {
        Self::with_options(mapper, StateType::NonTransactional, MapOptions::default())
    }

    /// A factory with explicit mode and options.
    pub fn with_options(mapper: Arc<M>, mode: StateType, options: MapOptions) -> Self {
        Self { mapper, mode, options }
    }

    /// The mode this factory selects.
    pub fn mode(&self) -> StateType {
        self.mode
    }

    /// The options this factory builds adapters with.
    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Build the map state for one partition: adapter, then cache, then
    /// the engine's wrapper. Returns the engine's map state together with
    /// the adapter's counters for host metrics registration.
    pub async fn make_state<E>(
        &self,
        client: &StoreClient,
        engine: &E,
        partition_index: usize,
        num_partitions: usize,
    ) -> Result<(E::MapState, Arc<MapMetrics>), StateError>
    where
        E: ConsistencyEngine<Value = M::Value>,
    {
        debug!(
            partition_index,
            num_partitions,
            mode = ?self.mode,
            "creating map state for partition"
        );
        let map = DocMapState::new(client, Arc::clone(&self.mapper), &self.options).await?;
        let metrics = map.metrics();
        let cached = CachedMap::new(map, self.options.local_cache_size);
        let global_key: RowKey = vec![KeyPart::from(self.options.global_key.as_str())];
        let state = engine.build(self.mode, Box::new(cached), global_key);
        Ok((state, metrics))
    }
}

/// The coarse-grained factory for the mutation-log path. Owns the shared
/// store client: one client per factory, built eagerly, passed by
/// reference to every partition's state.
pub struct StateFactory {
    client: Arc<StoreClient>,
    config: StateConfig,
}

impl StateFactory {
    /// Build the factory and its shared client. The physical connection is
    /// still established lazily, on the first store call.
    pub fn new(driver: Box<dyn StoreDriver>, config: StateConfig) -> Self {
        let client = Arc::new(StoreClient::new(driver, config.hosts.clone()));
        Self { client, config }
    }

    /// The shared client, for callers that also run map states against the
    /// same cluster.
    pub fn client(&self) -> Arc<StoreClient> {
        Arc::clone(&self.client)
    }

    /// The parsed configuration this factory was built with.
    pub fn config(&self) -> &StateConfig {
        &self.config
    }

    /// Create the mutation-log state for one partition.
    pub async fn make_state(
        &self,
        partition_index: usize,
        num_partitions: usize,
    ) -> Result<DocState, StateError> {
        debug!(partition_index, num_partitions, "creating state for partition");
        DocState::with_batch_size(
            &self.client,
            &self.config.database,
            &self.config.collection,
            self.config.max_batch_size,
        )
        .await
    }
}
