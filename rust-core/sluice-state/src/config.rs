// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Configuration surface.
//
// The host engine hands the adapter a flat string-keyed property set; this
// module parses it into an explicit config record once, at construction.
// The host list is the only mandatory property; everything else has the
// defaults the adapter has always shipped with.

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::StateError;

/// Comma-separated list of store cluster addresses. Mandatory.
pub const STORE_HOSTS: &str = "sluice.store.hosts";
/// Target database name.
pub const STORE_DATABASE: &str = "sluice.store.db";
/// Target collection name.
pub const STORE_COLLECTION: &str = "sluice.store.coll";
/// Capacity of the local read/write cache injected in front of the map.
pub const LOCAL_CACHE_SIZE: &str = "sluice.state.cache.size";
/// The fixed key under which the engine aggregates a single state cell.
pub const GLOBAL_KEY: &str = "sluice.state.global.key";
/// Maximum operations per bulk-write chunk at commit time.
pub const MAX_BATCH_SIZE: &str = "sluice.state.batch.size";
/// The host engine's metrics bucket interval, in seconds.
pub const METRICS_BUCKET_SECS: &str = "sluice.metrics.bucket.secs";

const DEFAULT_DATABASE: &str = "test";
const DEFAULT_COLLECTION: &str = "mycollection";
const DEFAULT_CACHE_SIZE: usize = 5000;
const DEFAULT_GLOBAL_KEY: &str = "globalkey";
const DEFAULT_MAX_BATCH_SIZE: usize = 100;
const DEFAULT_BUCKET_SECS: u64 = 60;

/// Parsed adapter configuration. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateConfig {
    /// Store cluster addresses, in the order given.
    pub hosts: Vec<String>,
    /// Target database name.
    pub database: String,
    /// Target collection name.
    pub collection: String,
    /// Local cache capacity.
    pub local_cache_size: usize,
    /// Global aggregation key.
    pub global_key: String,
    /// Maximum operations per commit chunk.
    pub max_batch_size: usize,
    /// Host metrics bucket interval, seconds. Consumed by the host when
    /// registering the adapter's counters; unused inside the adapter.
    pub metrics_bucket_secs: u64,
}

impl StateConfig {
    /// Parse a flat property set.
    pub fn from_properties(props: &HashMap<String, String>) -> Result<Self, StateError> {
        let hosts_raw = props
            .get(STORE_HOSTS)
            .ok_or(StateError::MissingProperty(STORE_HOSTS))?;
        let hosts: Vec<String> = hosts_raw
            .split(',')
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .collect();
        if hosts.is_empty() {
            return Err(StateError::InvalidProperty {
                key: STORE_HOSTS,
                value: hosts_raw.clone(),
                message: "no usable host addresses".to_string(),
            });
        }

        Ok(Self {
            hosts,
            database: string_prop(props, STORE_DATABASE, DEFAULT_DATABASE),
            collection: string_prop(props, STORE_COLLECTION, DEFAULT_COLLECTION),
            local_cache_size: parsed_prop(props, LOCAL_CACHE_SIZE, DEFAULT_CACHE_SIZE)?,
            global_key: string_prop(props, GLOBAL_KEY, DEFAULT_GLOBAL_KEY),
            max_batch_size: parsed_prop(props, MAX_BATCH_SIZE, DEFAULT_MAX_BATCH_SIZE)?,
            metrics_bucket_secs: parsed_prop(props, METRICS_BUCKET_SECS, DEFAULT_BUCKET_SECS)?,
        })
    }
}

fn string_prop(props: &HashMap<String, String>, key: &'static str, default: &str) -> String {
    props
        .get(key)
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

fn parsed_prop<T>(
    props: &HashMap<String, String>,
    key: &'static str,
    default: T,
) -> Result<T, StateError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match props.get(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| StateError::InvalidProperty {
            key,
            value: raw.clone(),
            message: e.to_string(),
        }),
    }
}

/// The options record the backing map adapter reads once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapOptions {
    /// Capacity of the local read/write cache in front of the map.
    pub local_cache_size: usize,
    /// The fixed aggregation key handed to the consistency engine.
    pub global_key: String,
    /// Target database name.
    pub database: String,
    /// Target collection name.
    pub collection: String,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            local_cache_size: DEFAULT_CACHE_SIZE,
            global_key: DEFAULT_GLOBAL_KEY.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

impl MapOptions {
    /// Derive the options record from a parsed configuration.
    pub fn from_config(config: &StateConfig) -> Self {
        Self {
            local_cache_size: config.local_cache_size,
            global_key: config.global_key.clone(),
            database: config.database.clone(),
            collection: config.collection.clone(),
        }
    }
}
