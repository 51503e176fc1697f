// SPDX-License-Identifier: PMPL-1.0-or-later
//! Sluice State Layer
//!
//! Persists keyed state from a streaming-computation engine into a
//! document-oriented store, under one of three interchangeable consistency
//! levels (none / transactional / opaque) implemented by an external
//! consistency engine. This crate owns the batched backing-map adapter
//! ([`map_state::DocMapState`]), the local read/write cache
//! ([`cache::CachedMap`]), the mutation-log committer ([`state::DocState`])
//! and the consistency selector ([`factory`]); it deliberately owns neither
//! merge logic nor retry policy, which live in the layer above.

pub mod cache;
pub mod config;
pub mod error;
pub mod factory;
pub mod key;
pub mod map_state;
pub mod mapper;
pub mod metrics;
pub mod operation;
pub mod state;
pub mod updater;

// Re-export the primary public API for ergonomic imports.
pub use cache::CachedMap;
pub use config::{MapOptions, StateConfig};
pub use error::StateError;
pub use factory::{ConsistencyEngine, MapStateFactory, StateFactory, StateType};
pub use key::{KeyPart, RowKey};
pub use map_state::{BackingMap, DocMapState};
pub use mapper::RowMapper;
pub use metrics::{MapMetrics, MetricsSnapshot};
pub use operation::CrudOperation;
pub use state::{DocState, DEFAULT_MAX_BATCH_SIZE};
pub use updater::StateUpdater;
