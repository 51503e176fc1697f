// SPDX-License-Identifier: PMPL-1.0-or-later
//! Sluice Store Client
//!
//! The boundary between the Sluice state adapter and the document store it
//! persists into. The wire protocol belongs to the driver behind the
//! [`driver::StoreDriver`] capability trait; this crate provides the
//! document model, the ordered bulk-write primitives, an in-memory driver
//! for tests and development, and the connection manager that shares one
//! physical connection (and one database handle per name) across all state
//! partitions of a process.

pub mod client;
pub mod document;
pub mod driver;
pub mod error;
pub mod memory;

// Re-export the most commonly used types at the crate root.
pub use client::StoreClient;
pub use document::Document;
pub use driver::{BulkSummary, CollectionHandle, DatabaseHandle, StoreConnection, StoreDriver, WriteOp};
pub use error::StoreError;
pub use memory::{MemoryDriver, MemoryStore};
