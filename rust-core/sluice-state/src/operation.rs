// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pending CRUD operations.
//
// The mutation log accumulates these between commits. Insert and Update
// translate into bulk write operations; Query is a pure read that exists
// only for eager execution via `DocState::execute` and contributes nothing
// to a bulk write, while still counting toward chunk boundaries.

use sluice_store::{Document, WriteOp};

/// One pending operation in the mutation log. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub enum CrudOperation {
    /// Unconditionally insert a document.
    Insert {
        /// The document to insert.
        document: Document,
    },
    /// Merge `update` into every document matching `filter`.
    Update {
        /// Equality predicate selecting the documents to update.
        filter: Document,
        /// Fields to merge into each match.
        update: Document,
    },
    /// A pure read; a no-op at commit time.
    Query {
        /// Equality predicate for the read.
        filter: Document,
        /// Optional projection limiting the returned fields.
        projection: Option<Document>,
    },
}

impl CrudOperation {
    /// Translate into a bulk write operation. Query yields `None`.
    pub fn into_write_op(self) -> Option<WriteOp> {
        match self {
            CrudOperation::Insert { document } => Some(WriteOp::Insert { document }),
            CrudOperation::Update { filter, update } => Some(WriteOp::Update { filter, update }),
            CrudOperation::Query { .. } => None,
        }
    }

    /// The read predicate, for Query operations.
    pub fn filter(&self) -> Option<&Document> {
        match self {
            CrudOperation::Query { filter, .. } => Some(filter),
            CrudOperation::Update { filter, .. } => Some(filter),
            CrudOperation::Insert { .. } => None,
        }
    }

    /// The projection, for Query operations that carry one.
    pub fn projection(&self) -> Option<&Document> {
        match self {
            CrudOperation::Query { projection, .. } => projection.as_ref(),
            _ => None,
        }
    }
}
