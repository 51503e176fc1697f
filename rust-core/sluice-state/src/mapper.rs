// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The row mapper capability.
//
// The adapter owns no document shape. Callers supply a mapper that
// translates between the engine's generic key/value tuples and the store's
// documents, in both directions. Any mapper failure is a caller-contract
// fault: the adapter propagates it and aborts the batch.

use sluice_store::Document;

use crate::error::StateError;
use crate::key::RowKey;
use crate::operation::CrudOperation;

/// Translates between engine tuples and store documents.
///
/// `Value` is the opaque payload the engine associates with a key. For the
/// transactional and opaque consistency modes it is a versioned envelope
/// owned by the external consistency engine; the adapter only passes it
/// through this mapper.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use sluice_state::error::StateError;
/// use sluice_state::key::{KeyPart, RowKey};
/// use sluice_state::mapper::RowMapper;
/// use sluice_state::operation::CrudOperation;
/// use sluice_store::Document;
///
/// struct WordCountMapper;
///
/// impl RowMapper for WordCountMapper {
///     type Value = i64;
///     type Tuple = (String, i64);
///
///     fn map(&self, key: &RowKey, value: &i64) -> Result<Document, StateError> {
///         let mut doc = self.retrieve(key)?;
///         doc.insert("count".to_string(), json!(value));
///         Ok(doc)
///     }
///
///     fn map_tuple(&self, (word, count): &(String, i64)) -> Result<CrudOperation, StateError> {
///         self.map(&vec![KeyPart::from(word.as_str())], count)
///             .map(|document| CrudOperation::Insert { document })
///     }
///
///     fn retrieve(&self, key: &RowKey) -> Result<Document, StateError> {
///         match key.as_slice() {
///             [word] => {
///                 let mut doc = Document::new();
///                 doc.insert("word".to_string(), word.to_value());
///                 Ok(doc)
///             }
///             _ => Err(StateError::Mapper(format!("expected 1 key part, got {}", key.len()))),
///         }
///     }
///
///     fn decode(&self, doc: &Document) -> Result<i64, StateError> {
///         doc.get("count")
///             .and_then(|v| v.as_i64())
///             .ok_or_else(|| StateError::Mapper("document has no count field".to_string()))
///     }
/// }
/// ```
pub trait RowMapper: Send + Sync {
    /// The engine-side payload type.
    type Value: Clone + Send + Sync + 'static;
    /// The raw upstream tuple type fed to [`RowMapper::map_tuple`].
    type Tuple: Send + Sync;

    /// Build the stored document for one key/value pair.
    fn map(&self, key: &RowKey, value: &Self::Value) -> Result<Document, StateError>;

    /// Translate one raw upstream tuple into a pending CRUD operation.
    fn map_tuple(&self, tuple: &Self::Tuple) -> Result<CrudOperation, StateError>;

    /// Build the retrieval predicate matching the document for `key`.
    fn retrieve(&self, key: &RowKey) -> Result<Document, StateError>;

    /// Decode a stored document back into a value.
    fn decode(&self, doc: &Document) -> Result<Self::Value, StateError>;
}
