// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Feeds upstream tuple batches into the mutation log.

use std::sync::Arc;

use tracing::debug;

use crate::error::StateError;
use crate::mapper::RowMapper;
use crate::state::DocState;

/// Translates a batch of raw upstream tuples into pending operations via
/// the row mapper. A mapper fault aborts the batch; operations already
/// appended from earlier tuples in the batch remain in the log.
pub struct StateUpdater<M: RowMapper> {
    mapper: Arc<M>,
}

impl<M: RowMapper> StateUpdater<M> {
    /// Create an updater over `mapper`.
    pub fn new(mapper: Arc<M>) -> Self {
        Self { mapper }
    }

    /// Map each tuple into a CRUD operation and append it to `state`.
    pub fn update_state(&self, state: &mut DocState, tuples: &[M::Tuple]) -> Result<(), StateError> {
        debug!(tuples = tuples.len(), "updating state");
        for tuple in tuples {
            let operation = self.mapper.map_tuple(tuple)?;
            state.add_operation(operation);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sluice_store::{Document, MemoryDriver, StoreClient};

    use crate::key::{KeyPart, RowKey};
    use crate::operation::CrudOperation;

    struct TupleMapper;

    impl RowMapper for TupleMapper {
        type Value = i64;
        type Tuple = (String, i64);

        fn map(&self, key: &RowKey, value: &i64) -> Result<Document, StateError> {
            let mut doc = self.retrieve(key)?;
            doc.insert("count".to_string(), json!(value));
            Ok(doc)
        }

        fn map_tuple(&self, (word, count): &(String, i64)) -> Result<CrudOperation, StateError> {
            if word.is_empty() {
                return Err(StateError::Mapper("empty word".to_string()));
            }
            self.map(&vec![KeyPart::from(word.as_str())], count)
                .map(|document| CrudOperation::Insert { document })
        }

        fn retrieve(&self, key: &RowKey) -> Result<Document, StateError> {
            let mut doc = Document::new();
            doc.insert("word".to_string(), key[0].to_value());
            Ok(doc)
        }

        fn decode(&self, doc: &Document) -> Result<i64, StateError> {
            doc.get("count")
                .and_then(|v| v.as_i64())
                .ok_or_else(|| StateError::Mapper("no count".to_string()))
        }
    }

    async fn state() -> DocState {
        let client = StoreClient::new(
            Box::new(MemoryDriver::new()),
            vec!["localhost:27017".to_string()],
        );
        DocState::new(&client, "test", "words").await.unwrap()
    }

    #[tokio::test]
    async fn test_tuples_become_pending_operations() {
        let updater = StateUpdater::new(Arc::new(TupleMapper));
        let mut state = state().await;

        let tuples = vec![("storm".to_string(), 3), ("calm".to_string(), 1)];
        updater.update_state(&mut state, &tuples).unwrap();
        assert_eq!(state.pending_len(), 2);
    }

    #[tokio::test]
    async fn test_mapper_fault_aborts_batch_keeping_earlier_ops() {
        let updater = StateUpdater::new(Arc::new(TupleMapper));
        let mut state = state().await;

        let tuples = vec![
            ("storm".to_string(), 3),
            (String::new(), 0), // rejected by the mapper
            ("calm".to_string(), 1),
        ];
        let err = updater.update_state(&mut state, &tuples).unwrap_err();
        assert!(matches!(err, StateError::Mapper(_)));
        assert_eq!(state.pending_len(), 1);
    }
}
