// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fixed-capacity local read/write cache.
//
// The consistency selector injects one of these between the external
// engine and the backing map adapter; the adapter itself never caches.
// Reads serve hits locally and batch all misses into a single inner
// `multi_get`; writes go through to the inner map first and populate the
// cache only after the write succeeds. Absent entries are not cached, so
// a key written by another worker becomes visible on the next read.

use std::num::NonZeroUsize;

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::Mutex;

use crate::error::StateError;
use crate::key::RowKey;
use crate::map_state::BackingMap;

/// An LRU read/write cache over any [`BackingMap`].
pub struct CachedMap<B: BackingMap> {
    inner: B,
    cache: Mutex<LruCache<RowKey, B::Value>>,
}

impl<B: BackingMap> CachedMap<B> {
    /// Wrap `inner` with a cache of at most `capacity` entries. A zero
    /// capacity is clamped to one entry.
    pub fn new(inner: B, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// The wrapped backing map.
    pub fn inner(&self) -> &B {
        &self.inner
    }

    /// Number of entries currently cached.
    pub async fn cached_len(&self) -> usize {
        self.cache.lock().await.len()
    }
}

#[async_trait]
impl<B: BackingMap> BackingMap for CachedMap<B> {
    type Value = B::Value;

    async fn multi_get(&self, keys: &[RowKey]) -> Result<Vec<Option<B::Value>>, StateError> {
        let mut results: Vec<Option<B::Value>> = vec![None; keys.len()];
        let mut missing: Vec<usize> = Vec::new();
        {
            let mut cache = self.cache.lock().await;
            for (i, key) in keys.iter().enumerate() {
                match cache.get(key) {
                    Some(value) => results[i] = Some(value.clone()),
                    None => missing.push(i),
                }
            }
        }
        if missing.is_empty() {
            return Ok(results);
        }

        let miss_keys: Vec<RowKey> = missing.iter().map(|&i| keys[i].clone()).collect();
        let fetched = self.inner.multi_get(&miss_keys).await?;

        let mut cache = self.cache.lock().await;
        for (slot, value) in missing.into_iter().zip(fetched) {
            if let Some(v) = &value {
                cache.put(keys[slot].clone(), v.clone());
            }
            results[slot] = value;
        }
        Ok(results)
    }

    async fn multi_put(&self, keys: &[RowKey], values: &[B::Value]) -> Result<(), StateError> {
        self.inner.multi_put(keys, values).await?;
        let mut cache = self.cache.lock().await;
        for (key, value) in keys.iter().zip(values) {
            cache.put(key.clone(), value.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::key::KeyPart;

    /// A backing map over a plain hash map that counts inner reads.
    #[derive(Default)]
    struct CountingMap {
        data: Mutex<std::collections::HashMap<RowKey, i64>>,
        gets: AtomicUsize,
        keys_fetched: AtomicUsize,
    }

    #[async_trait]
    impl BackingMap for Arc<CountingMap> {
        type Value = i64;

        async fn multi_get(&self, keys: &[RowKey]) -> Result<Vec<Option<i64>>, StateError> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            self.keys_fetched.fetch_add(keys.len(), Ordering::SeqCst);
            let data = self.data.lock().await;
            Ok(keys.iter().map(|k| data.get(k).copied()).collect())
        }

        async fn multi_put(&self, keys: &[RowKey], values: &[i64]) -> Result<(), StateError> {
            let mut data = self.data.lock().await;
            for (k, v) in keys.iter().zip(values) {
                data.insert(k.clone(), *v);
            }
            Ok(())
        }
    }

    fn key(word: &str) -> RowKey {
        vec![KeyPart::from(word)]
    }

    #[tokio::test]
    async fn test_write_through_then_read_hits_cache() {
        let inner = Arc::new(CountingMap::default());
        let cached = CachedMap::new(Arc::clone(&inner), 16);

        cached.multi_put(&[key("a"), key("b")], &[1, 2]).await.unwrap();

        let values = cached.multi_get(&[key("a"), key("b")]).await.unwrap();
        assert_eq!(values, vec![Some(1), Some(2)]);
        // Both keys were cached by the put; no inner read happened.
        assert_eq!(inner.gets.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_misses_are_batched_into_one_inner_read() {
        let inner = Arc::new(CountingMap::default());
        inner
            .multi_put(&[key("a"), key("b"), key("c")], &[1, 2, 3])
            .await
            .unwrap();
        let cached = CachedMap::new(Arc::clone(&inner), 16);

        let values = cached
            .multi_get(&[key("a"), key("b"), key("c")])
            .await
            .unwrap();
        assert_eq!(values, vec![Some(1), Some(2), Some(3)]);
        assert_eq!(inner.gets.load(Ordering::SeqCst), 1);
        assert_eq!(inner.keys_fetched.load(Ordering::SeqCst), 3);

        // Second read is served entirely from cache.
        cached.multi_get(&[key("a"), key("c")]).await.unwrap();
        assert_eq!(inner.gets.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_partial_hit_fetches_only_misses() {
        let inner = Arc::new(CountingMap::default());
        inner.multi_put(&[key("b")], &[2]).await.unwrap();
        let cached = CachedMap::new(Arc::clone(&inner), 16);

        cached.multi_put(&[key("a")], &[1]).await.unwrap();

        let values = cached.multi_get(&[key("a"), key("b")]).await.unwrap();
        assert_eq!(values, vec![Some(1), Some(2)]);
        // Only "b" was fetched from the inner map.
        assert_eq!(inner.keys_fetched.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_absent_entries_are_not_cached() {
        let inner = Arc::new(CountingMap::default());
        let cached = CachedMap::new(Arc::clone(&inner), 16);

        assert_eq!(cached.multi_get(&[key("x")]).await.unwrap(), vec![None]);
        assert_eq!(cached.cached_len().await, 0);

        // A write by another worker becomes visible on the next read.
        inner.multi_put(&[key("x")], &[9]).await.unwrap();
        assert_eq!(cached.multi_get(&[key("x")]).await.unwrap(), vec![Some(9)]);
    }

    #[tokio::test]
    async fn test_capacity_is_bounded() {
        let inner = Arc::new(CountingMap::default());
        let cached = CachedMap::new(Arc::clone(&inner), 2);

        cached
            .multi_put(&[key("a"), key("b"), key("c")], &[1, 2, 3])
            .await
            .unwrap();
        assert_eq!(cached.cached_len().await, 2);
    }

    #[tokio::test]
    async fn test_zero_capacity_is_clamped() {
        let inner = Arc::new(CountingMap::default());
        let cached = CachedMap::new(Arc::clone(&inner), 0);
        cached.multi_put(&[key("a")], &[1]).await.unwrap();
        assert_eq!(cached.cached_len().await, 1);
    }

    #[tokio::test]
    async fn test_result_order_matches_request_order() {
        let inner = Arc::new(CountingMap::default());
        inner
            .multi_put(&[key("a"), key("c")], &[1, 3])
            .await
            .unwrap();
        let cached = CachedMap::new(Arc::clone(&inner), 16);
        cached.multi_put(&[key("b")], &[2]).await.unwrap();

        // Mixed hits and misses keep request order.
        let values = cached
            .multi_get(&[key("c"), key("b"), key("missing"), key("a")])
            .await
            .unwrap();
        assert_eq!(values, vec![Some(3), Some(2), None, Some(1)]);
    }
}
