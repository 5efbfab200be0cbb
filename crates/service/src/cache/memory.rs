use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use moka::future::Cache;
use tokio::sync::Mutex;

use crate::cache::ContentCache;
use crate::errors::ServiceError;

/// Values derived from asset files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CachedValue {
    /// Asset body, `None` when the asset is absent.
    Body(Option<String>),
    /// Whether the asset exists.
    Exists(bool),
}

/// In-memory cache using moka.
///
/// Every `delete` bumps a generation under the same lock that guards
/// `insert_if_unchanged`, so a value read before an invalidation can never be
/// stored after it.
#[derive(Clone)]
pub struct MemoryContentCache {
    inner: Cache<String, CachedValue>,
    generation: Arc<Mutex<u64>>,
}

impl MemoryContentCache {
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        let inner = Cache::builder().max_capacity(max_capacity).time_to_live(ttl).build();
        Self { inner, generation: Arc::new(Mutex::new(0)) }
    }

    pub async fn get(&self, key: &str) -> Option<CachedValue> {
        self.inner.get(key).await
    }

    /// Take before reading the source of a value.
    pub async fn generation(&self) -> u64 {
        *self.generation.lock().await
    }

    /// Store `value` unless some key was invalidated since `seen`. Returns whether it was stored.
    pub async fn insert_if_unchanged(&self, key: &str, value: CachedValue, seen: u64) -> bool {
        let generation = self.generation.lock().await;
        if *generation != seen {
            return false;
        }
        self.inner.insert(key.to_string(), value).await;
        true
    }
}

#[async_trait]
impl ContentCache for MemoryContentCache {
    async fn delete(&self, key: &str) -> Result<(), ServiceError> {
        let mut generation = self.generation.lock().await;
        *generation += 1;
        self.inner.invalidate(key).await;
        Ok(())
    }
}
