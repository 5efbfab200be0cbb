use std::sync::Arc;

use tracing::debug;

use crate::assets::AssetStore;
use crate::cache::{CachedValue, MemoryContentCache};
use crate::content::ContentSection;
use crate::errors::ServiceError;

/// Read side of the content sections.
///
/// Only keys a section invalidates on submit are cached; everything else
/// reads through to the asset store. A value read while a submit invalidates
/// the cache is returned but not stored.
#[derive(Clone)]
pub struct ContentReader {
    assets: Arc<dyn AssetStore>,
    cache: Arc<MemoryContentCache>,
}

impl ContentReader {
    pub fn new(assets: Arc<dyn AssetStore>, cache: Arc<MemoryContentCache>) -> Self {
        Self { assets, cache }
    }

    /// Raw markdown of the section, `None` when disabled.
    pub async fn body(&self, section: &ContentSection) -> Result<Option<String>, ServiceError> {
        let key = section.body_key();
        let cacheable = section.invalidates(&key);
        if cacheable {
            if let Some(CachedValue::Body(body)) = self.cache.get(&key).await {
                debug!(section = %section.id, %key, event = "cache_hit", "content body from cache");
                return Ok(body);
            }
        }

        let seen = self.cache.generation().await;
        let body = if self.assets.has(&section.filename).await? {
            Some(self.assets.read(&section.filename).await?)
        } else {
            None
        };

        if cacheable {
            self.cache.insert_if_unchanged(&key, CachedValue::Body(body.clone()), seen).await;
        }
        Ok(body)
    }

    pub async fn exists(&self, section: &ContentSection) -> Result<bool, ServiceError> {
        let key = section.exists_key();
        let cacheable = section.invalidates(&key);
        if cacheable {
            if let Some(CachedValue::Exists(exists)) = self.cache.get(&key).await {
                return Ok(exists);
            }
        }

        let seen = self.cache.generation().await;
        let exists = self.assets.has(&section.filename).await?;
        if cacheable {
            self.cache.insert_if_unchanged(&key, CachedValue::Exists(exists), seen).await;
        }
        Ok(exists)
    }
}
