use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::ServiceError;
use crate::settings::SettingsStore;
use crate::storage::json_map_store::JsonMapStore;

/// File-backed settings store.
/// Keeps a map of `key -> value` persisted as JSON.
#[derive(Clone)]
pub struct JsonSettingsStore {
    store: Arc<JsonMapStore<String, String>>,
}

impl JsonSettingsStore {
    /// Initialize the store from the given file path. Creates the file if missing.
    pub async fn new<P: Into<std::path::PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonMapStore::<String, String>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }
}

#[async_trait]
impl SettingsStore for JsonSettingsStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ServiceError> {
        Ok(self.store.get(&key.to_string()).await)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ServiceError> {
        self.store.stage(key.to_string(), value.to_string()).await;
        Ok(())
    }

    async fn flush(&self) -> Result<(), ServiceError> {
        let written = self.store.flush().await?;
        debug!(event = "settings_flush", written, "settings flushed");
        Ok(())
    }
}
