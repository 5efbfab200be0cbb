use std::{collections::HashMap, hash::Hash, path::PathBuf, sync::Arc};
use tokio::{fs, sync::RwLock};

use crate::errors::ServiceError;

/// Generic JSON file-backed key-value map store with deferred commits.
///
/// Staged writes are visible to `get` immediately and reach the file on `flush`.
#[derive(Clone)]
pub struct JsonMapStore<K, V> {
    inner: Arc<RwLock<State<K, V>>>,
    file_path: PathBuf,
}

struct State<K, V> {
    map: HashMap<K, V>,
    dirty: bool,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Initialize the store from a path. Creates the file with an empty map if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let map: HashMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::storage(&file_path.display().to_string(), e))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty: HashMap<K, V> = HashMap::new();
                let data = serde_json::to_vec(&empty).map_err(|e| ServiceError::storage("encode", e))?;
                fs::write(&file_path, data)
                    .await
                    .map_err(|e| ServiceError::storage(&file_path.display().to_string(), e))?;
                empty
            }
            Err(e) => return Err(ServiceError::storage(&file_path.display().to_string(), e)),
        };

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(State { map, dirty: false })), file_path }))
    }

    async fn save(&self, map: &HashMap<K, V>) -> Result<(), ServiceError> {
        let data = serde_json::to_vec(map).map_err(|e| ServiceError::storage("encode", e))?;
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| ServiceError::storage(&self.file_path.display().to_string(), e))?;
        Ok(())
    }

    /// Get value by key, including staged values.
    pub async fn get(&self, key: &K) -> Option<V> {
        let state = self.inner.read().await;
        state.map.get(key).cloned()
    }

    /// Insert or update a value in memory; persisted on the next `flush`.
    pub async fn stage(&self, key: K, value: V) {
        let mut state = self.inner.write().await;
        state.map.insert(key, value);
        state.dirty = true;
    }

    /// Persist staged changes. Returns whether anything was written.
    pub async fn flush(&self) -> Result<bool, ServiceError> {
        let mut state = self.inner.write().await;
        if !state.dirty {
            return Ok(false);
        }
        self.save(&state.map).await?;
        state.dirty = false;
        Ok(true)
    }
}
