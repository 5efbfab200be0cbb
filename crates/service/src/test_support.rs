#![cfg(test)]
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::assets::AssetStore;
use crate::cache::ContentCache;
use crate::errors::ServiceError;
use crate::settings::SettingsStore;

/// In-memory asset store that enforces the same write/update rules as the disk one.
#[derive(Default)]
pub struct MemoryAssets {
    files: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<String>>,
    fail_on: Mutex<Option<String>>,
}

impl MemoryAssets {
    pub fn put(&self, name: &str, content: &str) {
        self.files.lock().unwrap().insert(name.to_string(), content.to_string());
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.files.lock().unwrap().get(name).cloned()
    }

    /// Operations performed, as `op:name`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Make every mutating call on `name` fail.
    pub fn fail_writes_to(&self, name: &str) {
        *self.fail_on.lock().unwrap() = Some(name.to_string());
    }

    fn record(&self, op: &str, name: &str) -> Result<(), ServiceError> {
        self.calls.lock().unwrap().push(format!("{op}:{name}"));
        if op != "has" && op != "read" && self.fail_on.lock().unwrap().as_deref() == Some(name) {
            return Err(ServiceError::Storage(format!("injected failure on {name}")));
        }
        Ok(())
    }
}

#[async_trait]
impl AssetStore for MemoryAssets {
    async fn has(&self, name: &str) -> Result<bool, ServiceError> {
        self.record("has", name)?;
        Ok(self.files.lock().unwrap().contains_key(name))
    }

    async fn read(&self, name: &str) -> Result<String, ServiceError> {
        self.record("read", name)?;
        self.get(name).ok_or_else(|| ServiceError::not_found(name))
    }

    async fn write(&self, name: &str, content: &str) -> Result<(), ServiceError> {
        self.record("write", name)?;
        let mut files = self.files.lock().unwrap();
        if files.contains_key(name) {
            return Err(ServiceError::AlreadyExists(name.to_string()));
        }
        files.insert(name.to_string(), content.to_string());
        Ok(())
    }

    async fn update(&self, name: &str, content: &str) -> Result<(), ServiceError> {
        self.record("update", name)?;
        let mut files = self.files.lock().unwrap();
        match files.get_mut(name) {
            Some(existing) => {
                *existing = content.to_string();
                Ok(())
            }
            None => Err(ServiceError::not_found(name)),
        }
    }

    async fn delete(&self, name: &str) -> Result<(), ServiceError> {
        self.record("delete", name)?;
        self.files
            .lock()
            .unwrap()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| ServiceError::not_found(name))
    }
}

/// Settings store that counts `set` and `flush` calls.
#[derive(Default)]
pub struct RecordingSettings {
    committed: Mutex<HashMap<String, String>>,
    staged: Mutex<HashMap<String, String>>,
    sets: Mutex<usize>,
    flushes: Mutex<usize>,
    fail_flush: Mutex<bool>,
}

impl RecordingSettings {
    pub fn with(key: &str, value: &str) -> Self {
        let s = Self::default();
        s.committed.lock().unwrap().insert(key.to_string(), value.to_string());
        s
    }

    pub fn committed(&self, key: &str) -> Option<String> {
        self.committed.lock().unwrap().get(key).cloned()
    }

    /// Make every `flush` fail, keeping staged values uncommitted.
    pub fn fail_flushes(&self) {
        *self.fail_flush.lock().unwrap() = true;
    }

    pub fn set_calls(&self) -> usize { *self.sets.lock().unwrap() }
    pub fn flush_calls(&self) -> usize { *self.flushes.lock().unwrap() }
}

#[async_trait]
impl SettingsStore for RecordingSettings {
    async fn get(&self, key: &str) -> Result<Option<String>, ServiceError> {
        if let Some(v) = self.staged.lock().unwrap().get(key) {
            return Ok(Some(v.clone()));
        }
        Ok(self.committed(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ServiceError> {
        *self.sets.lock().unwrap() += 1;
        self.staged.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn flush(&self) -> Result<(), ServiceError> {
        *self.flushes.lock().unwrap() += 1;
        if *self.fail_flush.lock().unwrap() {
            return Err(ServiceError::Storage("injected flush failure".into()));
        }
        let staged: Vec<_> = self.staged.lock().unwrap().drain().collect();
        self.committed.lock().unwrap().extend(staged);
        Ok(())
    }
}

/// Cache that records every deleted key.
#[derive(Default)]
pub struct RecordingCache {
    deleted: Mutex<Vec<String>>,
    fail_on: Mutex<Option<String>>,
}

impl RecordingCache {
    /// Make deleting `key` fail.
    pub fn fail_deletes_of(&self, key: &str) {
        *self.fail_on.lock().unwrap() = Some(key.to_string());
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn count(&self, key: &str) -> usize {
        self.deleted.lock().unwrap().iter().filter(|k| *k == key).count()
    }
}

#[async_trait]
impl ContentCache for RecordingCache {
    async fn delete(&self, key: &str) -> Result<(), ServiceError> {
        if self.fail_on.lock().unwrap().as_deref() == Some(key) {
            return Err(ServiceError::Cache(format!("injected failure on {key}")));
        }
        self.deleted.lock().unwrap().push(key.to_string());
        Ok(())
    }
}
