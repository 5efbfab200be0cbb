//! Site-wide key/value settings.

use async_trait::async_trait;

use crate::errors::ServiceError;

pub mod file;

pub use file::JsonSettingsStore;

/// Key used for the site motto.
pub const MOTTO_KEY: &str = "motto";

/// Generic string settings with deferred commits: `set` stages, `flush` persists.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, ServiceError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), ServiceError>;
    async fn flush(&self) -> Result<(), ServiceError>;
}
