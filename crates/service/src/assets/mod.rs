//! Markdown asset files in a flat namespace.

use async_trait::async_trait;

use crate::errors::ServiceError;

pub mod local;

pub use local::LocalAssetStore;

/// File store capabilities used by the customize form.
/// `write` creates a new file, `update` overwrites an existing one.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn has(&self, name: &str) -> Result<bool, ServiceError>;
    async fn read(&self, name: &str) -> Result<String, ServiceError>;
    async fn write(&self, name: &str, content: &str) -> Result<(), ServiceError>;
    async fn update(&self, name: &str, content: &str) -> Result<(), ServiceError>;
    async fn delete(&self, name: &str) -> Result<(), ServiceError>;
}

/// Reject names that would leave the flat namespace.
pub fn validate_name(name: &str) -> Result<(), ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::Validation("asset name is empty".into()));
    }
    if name.contains('/') || name.contains('\\') || name.contains("..") || name == "." {
        return Err(ServiceError::Validation(format!("invalid asset name: {name}")));
    }
    Ok(())
}
