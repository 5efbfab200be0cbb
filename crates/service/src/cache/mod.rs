//! Derived content cache.

use async_trait::async_trait;

use crate::errors::ServiceError;

pub mod memory;

pub use memory::{CachedValue, MemoryContentCache};

/// The only capability the customize form needs from a cache.
#[async_trait]
pub trait ContentCache: Send + Sync {
    async fn delete(&self, key: &str) -> Result<(), ServiceError>;
}
