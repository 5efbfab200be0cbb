use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt};

use crate::assets::{validate_name, AssetStore};
use crate::errors::ServiceError;

/// Asset files kept in one directory on local disk.
#[derive(Clone, Debug)]
pub struct LocalAssetStore {
    root: PathBuf,
}

impl LocalAssetStore {
    /// Creates the root directory if missing.
    pub async fn new<P: Into<PathBuf>>(root: P) -> Result<Self, ServiceError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .map_err(|e| ServiceError::storage(&root.display().to_string(), e))?;
        Ok(Self { root })
    }

    fn path_of(&self, name: &str) -> Result<PathBuf, ServiceError> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }
}

fn map_io(name: &str, err: std::io::Error) -> ServiceError {
    match err.kind() {
        ErrorKind::NotFound => ServiceError::not_found(name),
        ErrorKind::AlreadyExists => ServiceError::AlreadyExists(name.to_string()),
        _ => ServiceError::storage(name, err),
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn has(&self, name: &str) -> Result<bool, ServiceError> {
        let path = self.path_of(name)?;
        match fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(map_io(name, e)),
        }
    }

    async fn read(&self, name: &str) -> Result<String, ServiceError> {
        let path = self.path_of(name)?;
        fs::read_to_string(&path).await.map_err(|e| map_io(name, e))
    }

    async fn write(&self, name: &str, content: &str) -> Result<(), ServiceError> {
        let path = self.path_of(name)?;
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| map_io(name, e))?;
        file.write_all(content.as_bytes()).await.map_err(|e| map_io(name, e))?;
        file.flush().await.map_err(|e| map_io(name, e))?;
        Ok(())
    }

    async fn update(&self, name: &str, content: &str) -> Result<(), ServiceError> {
        let path = self.path_of(name)?;
        let mut file = fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .await
            .map_err(|e| map_io(name, e))?;
        file.write_all(content.as_bytes()).await.map_err(|e| map_io(name, e))?;
        file.flush().await.map_err(|e| map_io(name, e))?;
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), ServiceError> {
        let path = self.path_of(name)?;
        fs::remove_file(&path).await.map_err(|e| map_io(name, e))
    }
}
