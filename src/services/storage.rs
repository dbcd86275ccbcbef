use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::fs;
use uuid::Uuid;

use crate::{config::validate_key, error::AppError};

/// File-backed key-value store: one `<key>.json` file per entry.
#[derive(Clone)]
pub struct StorageService {
    root: Arc<PathBuf>,
}

impl StorageService {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_structure(&self) -> Result<(), AppError> {
        fs::create_dir_all(self.root()).await?;
        Ok(())
    }

    pub fn key_path(&self, key: &str) -> Result<PathBuf, AppError> {
        validate_key(key)?;
        Ok(self.root().join(format!("{key}.json")))
    }

    /// Returns `None` when the key was never written or holds nothing.
    pub async fn read_key(&self, key: &str) -> Result<Option<Vec<u8>>, AppError> {
        let path = self.key_path(key)?;
        match fs::read(&path).await {
            Ok(raw) if raw.iter().all(u8::is_ascii_whitespace) => Ok(None),
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Replaces the entry; readers see either the old or the new bytes.
    pub async fn write_key(&self, key: &str, data: &[u8]) -> Result<(), AppError> {
        let path = self.key_path(key)?;
        fs::create_dir_all(self.root()).await?;
        let staging = self
            .root()
            .join(format!(".{key}.{}.tmp", Uuid::new_v4().simple()));
        fs::write(&staging, data).await?;
        fs::rename(&staging, &path).await?;
        Ok(())
    }

    pub async fn read_string(&self, key: &str) -> Result<Option<String>, AppError> {
        let Some(raw) = self.read_key(key).await? else {
            return Ok(None);
        };
        let text = String::from_utf8(raw)
            .map_err(|err| AppError::Config(format!("entry {key:?} is not valid UTF-8: {err}")))?;
        Ok(Some(text.trim().to_string()))
    }
}
