use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::{config::CREDENTIAL_KEY, error::AppError, services::storage::StorageService};

/// Access token for the tile service behind the map widget.
#[derive(Clone)]
pub struct MapCredential {
    storage: StorageService,
    token: Arc<RwLock<Option<String>>>,
}

impl MapCredential {
    /// A previously saved token wins over `fallback` (usually from the
    /// environment).
    pub async fn load(storage: StorageService, fallback: Option<String>) -> Result<Self, AppError> {
        let stored = storage
            .read_string(CREDENTIAL_KEY)
            .await?
            .filter(|token| !token.is_empty());
        let token = stored.or(fallback);
        info!(present = token.is_some(), "map credential loaded");
        Ok(Self {
            storage,
            token: Arc::new(RwLock::new(token)),
        })
    }

    pub async fn current(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn set(&self, token: &str) -> Result<(), AppError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::BadRequest("map token must not be empty".into()));
        }
        let mut current = self.token.write().await;
        self.storage
            .write_key(CREDENTIAL_KEY, token.as_bytes())
            .await?;
        *current = Some(token.to_string());
        info!("map credential updated");
        Ok(())
    }
}
