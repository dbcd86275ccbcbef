use std::{env, net::SocketAddr, path::PathBuf};

use crate::error::AppError;

pub const DEFAULT_TRIPS_KEY: &str = "atlas-trips";
pub const CREDENTIAL_KEY: &str = "mapbox-token";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub trips_key: String,
    pub static_dir: PathBuf,
    pub map_token: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let listen_addr: SocketAddr = env::var("ATLAS_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid ATLAS_LISTEN_ADDR: {err}")))?;

        let data_dir = env::var("ATLAS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let trips_key =
            env::var("ATLAS_TRIPS_KEY").unwrap_or_else(|_| DEFAULT_TRIPS_KEY.to_string());
        validate_key(&trips_key)?;

        let static_dir = env::var("ATLAS_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static"));

        let map_token = env::var("MAPBOX_TOKEN")
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        Ok(Self {
            listen_addr,
            data_dir,
            trips_key,
            static_dir,
            map_token,
        })
    }

    /// Configuration rooted in `data_dir` with every other value at its default.
    pub fn local(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_dir: data_dir.into(),
            trips_key: DEFAULT_TRIPS_KEY.to_string(),
            static_dir: PathBuf::from("static"),
            map_token: None,
        }
    }
}

/// Storage keys become file names, so only a conservative alphabet is allowed.
pub fn validate_key(key: &str) -> Result<(), AppError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(AppError::Config(format!("invalid storage key: {key:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_default_keys() {
        assert!(validate_key(DEFAULT_TRIPS_KEY).is_ok());
        assert!(validate_key(CREDENTIAL_KEY).is_ok());
    }

    #[test]
    fn rejects_path_like_keys() {
        assert!(validate_key("").is_err());
        assert!(validate_key("../trips").is_err());
        assert!(validate_key("trips.json").is_err());
    }
}
