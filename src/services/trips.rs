use tracing::{info, warn};

use crate::{
    error::AppError,
    models::trip::Trip,
    services::{storage::StorageService, transfer},
};

/// Ordered trip collection, persisted in full under one storage key after
/// every mutation.
pub struct TripStore {
    storage: StorageService,
    key: String,
    trips: Vec<Trip>,
}

impl TripStore {
    /// Reads the persisted collection. An absent or unparsable entry yields an
    /// empty store; only I/O failures are reported.
    pub async fn load(storage: StorageService, key: impl Into<String>) -> Result<Self, AppError> {
        let key = key.into();
        let trips = match storage.read_key(&key).await? {
            None => Vec::new(),
            Some(raw) => match serde_json::from_slice::<Vec<Trip>>(&raw) {
                Ok(trips) => trips,
                Err(err) => {
                    warn!(%key, "discarding malformed trip collection: {err}");
                    Vec::new()
                }
            },
        };
        info!(%key, count = trips.len(), "trip store loaded");
        Ok(Self {
            storage,
            key,
            trips,
        })
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// With duplicate ids (possible after an import) the last record wins,
    /// matching the overlay drawn for that id.
    pub fn get(&self, id: &str) -> Option<&Trip> {
        self.trips.iter().rev().find(|trip| trip.id == id)
    }

    /// Appends and persists. On a failed write the in-memory sequence is left
    /// as it was.
    pub async fn append(&mut self, trip: Trip) -> Result<&Trip, AppError> {
        if self.get(&trip.id).is_some() {
            return Err(AppError::Conflict(format!("trip {} already exists", trip.id)));
        }
        self.trips.push(trip);
        if let Err(err) = self.persist().await {
            self.trips.pop();
            return Err(err);
        }
        let saved = self
            .trips
            .last()
            .ok_or_else(|| AppError::Other(anyhow::anyhow!("trip vanished after append")))?;
        info!(id = %saved.id, mode = %saved.mode, distance_km = saved.distance, "trip logged");
        Ok(saved)
    }

    pub async fn replace_all(&mut self, trips: Vec<Trip>) -> Result<(), AppError> {
        let previous = std::mem::replace(&mut self.trips, trips);
        if let Err(err) = self.persist().await {
            self.trips = previous;
            return Err(err);
        }
        info!(count = self.trips.len(), "trip store replaced");
        Ok(())
    }

    pub fn export_all(&self) -> Result<Vec<u8>, AppError> {
        transfer::export_document(&self.trips)
    }

    /// Parses `raw` and, if it is a trip array, replaces the whole store with
    /// it. A parse failure is logged and leaves the store untouched.
    pub async fn import(&mut self, raw: &[u8]) -> Result<usize, AppError> {
        let trips = match transfer::parse_import(raw) {
            Ok(trips) => trips,
            Err(err) => {
                warn!("import rejected: {err}");
                return Err(err);
            }
        };
        let count = trips.len();
        self.replace_all(trips).await?;
        Ok(count)
    }

    async fn persist(&self) -> Result<(), AppError> {
        let data = serde_json::to_vec(&self.trips)?;
        self.storage.write_key(&self.key, &data).await
    }
}
