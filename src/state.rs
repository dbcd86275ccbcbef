use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config::AppConfig,
    error::AppError,
    map::MapSession,
    models::{trip::Trip, TripForm},
    services::{credential::MapCredential, storage::StorageService, trips::TripStore},
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub storage: StorageService,
    pub trips: Arc<Mutex<TripStore>>,
    pub map: Arc<Mutex<MapSession>>,
    pub credential: MapCredential,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        storage: StorageService,
        trips: TripStore,
        credential: MapCredential,
    ) -> Self {
        let map = MapSession::new(trips.trips());
        Self {
            config,
            storage,
            trips: Arc::new(Mutex::new(trips)),
            map: Arc::new(Mutex::new(map)),
            credential,
        }
    }

    /// Loads persisted trips and the map credential described by `config`.
    pub async fn bootstrap(config: AppConfig) -> Result<Self, AppError> {
        let storage = StorageService::new(config.data_dir.clone());
        storage.ensure_structure().await?;

        let trips = TripStore::load(storage.clone(), config.trips_key.clone()).await?;
        let credential = MapCredential::load(storage.clone(), config.map_token.clone()).await?;

        Ok(Self::new(config, storage, trips, credential))
    }

    /// Turns the pending route plus form input into a stored trip, then
    /// clears the selection and redraws trip overlays.
    pub async fn save_trip(&self, form: TripForm) -> Result<Trip, AppError> {
        let mut store = self.trips.lock().await;
        let mut map = self.map.lock().await;

        let trip = form.into_trip(map.pending())?;
        let saved = store.append(trip).await?.clone();
        map.trip_saved(store.trips());
        Ok(saved)
    }

    /// Replaces the whole history with an imported document. The map keeps
    /// any in-flight selection.
    pub async fn import_trips(&self, raw: &[u8]) -> Result<usize, AppError> {
        let mut store = self.trips.lock().await;
        let imported = store.import(raw).await?;
        self.map.lock().await.sync_trips(store.trips());
        Ok(imported)
    }
}
