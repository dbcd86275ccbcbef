use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError, geo::LngLat, map::Scene, models::trip::PendingRoute, state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/scene", get(scene))
        .route("/api/map/click", post(click))
        .route("/api/map/cancel", post(cancel))
}

async fn scene(State(state): State<AppState>) -> Json<Scene> {
    Json(state.map.lock().await.scene())
}

#[derive(Debug, Deserialize)]
struct ClickRequest {
    lng: f64,
    lat: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClickResponse {
    pending_route: Option<PendingRoute>,
    pending_distance_km: Option<f64>,
    scene: Scene,
}

async fn click(
    State(state): State<AppState>,
    Json(request): Json<ClickRequest>,
) -> Result<Json<ClickResponse>, AppError> {
    if !request.lng.is_finite() || !(-90.0..=90.0).contains(&request.lat) {
        return Err(AppError::BadRequest(format!(
            "click outside the map: ({}, {})",
            request.lng, request.lat
        )));
    }

    let mut map = state.map.lock().await;
    let pending_route = map.click(LngLat::new(request.lng, request.lat));
    Ok(Json(ClickResponse {
        pending_route,
        pending_distance_km: pending_route.map(|route| route.distance_km()),
        scene: map.scene(),
    }))
}

async fn cancel(State(state): State<AppState>) -> Json<Scene> {
    let mut map = state.map.lock().await;
    map.cancel();
    Json(map.scene())
}
