use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Form, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    analytics::{summarize, TripSummary},
    error::AppError,
    models::{trip::Trip, TripForm},
    services::transfer::export_filename,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trips", post(trip_submit))
        .route("/trips/:id/popup", get(trip_popup))
        .route("/api/analytics", get(analytics))
        .route("/export", get(export))
        .route("/import", post(import))
}

async fn trip_submit(
    State(state): State<AppState>,
    Form(form): Form<TripForm>,
) -> Result<Redirect, AppError> {
    state.save_trip(form).await?;
    Ok(Redirect::to("/"))
}

#[derive(Debug, Deserialize)]
struct PopupAnchor {
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
}

#[derive(Template)]
#[template(path = "trip_popup.html")]
struct TripPopupTemplate {
    left: String,
    top: String,
    mode: String,
    date: String,
    distance_km: i64,
    has_notes: bool,
    notes: String,
}

impl TripPopupTemplate {
    fn new(trip: &Trip, anchor: &PopupAnchor) -> Self {
        Self {
            left: format!("{:.0}", anchor.x + 10.0),
            top: format!("{:.0}", anchor.y - 10.0),
            mode: format!("{} {}", trip.mode.icon(), trip.mode.label()),
            date: display_date(&trip.date),
            distance_km: trip.distance.round() as i64,
            has_notes: trip.has_notes(),
            notes: trip.notes.clone(),
        }
    }
}

async fn trip_popup(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    Query(anchor): Query<PopupAnchor>,
) -> Result<impl IntoResponse, AppError> {
    let store = state.trips.lock().await;
    let trip = store.get(&trip_id).ok_or(AppError::NotFound)?;
    Ok(AskamaTemplateResponse::into_response(TripPopupTemplate::new(
        trip, &anchor,
    )))
}

async fn analytics(State(state): State<AppState>) -> Json<TripSummary> {
    Json(summarize(state.trips.lock().await.trips()))
}

async fn export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let body = state.trips.lock().await.export_all()?;
    let filename = export_filename(Utc::now().date_naive());
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    ))
}

#[derive(Debug, Serialize)]
struct ImportOutcome {
    imported: usize,
}

async fn import(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ImportOutcome>, AppError> {
    let imported = state.import_trips(&body).await?;
    Ok(Json(ImportOutcome { imported }))
}

/// `2024-05-01T00:00:00.000Z` becomes `May 1, 2024`; anything unparsable is
/// shown as stored.
fn display_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc).format("%B %-d, %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
