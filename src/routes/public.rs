use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;

use crate::{
    analytics::{summarize, TripSummary},
    error::AppError,
    models::trip::TransportMode,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/map/token", get(token_form).post(token_submit))
}

struct ModeOption {
    value: String,
    label: String,
    icon: &'static str,
}

fn mode_options() -> Vec<ModeOption> {
    TransportMode::ALL
        .iter()
        .map(|mode| ModeOption {
            value: mode.as_str().to_string(),
            label: mode.label().to_string(),
            icon: mode.icon(),
        })
        .collect()
}

struct ModeRow {
    label: String,
    color: &'static str,
    km: i64,
    width: String,
}

struct AnalyticsView {
    total_km: i64,
    trip_count: usize,
    rows: Vec<ModeRow>,
}

impl From<TripSummary> for AnalyticsView {
    fn from(summary: TripSummary) -> Self {
        Self {
            total_km: summary.total_rounded(),
            trip_count: summary.trip_count,
            rows: summary
                .by_mode
                .iter()
                .map(|item| ModeRow {
                    label: item.label.clone(),
                    color: item.color,
                    km: item.rounded(),
                    width: format!("{:.1}", item.share_of_max),
                })
                .collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    map_token: String,
    modes: Vec<ModeOption>,
    has_pending: bool,
    pending_km: i64,
    awaiting_destination: bool,
    analytics: AnalyticsView,
}

#[derive(Template)]
#[template(path = "token.html")]
pub struct TokenTemplate {
    show_error: bool,
    error_message: String,
    token: String,
}

async fn index(State(state): State<AppState>) -> Result<Response, AppError> {
    let Some(map_token) = state.credential.current().await else {
        return Ok(AskamaTemplateResponse::into_response(TokenTemplate {
            show_error: false,
            error_message: String::new(),
            token: String::new(),
        }));
    };

    let summary = summarize(state.trips.lock().await.trips());
    let map = state.map.lock().await;
    let pending = map.pending();

    Ok(AskamaTemplateResponse::into_response(IndexTemplate {
        map_token,
        modes: mode_options(),
        has_pending: pending.is_some(),
        pending_km: pending
            .map(|route| route.distance_km().round() as i64)
            .unwrap_or_default(),
        awaiting_destination: map.awaiting_destination(),
        analytics: summary.into(),
    }))
}

/// Reopens the prompt pre-filled with the current token, e.g. after the map
/// widget rejected it.
async fn token_form(State(state): State<AppState>) -> impl IntoResponse {
    AskamaTemplateResponse::into_response(TokenTemplate {
        show_error: false,
        error_message: String::new(),
        token: state.credential.current().await.unwrap_or_default(),
    })
}

#[derive(Deserialize)]
struct TokenForm {
    token: String,
}

async fn token_submit(
    State(state): State<AppState>,
    Form(form): Form<TokenForm>,
) -> Result<Response, AppError> {
    match state.credential.set(&form.token).await {
        Ok(()) => Ok(Redirect::to("/").into_response()),
        Err(AppError::BadRequest(msg)) => Ok((
            StatusCode::BAD_REQUEST,
            AskamaTemplateResponse::into_response(TokenTemplate {
                show_error: true,
                error_message: msg,
                token: form.token.clone(),
            }),
        )
            .into_response()),
        Err(err) => Err(err),
    }
}
