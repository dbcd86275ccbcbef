pub mod map;
pub mod public;
pub mod trips;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    Router::new()
        .merge(public::router())
        .merge(map::router())
        .merge(trips::router())
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}
