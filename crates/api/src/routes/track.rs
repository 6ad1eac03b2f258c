//! The `/tracks` route table.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::track;
use crate::state::AppState;

/// Routes mounted at `/tracks`.
///
/// ```text
/// GET  /           -> list
/// GET  /{id}       -> get_by_id
/// POST /{id}/play  -> play (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(track::list))
        .route("/{id}", get(track::get_by_id))
        .route("/{id}/play", post(track::play))
}
