//! The `/user` route table, the authenticated caller's library.

use axum::routing::get;
use axum::Router;

use crate::handlers::library;
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// GET /tracks    -> tracks (owned tracks with listen balances)
/// GET /payments  -> payments (payment history)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tracks", get(library::tracks))
        .route("/payments", get(library::payments))
}
