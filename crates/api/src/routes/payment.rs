//! The `/payments` route table.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::payment;
use crate::state::AppState;

/// Routes mounted at `/payments`.
///
/// ```text
/// POST /                          -> create (requires auth)
/// POST /callback                  -> callback (public, gateway-facing)
/// GET  /verify/{transaction_id}   -> verify (requires auth)
/// GET  /status/{transaction_id}   -> status (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(payment::create))
        .route("/callback", post(payment::callback))
        .route("/verify/{transaction_id}", get(payment::verify))
        .route("/status/{transaction_id}", get(payment::status))
}
