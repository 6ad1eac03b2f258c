pub mod auth;
pub mod health;
pub mod library;
pub mod payment;
pub mod track;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/profile                        profile (requires auth)
///
/// /tracks                              catalog listing (public)
/// /tracks/{id}                         track detail (public)
/// /tracks/{id}/play                    authorize a play (requires auth)
///
/// /payments                            initiate a payment (requires auth)
/// /payments/callback                   gateway status report (public)
/// /payments/verify/{transaction_id}    poll + reconcile (requires auth)
/// /payments/status/{transaction_id}    gateway proxy (requires auth)
///
/// /user/tracks                         owned tracks + balances (requires auth)
/// /user/payments                       payment history (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (register, login, profile).
        .nest("/auth", auth::router())
        // Public catalog and the play endpoint.
        .nest("/tracks", track::router())
        // Payment initiation and settlement reports.
        .nest("/payments", payment::router())
        // The authenticated user's library and payment history.
        .nest("/user", library::router())
}
