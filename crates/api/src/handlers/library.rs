//! Handlers for `/user/...`: the authenticated user's purchases.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use griot_core::types::{DbId, Timestamp};
use griot_db::models::entitlement::EntitlementWithTrack;
use griot_db::models::payment::Payment;
use griot_db::models::track::TrackResponse;
use griot_db::repositories::{EntitlementRepo, PaymentRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// One owned track in the user's library.
#[derive(Debug, Serialize)]
pub struct LibraryEntry {
    pub remaining_listens: i32,
    pub purchased_at: Timestamp,
    pub track: TrackResponse,
}

impl From<EntitlementWithTrack> for LibraryEntry {
    fn from(owned: EntitlementWithTrack) -> Self {
        Self {
            remaining_listens: owned.entitlement.remaining_listens,
            purchased_at: owned.entitlement.created_at,
            track: owned.track.into(),
        }
    }
}

/// One payment in the user's history, with a readable status name instead
/// of the raw status id.
#[derive(Debug, Serialize)]
pub struct PaymentView {
    pub id: DbId,
    pub track_id: Option<DbId>,
    pub amount: i64,
    pub status: &'static str,
    pub transaction_id: Option<String>,
    pub created_at: Timestamp,
}

impl From<Payment> for PaymentView {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            track_id: payment.track_id,
            amount: payment.amount,
            status: payment.status_name(),
            transaction_id: payment.transaction_id,
            created_at: payment.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// GET /user/tracks
// ---------------------------------------------------------------------------

/// List the caller's owned tracks with their listen balances, newest
/// purchase first.
pub async fn tracks(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let owned = EntitlementRepo::list_for_user_with_tracks(&state.pool, auth_user.user_id).await?;
    tracing::debug!(user_id = auth_user.user_id, count = owned.len(), "Listed library");

    let data: Vec<LibraryEntry> = owned.into_iter().map(LibraryEntry::from).collect();
    Ok(Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// GET /user/payments
// ---------------------------------------------------------------------------

/// List the caller's payment history, newest first.
pub async fn payments(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let payments = PaymentRepo::list_for_user(&state.pool, auth_user.user_id).await?;

    let data: Vec<PaymentView> = payments.into_iter().map(PaymentView::from).collect();
    Ok(Json(DataResponse { data }))
}
