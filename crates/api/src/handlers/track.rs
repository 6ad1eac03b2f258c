//! Handlers for the `/tracks` resource: public catalog plus the authorized
//! play endpoint.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use griot_core::error::CoreError;
use griot_core::types::DbId;
use griot_db::models::track::TrackResponse;
use griot_db::repositories::TrackRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for `POST /tracks/{id}/play`.
#[derive(Debug, Serialize)]
pub struct PlayResponse {
    pub track: TrackResponse,
    /// Presigned URL for the audio object, valid for the configured TTL.
    pub play_url: String,
    /// Listens left after this one.
    pub remaining_listens: i32,
}

// ---------------------------------------------------------------------------
// GET /tracks
// ---------------------------------------------------------------------------

/// List the catalog, newest first. Public.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tracks = TrackRepo::list(&state.pool).await?;
    let data: Vec<TrackResponse> = tracks.into_iter().map(TrackResponse::from).collect();
    Ok(Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// GET /tracks/{id}
// ---------------------------------------------------------------------------

/// Get a single track by ID. Public.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let track = TrackRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id,
        }))?;
    Ok(Json(DataResponse {
        data: TrackResponse::from(track),
    }))
}

// ---------------------------------------------------------------------------
// POST /tracks/{id}/play
// ---------------------------------------------------------------------------

/// Spend one listen and return a short-lived presigned URL for the audio
/// object. Denials carry the track price (not purchased) or a zeroed count
/// (out of listens) so the client can react without another round trip.
pub async fn play(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let authorization = state.gate.authorize_play(auth_user.user_id, id).await?;
    let play_url = state.storage.sign_url(&authorization.signed_url_request).await?;

    Ok(Json(DataResponse {
        data: PlayResponse {
            track: authorization.track.into(),
            play_url,
            remaining_listens: authorization.remaining_listens,
        },
    }))
}
