//! Exchanges listens for signed play URLs.

use griot_core::storage::SignedUrlRequest;
use griot_core::types::DbId;
use griot_db::models::track::Track;
use griot_db::repositories::TrackRepo;
use griot_db::DbPool;

use crate::ledger::{EntitlementLedger, LedgerError};

#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("Track {0} not found")]
    TrackNotFound(DbId),

    /// Carries the track price so the caller can prompt a purchase.
    #[error("Track {track_id} has not been purchased (price {price} XOF)")]
    NotEntitled { track_id: DbId, price: i64 },

    #[error("No remaining listens for track {track_id}")]
    NoRemainingListens { track_id: DbId },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A granted play: the track, the signed-URL request for its audio object
/// and the listens left after this one.
#[derive(Debug)]
pub struct PlayAuthorization {
    pub track: Track,
    pub signed_url_request: SignedUrlRequest,
    pub remaining_listens: i32,
}

/// The single path from "user wants to hear track" to "storage may serve
/// the file". Every authorized play spends exactly one listen; denied plays
/// spend nothing.
#[derive(Clone)]
pub struct AccessGate {
    pool: DbPool,
    ledger: EntitlementLedger,
    audio_bucket: String,
    url_ttl_secs: u64,
}

impl AccessGate {
    pub fn new(
        pool: DbPool,
        ledger: EntitlementLedger,
        audio_bucket: String,
        url_ttl_secs: u64,
    ) -> Self {
        Self {
            pool,
            ledger,
            audio_bucket,
            url_ttl_secs,
        }
    }

    /// Authorizes one play of a track for a user.
    ///
    /// The track is resolved first so a missing track reports as such rather
    /// than as a missing entitlement, and so a denial can carry the price.
    pub async fn authorize_play(
        &self,
        user_id: DbId,
        track_id: DbId,
    ) -> Result<PlayAuthorization, GateError> {
        let track = TrackRepo::find_by_id(&self.pool, track_id)
            .await?
            .ok_or(GateError::TrackNotFound(track_id))?;

        let remaining_listens = match self.ledger.consume(user_id, track_id).await {
            Ok(remaining) => remaining,
            Err(LedgerError::NotEntitled { .. }) => {
                return Err(GateError::NotEntitled {
                    track_id,
                    price: track.price,
                });
            }
            Err(LedgerError::NoRemainingListens { .. }) => {
                return Err(GateError::NoRemainingListens { track_id });
            }
            Err(LedgerError::Database(e)) => return Err(GateError::Database(e)),
        };

        tracing::info!(user_id, track_id, remaining_listens, "Play authorized");

        let signed_url_request = SignedUrlRequest {
            bucket: self.audio_bucket.clone(),
            object_key: track.file_path.clone(),
            ttl_secs: self.url_ttl_secs,
        };
        Ok(PlayAuthorization {
            track,
            signed_url_request,
            remaining_listens,
        })
    }
}
