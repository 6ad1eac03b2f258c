//! Rows and wire shapes for catalog tracks.

use griot_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tracks` table.
///
/// `file_path` is the object key inside the audio bucket. It never leaves
/// the backend; use [`TrackResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Track {
    pub id: DbId,
    pub title: String,
    pub artist: String,
    /// Price in whole XOF.
    pub price: i64,
    pub file_path: String,
    pub duration_secs: Option<i32>,
    pub cover_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The catalog shape the API returns. The storage key stays behind.
#[derive(Debug, Clone, Serialize)]
pub struct TrackResponse {
    pub id: DbId,
    pub title: String,
    pub artist: String,
    pub price: i64,
    pub duration_secs: Option<i32>,
    pub cover_path: Option<String>,
    pub created_at: Timestamp,
}

impl From<Track> for TrackResponse {
    fn from(track: Track) -> Self {
        Self {
            id: track.id,
            title: track.title,
            artist: track.artist,
            price: track.price,
            duration_secs: track.duration_secs,
            cover_path: track.cover_path,
            created_at: track.created_at,
        }
    }
}

/// Insert payload for a new catalog entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTrack {
    pub title: String,
    pub artist: String,
    pub price: i64,
    pub file_path: String,
    pub duration_secs: Option<i32>,
    pub cover_path: Option<String>,
}
