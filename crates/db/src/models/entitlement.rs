//! Rows for the `user_tracks` listen balances.

use griot_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::track::Track;

/// A row from the `user_tracks` table: one user's listen balance for one
/// track.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Entitlement {
    pub id: DbId,
    pub user_id: DbId,
    pub track_id: DbId,
    pub remaining_listens: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An entitlement joined with its track, for library listings.
#[derive(Debug, Clone)]
pub struct EntitlementWithTrack {
    pub entitlement: Entitlement,
    pub track: Track,
}
