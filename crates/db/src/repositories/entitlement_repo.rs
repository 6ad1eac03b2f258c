//! Repository for the `user_tracks` table.

use griot_core::types::DbId;
use sqlx::PgPool;

use crate::models::entitlement::{Entitlement, EntitlementWithTrack};
use crate::models::track::Track;

/// One select list, so every query hydrates the full [`Entitlement`].
const COLUMNS: &str = "id, user_id, track_id, remaining_listens, created_at, updated_at";

/// Select list for the `tracks` table, used when hydrating library rows.
const TRACK_COLUMNS: &str =
    "id, title, artist, price, file_path, duration_secs, cover_path, created_at, updated_at";

/// Listen balances, keyed by (user, track).
pub struct EntitlementRepo;

impl EntitlementRepo {
    /// Grant an entitlement with the given listen balance.
    ///
    /// Idempotent: if the (user, track) pair already has a row, nothing
    /// changes, including the balance. Returns `true` when a new row was
    /// inserted.
    pub async fn grant(
        pool: &PgPool,
        user_id: DbId,
        track_id: DbId,
        listens: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO user_tracks (user_id, track_id, remaining_listens)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, track_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(track_id)
        .bind(listens)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Same as [`EntitlementRepo::grant`] but within an existing transaction,
    /// so a payment status flip and its grant commit or roll back together.
    pub async fn grant_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: DbId,
        track_id: DbId,
        listens: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO user_tracks (user_id, track_id, remaining_listens)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, track_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(track_id)
        .bind(listens)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Atomically consume one listen.
    ///
    /// A single conditional UPDATE, never read-modify-write: the guard on
    /// `remaining_listens > 0` makes concurrent consumers serialize on the
    /// row, so a balance of K yields exactly K successes under any
    /// interleaving. Returns the new balance, or `None` when there is no row
    /// or the balance is already zero.
    pub async fn consume(
        pool: &PgPool,
        user_id: DbId,
        track_id: DbId,
    ) -> Result<Option<i32>, sqlx::Error> {
        let row: Option<(i32,)> = sqlx::query_as(
            "UPDATE user_tracks
             SET remaining_listens = remaining_listens - 1
             WHERE user_id = $1 AND track_id = $2 AND remaining_listens > 0
             RETURNING remaining_listens",
        )
        .bind(user_id)
        .bind(track_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(remaining,)| remaining))
    }

    /// One user's entitlement for one track, if any.
    pub async fn find_by_user_and_track(
        pool: &PgPool,
        user_id: DbId,
        track_id: DbId,
    ) -> Result<Option<Entitlement>, sqlx::Error> {
        sqlx::query_as::<_, Entitlement>(&format!(
            "SELECT {COLUMNS} FROM user_tracks WHERE user_id = $1 AND track_id = $2"
        ))
        .bind(user_id)
        .bind(track_id)
        .fetch_optional(pool)
        .await
    }

    /// All of a user's entitlements, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Entitlement>, sqlx::Error> {
        sqlx::query_as::<_, Entitlement>(&format!(
            "SELECT {COLUMNS} FROM user_tracks WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// All of a user's entitlements with their tracks, newest first.
    pub async fn list_for_user_with_tracks(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<EntitlementWithTrack>, sqlx::Error> {
        let entitlements = Self::list_for_user(pool, user_id).await?;
        let mut result = Vec::with_capacity(entitlements.len());

        let track_query = format!("SELECT {TRACK_COLUMNS} FROM tracks WHERE id = $1");
        for entitlement in entitlements {
            let track = sqlx::query_as::<_, Track>(&track_query)
                .bind(entitlement.track_id)
                .fetch_one(pool)
                .await?;
            result.push(EntitlementWithTrack { entitlement, track });
        }

        Ok(result)
    }
}
