//! Queries against the `tracks` table.

use griot_core::types::DbId;
use sqlx::PgPool;

use crate::models::track::{CreateTrack, Track};

/// One select list, so every query hydrates the full [`Track`].
const COLUMNS: &str =
    "id, title, artist, price, file_path, duration_secs, cover_path, created_at, updated_at";

/// Catalog reads plus the insert used by seeding and tests.
pub struct TrackRepo;

impl TrackRepo {
    /// Store a new catalog entry and return it.
    pub async fn create(pool: &PgPool, input: &CreateTrack) -> Result<Track, sqlx::Error> {
        let query = format!(
            "INSERT INTO tracks (title, artist, price, file_path, duration_secs, cover_path)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(&input.title)
            .bind(&input.artist)
            .bind(input.price)
            .bind(&input.file_path)
            .bind(input.duration_secs)
            .bind(&input.cover_path)
            .fetch_one(pool)
            .await
    }

    /// Look a track up by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Track>, sqlx::Error> {
        sqlx::query_as::<_, Track>(&format!("SELECT {COLUMNS} FROM tracks WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The whole catalog, newest first. Ties on `created_at` break by id so
    /// the ordering is stable.
    pub async fn list(pool: &PgPool) -> Result<Vec<Track>, sqlx::Error> {
        sqlx::query_as::<_, Track>(&format!(
            "SELECT {COLUMNS} FROM tracks ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(pool)
        .await
    }
}
