//! Queries against the `users` table.

use griot_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// One select list, so every query hydrates the full [`User`].
const COLUMNS: &str = "id, name, email, password_hash, phone, created_at, updated_at";

/// Account registration and lookups.
pub struct UserRepo;

impl UserRepo {
    /// Store a new account row and return it.
    ///
    /// A duplicate email trips the `uq_users_email` constraint; the handler
    /// pre-checks, the constraint backstops concurrent registrations.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash, phone)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// Look an account up by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Look an account up by exact email. No case folding is applied.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
