//! Repository for the `payments` table.

use griot_core::types::DbId;
use sqlx::PgPool;

use crate::models::payment::{CreatePayment, Payment};
use crate::models::status::PaymentStatus;

/// One select list, so every query hydrates the full [`Payment`].
const COLUMNS: &str =
    "id, user_id, track_id, amount, status_id, transaction_id, created_at, updated_at";

/// Payment rows through their lifecycle, from pending insert to settled.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Insert a new payment in the pending state with no gateway transaction
    /// yet, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePayment) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments (user_id, track_id, amount, status_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(input.user_id)
            .bind(input.track_id)
            .bind(input.amount)
            .bind(PaymentStatus::Pending.id())
            .fetch_one(pool)
            .await
    }

    /// Attach the gateway's transaction id once the gateway accepts the
    /// transaction. The unique constraint on `transaction_id` rejects
    /// attaching the same gateway id twice.
    pub async fn attach_transaction(
        pool: &PgPool,
        id: DbId,
        transaction_id: &str,
    ) -> Result<Payment, sqlx::Error> {
        sqlx::query_as::<_, Payment>(&format!(
            "UPDATE payments SET transaction_id = $2 WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(transaction_id)
        .fetch_one(pool)
        .await
    }

    /// Look a payment up by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Payment>, sqlx::Error> {
        sqlx::query_as::<_, Payment>(&format!("SELECT {COLUMNS} FROM payments WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Look a payment up by its gateway transaction id.
    pub async fn find_by_transaction_id(
        pool: &PgPool,
        transaction_id: &str,
    ) -> Result<Option<Payment>, sqlx::Error> {
        sqlx::query_as::<_, Payment>(&format!(
            "SELECT {COLUMNS} FROM payments WHERE transaction_id = $1"
        ))
        .bind(transaction_id)
        .fetch_optional(pool)
        .await
    }

    /// Look a payment up by gateway transaction id and hold the row lock
    /// until the enclosing transaction ends.
    ///
    /// Concurrent reconciliations of the same transaction serialize on this
    /// lock, so exactly one of them sees the pending state.
    pub async fn lock_by_transaction_id(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        transaction_id: &str,
    ) -> Result<Option<Payment>, sqlx::Error> {
        sqlx::query_as::<_, Payment>(&format!(
            "SELECT {COLUMNS} FROM payments WHERE transaction_id = $1 FOR UPDATE"
        ))
        .bind(transaction_id)
        .fetch_optional(&mut **tx)
        .await
    }

    /// Set a payment's status within an existing transaction, returning the
    /// updated row.
    pub async fn set_status_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        status: PaymentStatus,
    ) -> Result<Payment, sqlx::Error> {
        sqlx::query_as::<_, Payment>(&format!(
            "UPDATE payments SET status_id = $2 WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(status.id())
        .fetch_one(&mut **tx)
        .await
    }

    /// Mark a payment failed outside any transaction.
    ///
    /// Used when the gateway rejects the create call before a transaction id
    /// ever exists. Returns `true` if the row was updated.
    pub async fn mark_failed(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE payments SET status_id = $2 WHERE id = $1")
            .bind(id)
            .bind(PaymentStatus::Failed.id())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All of a user's payments, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Payment>, sqlx::Error> {
        sqlx::query_as::<_, Payment>(&format!(
            "SELECT {COLUMNS} FROM payments WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
