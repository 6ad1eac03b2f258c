//! Rows and wire shapes for payments.

use griot_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::status::{PaymentStatus, StatusId};

/// A row from the `payments` table.
///
/// `track_id` is NULL for standalone top-ups that are not tied to a track;
/// completing those has no ledger effect. `transaction_id` is NULL until the
/// gateway accepts the transaction and unique afterwards.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub user_id: DbId,
    pub track_id: Option<DbId>,
    /// Amount in whole XOF.
    pub amount: i64,
    pub status_id: StatusId,
    pub transaction_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Payment {
    /// Decode the status column. The FK to `payment_statuses` guarantees the
    /// id is one of the seeded values.
    pub fn status(&self) -> Option<PaymentStatus> {
        PaymentStatus::from_id(self.status_id)
    }

    pub fn status_name(&self) -> &'static str {
        self.status().map(PaymentStatus::as_str).unwrap_or("unknown")
    }

    pub fn is_terminal(&self) -> bool {
        self.status().is_some_and(PaymentStatus::is_terminal)
    }
}

/// Insert payload for a new payment row. Status starts as pending; the
/// gateway transaction id is attached after the gateway call succeeds.
#[derive(Debug, Clone)]
pub struct CreatePayment {
    pub user_id: DbId,
    pub track_id: Option<DbId>,
    pub amount: i64,
}
