//! Listen balances for purchased tracks.

use griot_core::types::DbId;
use griot_db::models::entitlement::Entitlement;
use griot_db::repositories::EntitlementRepo;
use griot_db::DbPool;

/// Listens granted per purchase unless configured otherwise.
pub const DEFAULT_GRANT_LISTENS: i32 = 10;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("User {user_id} has no entitlement for track {track_id}")]
    NotEntitled { user_id: DbId, track_id: DbId },

    #[error("User {user_id} has no remaining listens for track {track_id}")]
    NoRemainingListens { user_id: DbId, track_id: DbId },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// What a grant did to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantOutcome {
    /// A fresh entitlement row was created with the full listen balance.
    Granted,
    /// The entitlement already existed. Its balance was left untouched.
    AlreadyGranted,
}

impl GrantOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::AlreadyGranted => "already_granted",
        }
    }
}

/// Owns the per-user listen balances.
///
/// Grants are idempotent: a purchase grants the configured number of listens
/// once, and replaying the grant never tops the balance back up. Spending a
/// listen is a single conditional decrement, so concurrent plays can never
/// drive a balance below zero.
#[derive(Clone)]
pub struct EntitlementLedger {
    pool: DbPool,
    grant_listens: i32,
}

impl EntitlementLedger {
    pub fn new(pool: DbPool) -> Self {
        Self::with_grant_listens(pool, DEFAULT_GRANT_LISTENS)
    }

    pub fn with_grant_listens(pool: DbPool, grant_listens: i32) -> Self {
        Self {
            pool,
            grant_listens,
        }
    }

    /// Ensures the user holds an entitlement for the track.
    pub async fn grant(&self, user_id: DbId, track_id: DbId) -> Result<GrantOutcome, LedgerError> {
        let inserted =
            EntitlementRepo::grant(&self.pool, user_id, track_id, self.grant_listens).await?;
        Ok(self.record_grant(user_id, track_id, inserted))
    }

    /// Transaction-scoped variant of [`grant`](Self::grant), used by the
    /// payment reconciler so settlement and granting commit together.
    pub async fn grant_in_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: DbId,
        track_id: DbId,
    ) -> Result<GrantOutcome, sqlx::Error> {
        let inserted =
            EntitlementRepo::grant_in_tx(tx, user_id, track_id, self.grant_listens).await?;
        Ok(self.record_grant(user_id, track_id, inserted))
    }

    fn record_grant(&self, user_id: DbId, track_id: DbId, inserted: bool) -> GrantOutcome {
        let outcome = if inserted {
            GrantOutcome::Granted
        } else {
            GrantOutcome::AlreadyGranted
        };
        tracing::info!(
            user_id,
            track_id,
            listens = self.grant_listens,
            outcome = outcome.as_str(),
            "Entitlement grant"
        );
        outcome
    }

    /// Spends one listen and returns the balance left afterwards.
    ///
    /// The decrement only happens when the balance is positive, as one
    /// atomic statement. A `None` from the conditional update is
    /// disambiguated with a follow-up read: either the row exists with a
    /// zero balance or the user never bought the track.
    pub async fn consume(&self, user_id: DbId, track_id: DbId) -> Result<i32, LedgerError> {
        match EntitlementRepo::consume(&self.pool, user_id, track_id).await? {
            Some(remaining) => Ok(remaining),
            None => {
                match EntitlementRepo::find_by_user_and_track(&self.pool, user_id, track_id).await?
                {
                    Some(_) => Err(LedgerError::NoRemainingListens { user_id, track_id }),
                    None => Err(LedgerError::NotEntitled { user_id, track_id }),
                }
            }
        }
    }

    /// Reads the entitlement without touching the balance.
    pub async fn get(
        &self,
        user_id: DbId,
        track_id: DbId,
    ) -> Result<Option<Entitlement>, LedgerError> {
        Ok(EntitlementRepo::find_by_user_and_track(&self.pool, user_id, track_id).await?)
    }
}
