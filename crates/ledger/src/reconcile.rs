//! Settles pending payments against gateway-reported statuses.

use griot_core::gateway::GatewayStatus;
use griot_db::models::payment::Payment;
use griot_db::models::status::PaymentStatus;
use griot_db::repositories::PaymentRepo;
use griot_db::DbPool;

use crate::ledger::EntitlementLedger;

#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("No payment recorded for gateway transaction {0}")]
    UnknownTransaction(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// How a reconciliation left the payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The payment settled as completed and listens were granted.
    Completed,
    /// The payment settled as failed. The ledger was not touched.
    Failed,
    /// The gateway still reports the transaction as pending.
    StillPending,
    /// The payment had already settled. Nothing changed.
    AlreadyTerminal,
}

impl ReconcileOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::StillPending => "still_pending",
            Self::AlreadyTerminal => "already_terminal",
        }
    }
}

/// A reconciled payment together with what reconciliation did to it.
#[derive(Debug)]
pub struct Reconciliation {
    pub payment: Payment,
    pub outcome: ReconcileOutcome,
}

/// Drives pending payments to their terminal status.
///
/// Both the gateway's callback redirect and the signed webhook funnel into
/// [`reconcile`](Self::reconcile), so the status reported by either channel
/// is applied through the same transition rules. The payment row is locked
/// for the duration of the settlement transaction, which makes replays and
/// concurrent reports of the same transaction harmless: the first one to
/// commit settles the payment, every later one sees a terminal row.
#[derive(Clone)]
pub struct PaymentReconciler {
    pool: DbPool,
    ledger: EntitlementLedger,
}

impl PaymentReconciler {
    pub fn new(pool: DbPool, ledger: EntitlementLedger) -> Self {
        Self { pool, ledger }
    }

    /// Applies a gateway-reported status to the matching payment.
    ///
    /// Pending payments move to completed or failed exactly once. Completing
    /// a payment and granting its listens commit in the same transaction. A
    /// pending report leaves the payment pending so a later report can still
    /// settle it.
    pub async fn reconcile(
        &self,
        transaction_id: &str,
        reported: GatewayStatus,
    ) -> Result<Reconciliation, ReconcileError> {
        let mut tx = self.pool.begin().await?;

        let Some(payment) = PaymentRepo::lock_by_transaction_id(&mut tx, transaction_id).await?
        else {
            return Err(ReconcileError::UnknownTransaction(transaction_id.to_string()));
        };

        if payment.is_terminal() {
            tx.rollback().await?;
            tracing::info!(
                payment_id = payment.id,
                transaction_id,
                status = payment.status_name(),
                "Ignoring status report for settled payment"
            );
            return Ok(Reconciliation {
                payment,
                outcome: ReconcileOutcome::AlreadyTerminal,
            });
        }

        let (payment, outcome) = match reported {
            GatewayStatus::Approved => {
                let payment =
                    PaymentRepo::set_status_in_tx(&mut tx, payment.id, PaymentStatus::Completed)
                        .await?;
                if let Some(track_id) = payment.track_id {
                    self.ledger
                        .grant_in_tx(&mut tx, payment.user_id, track_id)
                        .await?;
                }
                (payment, ReconcileOutcome::Completed)
            }
            GatewayStatus::Failed => {
                let payment =
                    PaymentRepo::set_status_in_tx(&mut tx, payment.id, PaymentStatus::Failed)
                        .await?;
                (payment, ReconcileOutcome::Failed)
            }
            GatewayStatus::Pending => (payment, ReconcileOutcome::StillPending),
        };

        tx.commit().await?;

        tracing::info!(
            payment_id = payment.id,
            transaction_id,
            outcome = outcome.as_str(),
            "Payment reconciled"
        );
        Ok(Reconciliation { payment, outcome })
    }
}
