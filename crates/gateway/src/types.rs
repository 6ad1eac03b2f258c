//! Request/response value types for the gateway seam.

use griot_core::gateway::GatewayStatus;
use griot_core::types::DbId;
use serde::{Deserialize, Serialize};

/// Mobile-money and card rails the gateway accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    OrangeMoney,
    Wave,
    FreeMoney,
    Visa,
}

/// Inputs for opening a transaction with the provider.
#[derive(Debug, Clone)]
pub struct CreateTransaction {
    /// Amount in whole XOF; the wire layer converts to minor units.
    pub amount: i64,
    pub description: String,
    /// Local customer id, echoed back in provider records.
    pub customer_id: DbId,
    pub payment_method: PaymentMethod,
    /// Payer's mobile-money number, when the method needs one.
    pub phone: Option<String>,
}

/// A transaction the provider has accepted.
#[derive(Debug, Clone)]
pub struct GatewayTransaction {
    pub transaction_id: String,
    /// Hosted checkout page for the buyer.
    pub payment_url: String,
}

/// The provider's current view of a transaction.
#[derive(Debug, Clone)]
pub struct TransactionStatus {
    pub status: GatewayStatus,
    /// Amount in whole XOF (already divided back from minor units).
    pub amount: i64,
}
