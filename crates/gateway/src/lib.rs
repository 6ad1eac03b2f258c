//! Payment gateway integration.
//!
//! [`PaymentGateway`] is the seam the rest of the system programs against;
//! [`FedapayClient`] is the production implementation over the FedaPay REST
//! API. Tests substitute their own stub implementations of the trait.

pub mod config;
pub mod fedapay;
pub mod types;
pub mod webhook;

use async_trait::async_trait;
use griot_core::gateway::GatewayStatus;

use crate::types::{CreateTransaction, GatewayTransaction, TransactionStatus};

pub use crate::config::GatewayConfig;
pub use crate::fedapay::FedapayClient;

/// Errors from the payment gateway layer.
///
/// Both variants surface to clients as 502: the gateway being unreachable
/// and the gateway rejecting us are equally "not payable right now".
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway returned a non-2xx status code.
    #[error("Gateway API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Async interface to a payment provider.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open a transaction with the provider and obtain its hosted payment
    /// page URL.
    async fn create_transaction(
        &self,
        request: &CreateTransaction,
    ) -> Result<GatewayTransaction, GatewayError>;

    /// Fetch the provider's current view of a transaction.
    async fn fetch_status(&self, transaction_id: &str)
        -> Result<TransactionStatus, GatewayError>;
}

/// Map a raw provider status string into the shared vocabulary.
pub fn map_status(raw: &str) -> GatewayStatus {
    match raw {
        "pending" => GatewayStatus::Pending,
        "approved" => GatewayStatus::Approved,
        _ => GatewayStatus::Failed,
    }
}
