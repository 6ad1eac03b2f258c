//! Payment gateway vocabulary shared across crates.
//!
//! The ledger reconciles against these values without knowing which gateway
//! produced them, so they live here rather than next to the HTTP client.

/// Transaction status as reported by the payment gateway.
///
/// The gateway's own vocabulary is wider (declined, canceled, refunded, ...);
/// anything that is neither pending nor approved settles as `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayStatus {
    Pending,
    Approved,
    #[serde(other)]
    Failed,
}

impl GatewayStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Failed => "failed",
        }
    }

    /// Whether this status ends the transaction's lifecycle on the gateway side.
    pub fn is_settled(self) -> bool {
        !matches!(self, Self::Pending)
    }
}
