use std::sync::Arc;

use griot_gateway::PaymentGateway;
use griot_ledger::{AccessGate, PaymentReconciler};
use griot_storage::StorageClient;

use crate::config::ServerConfig;

/// Everything a handler can reach through `State<AppState>`.
///
/// Cloned per request, so each field is an `Arc`, a pool handle, or a
/// service that is itself cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: griot_db::DbPool,
    /// Server configuration (JWT settings, grant size).
    pub config: Arc<ServerConfig>,
    /// Payment gateway client. A trait object so tests can substitute a stub.
    pub gateway: Arc<dyn PaymentGateway>,
    /// Object storage client for presigning play URLs.
    pub storage: StorageClient,
    /// Settles payments against gateway status reports.
    pub reconciler: PaymentReconciler,
    /// Exchanges listens for signed play URLs.
    pub gate: AccessGate,
    /// Shared secret for webhook signature verification. `None` disables
    /// verification (sandbox setups without a configured secret).
    pub webhook_secret: Option<String>,
}
