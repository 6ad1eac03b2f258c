//! Shared harness for HTTP-level integration tests.
//!
//! Builds the production router over a stub payment gateway so tests drive
//! the full middleware stack and settlement flow without touching the real
//! provider. Storage presigning is a local computation, so the storage
//! client runs with static test credentials and no network.

#![allow(dead_code)] // not every test binary uses every helper

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use griot_api::auth::jwt::JwtConfig;
use griot_api::config::ServerConfig;
use griot_api::router::build_app_router;
use griot_api::state::AppState;
use griot_core::gateway::GatewayStatus;
use griot_gateway::types::{CreateTransaction, GatewayTransaction, TransactionStatus};
use griot_gateway::{GatewayError, PaymentGateway};
use griot_ledger::{AccessGate, EntitlementLedger, PaymentReconciler};
use griot_storage::{StorageClient, StorageConfig};

/// Bucket used by the test storage client; assertions on presigned URLs
/// look for it in the path.
pub const TEST_BUCKET: &str = "music-files";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        listens_per_purchase: 10,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough-for-hmac".to_string(),
            expiry_days: 7,
        },
    }
}

// ---------------------------------------------------------------------------
// Stub gateway
// ---------------------------------------------------------------------------

/// In-memory stand-in for the payment provider.
///
/// `create_transaction` hands out sequential transaction ids and remembers
/// them as pending; tests flip their status with [`set_status`] to simulate
/// the provider settling a charge, or arm [`fail_next_create`] to simulate
/// an outage.
///
/// [`set_status`]: StubGateway::set_status
/// [`fail_next_create`]: StubGateway::fail_next_create
pub struct StubGateway {
    next_id: AtomicI64,
    statuses: Mutex<HashMap<String, GatewayStatus>>,
    fail_create: AtomicBool,
}

impl StubGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicI64::new(9001),
            statuses: Mutex::new(HashMap::new()),
            fail_create: AtomicBool::new(false),
        })
    }

    /// Set the status the stub reports for a transaction.
    pub fn set_status(&self, transaction_id: &str, status: GatewayStatus) {
        self.statuses
            .lock()
            .unwrap()
            .insert(transaction_id.to_string(), status);
    }

    /// Make the next `create_transaction` call fail, simulating an outage.
    pub fn fail_next_create(&self) {
        self.fail_create.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_transaction(
        &self,
        _request: &CreateTransaction,
    ) -> Result<GatewayTransaction, GatewayError> {
        if self.fail_create.swap(false, Ordering::SeqCst) {
            return Err(GatewayError::Api {
                status: 503,
                body: "provider offline".to_string(),
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        self.statuses
            .lock()
            .unwrap()
            .insert(id.clone(), GatewayStatus::Pending);
        Ok(GatewayTransaction {
            transaction_id: id.clone(),
            payment_url: format!("https://pay.test/{id}"),
        })
    }

    async fn fetch_status(
        &self,
        transaction_id: &str,
    ) -> Result<TransactionStatus, GatewayError> {
        let statuses = self.statuses.lock().unwrap();
        match statuses.get(transaction_id) {
            Some(status) => Ok(TransactionStatus {
                status: *status,
                amount: 500,
            }),
            None => Err(GatewayError::Api {
                status: 404,
                body: format!("transaction {transaction_id} not found"),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

fn test_storage_client() -> StorageClient {
    StorageClient::new(&StorageConfig {
        endpoint: Some("http://localhost:9000".to_string()),
        region: "us-east-1".to_string(),
        access_key_id: "test-access-key".to_string(),
        secret_access_key: "test-secret-key".to_string(),
        audio_bucket: TEST_BUCKET.to_string(),
        play_url_ttl_secs: 3600,
    })
}

/// Build the full application router plus a handle to the stub gateway.
///
/// Webhook signature verification is disabled; use
/// [`build_test_app_with_webhook_secret`] to exercise it.
pub fn build_test_app(pool: PgPool) -> (Router, Arc<StubGateway>) {
    build_app(pool, None)
}

/// Build the app with webhook signature verification enabled.
pub fn build_test_app_with_webhook_secret(
    pool: PgPool,
    secret: &str,
) -> (Router, Arc<StubGateway>) {
    build_app(pool, Some(secret.to_string()))
}

fn build_app(pool: PgPool, webhook_secret: Option<String>) -> (Router, Arc<StubGateway>) {
    let config = test_config();
    let stub = StubGateway::new();
    let gateway: Arc<dyn PaymentGateway> = stub.clone();

    let ledger = EntitlementLedger::with_grant_listens(pool.clone(), config.listens_per_purchase);
    let reconciler = PaymentReconciler::new(pool.clone(), ledger.clone());
    let gate = AccessGate::new(pool.clone(), ledger, TEST_BUCKET.to_string(), 3600);

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        gateway,
        storage: test_storage_client(),
        reconciler,
        gate,
        webhook_secret,
    };

    (build_app_router(state, &config), stub)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request to the app.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and a Bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
