//! Handlers for the `/payments` resource: purchase initiation, the gateway
//! callback, and status verification.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use griot_core::error::CoreError;
use griot_core::gateway::GatewayStatus;
use griot_core::types::DbId;
use griot_db::models::payment::CreatePayment;
use griot_db::repositories::{PaymentRepo, TrackRepo};
use griot_gateway::types::{CreateTransaction, PaymentMethod};
use griot_gateway::webhook::{self, SIGNATURE_HEADER};
use griot_ledger::Reconciliation;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /payments`.
///
/// Either `track_id` (the amount is the track's price) or a free-standing
/// `amount` must be provided.
#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub track_id: Option<DbId>,
    pub amount: Option<i64>,
    pub payment_method: PaymentMethod,
    /// Payer's mobile-money number, forwarded to the gateway when present.
    pub phone: Option<String>,
}

/// Response body for `POST /payments`: the pending payment plus the hosted
/// checkout URL the client redirects the buyer to.
#[derive(Debug, Serialize)]
pub struct PaymentInitiated {
    pub payment_id: DbId,
    pub transaction_id: String,
    pub amount: i64,
    pub status: &'static str,
    pub payment_url: String,
    pub track_id: Option<DbId>,
}

/// Callback body posted by the gateway after checkout.
#[derive(Debug, Deserialize)]
pub struct CallbackPayload {
    #[serde(deserialize_with = "de_transaction_id")]
    pub transaction_id: String,
    pub status: GatewayStatus,
}

/// A reconciled payment as returned to API clients.
#[derive(Debug, Serialize)]
pub struct ReconciliationResponse {
    pub payment_id: DbId,
    pub transaction_id: Option<String>,
    pub status: &'static str,
    pub outcome: &'static str,
}

impl From<Reconciliation> for ReconciliationResponse {
    fn from(reconciliation: Reconciliation) -> Self {
        Self {
            payment_id: reconciliation.payment.id,
            status: reconciliation.payment.status_name(),
            outcome: reconciliation.outcome.as_str(),
            transaction_id: reconciliation.payment.transaction_id,
        }
    }
}

/// Response body for `GET /payments/status/{transaction_id}`.
#[derive(Debug, Serialize)]
pub struct TransactionStatusResponse {
    pub transaction_id: String,
    pub status: &'static str,
    pub amount: i64,
}

/// The gateway reports the transaction id as a JSON number; replays from
/// our own tooling use strings. Accept both.
fn de_transaction_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Num(i64),
        Str(String),
    }
    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Num(n) => n.to_string(),
        IdRepr::Str(s) => s,
    })
}

// ---------------------------------------------------------------------------
// POST /payments
// ---------------------------------------------------------------------------

/// Create a pending payment and open a gateway transaction for it.
///
/// The payment row is created before the gateway call so a crash in between
/// leaves a pending row with no transaction id rather than an untracked
/// charge. If the gateway rejects the call, the row is marked failed and
/// the client gets 502.
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreatePaymentRequest>,
) -> AppResult<impl IntoResponse> {
    let (amount, description) = match input.track_id {
        Some(track_id) => {
            let track = TrackRepo::find_by_id(&state.pool, track_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Track",
                    id: track_id,
                }))?;
            (
                track.price,
                format!("Purchase: {} - {}", track.title, track.artist),
            )
        }
        None => {
            let amount = input.amount.ok_or_else(|| {
                AppError::BadRequest("Either track_id or amount is required".into())
            })?;
            if amount <= 0 {
                return Err(AppError::Core(CoreError::Validation(
                    "Amount must be positive".into(),
                )));
            }
            (amount, "Music purchase".to_string())
        }
    };

    let payment = PaymentRepo::create(
        &state.pool,
        &CreatePayment {
            user_id: auth_user.user_id,
            track_id: input.track_id,
            amount,
        },
    )
    .await?;

    let request = CreateTransaction {
        amount,
        description,
        customer_id: auth_user.user_id,
        payment_method: input.payment_method,
        phone: input.phone.clone(),
    };

    let gateway_txn = match state.gateway.create_transaction(&request).await {
        Ok(txn) => txn,
        Err(gateway_err) => {
            // No transaction id exists yet, so nothing to reconcile later.
            if let Err(db_err) = PaymentRepo::mark_failed(&state.pool, payment.id).await {
                tracing::error!(
                    payment_id = payment.id,
                    error = %db_err,
                    "Failed to mark payment failed after gateway rejection"
                );
            }
            return Err(AppError::Gateway(gateway_err));
        }
    };

    let payment =
        PaymentRepo::attach_transaction(&state.pool, payment.id, &gateway_txn.transaction_id)
            .await?;
    tracing::info!(
        payment_id = payment.id,
        transaction_id = %gateway_txn.transaction_id,
        amount,
        "Payment initiated"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: PaymentInitiated {
                payment_id: payment.id,
                transaction_id: gateway_txn.transaction_id,
                amount: payment.amount,
                status: payment.status_name(),
                payment_url: gateway_txn.payment_url,
                track_id: payment.track_id,
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// POST /payments/callback
// ---------------------------------------------------------------------------

/// Receive the gateway's status report after checkout.
///
/// Public (the gateway is the caller). When a webhook secret is configured
/// the signature header is required and checked over the raw body before
/// the body is parsed.
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> AppResult<impl IntoResponse> {
    if let Some(secret) = &state.webhook_secret {
        let header = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Forbidden("Missing webhook signature".into()))
            })?;

        let now = chrono::Utc::now().timestamp();
        webhook::verify_signature(secret, header, body.as_bytes(), now).map_err(|e| {
            tracing::warn!(error = %e, "Rejected webhook with bad signature");
            AppError::Core(CoreError::Forbidden("Invalid webhook signature".into()))
        })?;
    }

    let payload: CallbackPayload = serde_json::from_str(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid callback payload: {e}")))?;

    let reconciliation = state
        .reconciler
        .reconcile(&payload.transaction_id, payload.status)
        .await?;

    Ok(Json(DataResponse {
        data: ReconciliationResponse::from(reconciliation),
    }))
}

// ---------------------------------------------------------------------------
// GET /payments/verify/{transaction_id}
// ---------------------------------------------------------------------------

/// Poll the gateway for a transaction's status and reconcile the payment
/// with whatever it reports. The client-side alternative to waiting for
/// the callback.
pub async fn verify(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(transaction_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let status = state.gateway.fetch_status(&transaction_id).await?;

    let reconciliation = state
        .reconciler
        .reconcile(&transaction_id, status.status)
        .await?;

    Ok(Json(DataResponse {
        data: ReconciliationResponse::from(reconciliation),
    }))
}

// ---------------------------------------------------------------------------
// GET /payments/status/{transaction_id}
// ---------------------------------------------------------------------------

/// Proxy the gateway's view of a transaction without touching local state.
pub async fn status(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(transaction_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let status = state.gateway.fetch_status(&transaction_id).await?;

    Ok(Json(DataResponse {
        data: TransactionStatusResponse {
            transaction_id,
            status: status.status.as_str(),
            amount: status.amount,
        },
    }))
}
