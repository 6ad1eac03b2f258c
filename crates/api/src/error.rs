use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use griot_core::error::CoreError;
use griot_gateway::GatewayError;
use griot_ledger::{GateError, ReconcileError};
use griot_storage::StorageError;

/// Error type returned by every HTTP handler.
///
/// Failures from the domain crates arrive through `#[from]` conversions,
/// and the [`IntoResponse`] impl translates each into the wire shape
/// `{"error": <message>, "code": <CODE>}`. Play denials additionally
/// carry a `data` object so the client can offer the purchase without a
/// second round trip.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Domain error bubbled up from `griot_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Raw sqlx failure from a repository call.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The payment gateway was unreachable or rejected the call.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// URL presigning failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A play request was denied by the access gate.
    #[error(transparent)]
    Play(#[from] GateError),

    /// A status report could not be reconciled.
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    /// Malformed input that never reached domain validation.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unexpected server-side failure. Reported to the client sanitized.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Shorthand for handler results.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, data) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                    None,
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), None)
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone(), None),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone(), None)
                }
                CoreError::Forbidden(msg) => {
                    (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone(), None)
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Unhandled core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                        None,
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => {
                let (status, code, message) = classify_sqlx_error(err);
                (status, code, message, None)
            }

            // --- Payment gateway errors ---
            // The caller may retry (poll again); the server does not.
            AppError::Gateway(err) => {
                tracing::error!(error = %err, "Payment gateway error");
                (
                    StatusCode::BAD_GATEWAY,
                    "GATEWAY_UNAVAILABLE",
                    "Payment gateway is unavailable".to_string(),
                    None,
                )
            }

            // --- Storage errors ---
            AppError::Storage(err) => {
                tracing::error!(error = %err, "Storage presigning error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }

            // --- Play authorization denials ---
            AppError::Play(err) => match err {
                GateError::TrackNotFound(id) => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("Track with id {id} not found"),
                    None,
                ),
                GateError::NotEntitled { track_id, price } => (
                    StatusCode::FORBIDDEN,
                    "NOT_ENTITLED",
                    "Track has not been purchased".to_string(),
                    Some(json!({ "track_id": track_id, "price": price })),
                ),
                GateError::NoRemainingListens { track_id } => (
                    StatusCode::FORBIDDEN,
                    "NO_REMAINING_LISTENS",
                    "No listens remaining for this track".to_string(),
                    Some(json!({ "track_id": track_id, "remaining_listens": 0 })),
                ),
                GateError::Database(err) => {
                    let (status, code, message) = classify_sqlx_error(err);
                    (status, code, message, None)
                }
            },

            // --- Reconciliation errors ---
            AppError::Reconcile(err) => match err {
                ReconcileError::UnknownTransaction(id) => (
                    StatusCode::NOT_FOUND,
                    "UNKNOWN_TRANSACTION",
                    format!("No payment recorded for transaction {id}"),
                    None,
                ),
                ReconcileError::Database(err) => {
                    let (status, code, message) = classify_sqlx_error(err);
                    (status, code, message, None)
                }
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None)
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(data) = data {
            body["data"] = data;
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Translate a sqlx failure into a wire status, code, and message.
///
/// `RowNotFound` becomes a 404 and a duplicate key on a `uq_` constraint
/// becomes a 409. Anything else is logged server-side and reported as a
/// sanitized 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    fn sanitized_500() -> (StatusCode, &'static str, String) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An internal error occurred".to_string(),
        )
    }

    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // 23505 is Postgres for unique_violation.
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value for unique constraint {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            sanitized_500()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            sanitized_500()
        }
    }
}
