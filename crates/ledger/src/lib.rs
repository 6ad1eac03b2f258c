//! Entitlement accounting for purchased tracks.
//!
//! - [`EntitlementLedger`] owns the listen balances: granting on purchase,
//!   decrementing on play, never going below zero.
//! - [`PaymentReconciler`] settles pending payments against the status the
//!   gateway reports and grants listens exactly once per purchase.
//! - [`AccessGate`] is the only path that spends a listen. It turns a play
//!   request into a short-lived signed URL request for the storage layer.
//!
//! All three operate on the shared Postgres pool from `griot-db`. Settlement
//! and granting happen inside a single transaction so a crash between the
//! two leaves no half-applied purchase.

pub mod gate;
pub mod ledger;
pub mod reconcile;

pub use gate::{AccessGate, GateError, PlayAuthorization};
pub use ledger::{EntitlementLedger, GrantOutcome, LedgerError};
pub use reconcile::{PaymentReconciler, ReconcileError, ReconcileOutcome, Reconciliation};
