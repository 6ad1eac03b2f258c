//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the repositories in `griot_db` and the domain
//! services in `griot_ledger`, and map errors via [`crate::error::AppError`].

pub mod auth;
pub mod library;
pub mod payment;
pub mod track;
