//! Row structs and their wire shapes.
//!
//! The pattern per table: a `FromRow` struct mirroring the row, an insert
//! payload, and a `Serialize` response shape wherever the raw row carries
//! something the API must not expose.

pub mod entitlement;
pub mod payment;
pub mod status;
pub mod track;
pub mod user;
