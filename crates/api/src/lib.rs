//! HTTP layer of the Griot storefront.
//!
//! Everything the binary wires together lives here as a library, so the
//! integration tests can assemble the exact same router against a test
//! database.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
