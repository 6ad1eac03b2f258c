//! Request extractors, currently just [`auth::AuthUser`] for login-gated
//! handlers.

pub mod auth;
