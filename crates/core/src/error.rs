use crate::types::DbId;

/// Domain failures that mean something to a caller, as opposed to
/// infrastructure errors that stay server-side.
///
/// The HTTP layer owns the mapping of each variant to a status code and
/// wire message. Display output here is for logs.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced row does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input broke a domain rule before touching the database.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The request contradicts state that already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Missing or unusable credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Valid credentials without the right to do this.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A broken invariant surfaced at runtime.
    #[error("internal error: {0}")]
    Internal(String),
}
