//! Shared domain vocabulary: ids, timestamps, the common error type, and the
//! payment/storage value types that cross crate boundaries.

pub mod error;
pub mod gateway;
pub mod storage;
pub mod types;

pub use error::CoreError;
