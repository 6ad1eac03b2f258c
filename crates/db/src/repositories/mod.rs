//! All SQL lives here, one zero-sized repository struct per table, with
//! `&PgPool` as every method's first argument. Methods that must join an
//! enclosing transaction take `&mut sqlx::Transaction` instead and carry
//! an `_in_tx` suffix.

pub mod entitlement_repo;
pub mod payment_repo;
pub mod track_repo;
pub mod user_repo;

pub use entitlement_repo::EntitlementRepo;
pub use payment_repo::PaymentRepo;
pub use track_repo::TrackRepo;
pub use user_repo::UserRepo;
