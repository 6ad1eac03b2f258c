//! Object storage vocabulary shared across crates.

/// A request for a short-lived signed download URL.
///
/// Produced by the access gate once a listen has been consumed; fulfilled by
/// the storage client. Carrying the bucket and TTL here keeps the gate free
/// of any storage SDK dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUrlRequest {
    pub bucket: String,
    pub object_key: String,
    pub ttl_secs: u64,
}
