//! Signature verification for gateway callbacks.
//!
//! Callbacks carry `x-gateway-signature: t=<unix seconds>,s=<hex hmac>`,
//! where the HMAC-SHA256 input is `<t>.<raw body>` keyed with the shared
//! webhook secret. Timestamps older than the tolerance are rejected so a
//! captured callback cannot be replayed later.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the callback signature.
pub const SIGNATURE_HEADER: &str = "x-gateway-signature";

/// Maximum accepted age of a signed callback, in seconds.
pub const TIMESTAMP_TOLERANCE_SECS: i64 = 300;

/// Why a callback signature was rejected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("Malformed signature header")]
    Malformed,

    #[error("Signature timestamp outside tolerance")]
    Expired,

    #[error("Signature mismatch")]
    Mismatch,
}

/// Compute the full header value for a payload at a given timestamp.
///
/// This is the sending side of the scheme; tests use it to produce valid
/// callbacks.
pub fn sign_payload(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    format!("t={timestamp},s={}", compute_hex(secret, timestamp, payload))
}

/// Verify a callback signature header against the shared secret.
///
/// `now` is passed in rather than read from the clock so expiry is testable.
pub fn verify_signature(
    secret: &str,
    header: &str,
    payload: &[u8],
    now: i64,
) -> Result<(), SignatureError> {
    let (timestamp, provided) = parse_header(header)?;

    if (now - timestamp).abs() > TIMESTAMP_TOLERANCE_SECS {
        return Err(SignatureError::Expired);
    }

    let expected = compute_hex(secret, timestamp, payload);
    if !constant_time_eq(expected.as_bytes(), provided.as_bytes()) {
        return Err(SignatureError::Mismatch);
    }
    Ok(())
}

/// Hex HMAC over `<timestamp>.<payload>`.
fn compute_hex(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any size");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    format!("{:x}", mac.finalize().into_bytes())
}

/// Split `t=<unix>,s=<hex>` into its parts.
fn parse_header(header: &str) -> Result<(i64, &str), SignatureError> {
    let mut timestamp = None;
    let mut signature = None;

    for part in header.split(',') {
        match part.split_once('=') {
            Some(("t", value)) => timestamp = value.parse::<i64>().ok(),
            Some(("s", value)) => signature = Some(value),
            _ => {}
        }
    }

    match (timestamp, signature) {
        (Some(t), Some(s)) if !s.is_empty() => Ok((t, s)),
        _ => Err(SignatureError::Malformed),
    }
}

/// Byte comparison that does not short-circuit on the first difference.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
