//! Password storage for listener accounts.
//!
//! Hashes are Argon2id in PHC string form, so the parameters and salt ride
//! along with the digest and verification needs no side table. Plaintext
//! passwords exist only inside the register and login handlers.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Hash a plaintext password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hashed = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hashed.to_string())
}

/// Check a plaintext password against a stored PHC hash.
///
/// A mismatch is `Ok(false)`. `Err` means the stored hash itself could not
/// be parsed or verified.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(other) => Err(other),
    }
}

/// Reject passwords shorter than [`MIN_PASSWORD_LENGTH`].
pub fn validate_password_strength(password: &str) -> Result<(), String> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_hash_is_phc_argon2id() {
        let hash = hash_password("correct-horse").expect("hashing should succeed");
        assert!(hash.starts_with("$argon2id$"), "expected argon2id PHC prefix");
        assert!(
            verify_password("correct-horse", &hash).expect("verify should succeed"),
            "the original password must verify"
        );
    }

    #[test]
    fn hashes_are_salted_per_call() {
        let first = hash_password("same-password").expect("hashing should succeed");
        let second = hash_password("same-password").expect("hashing should succeed");

        assert_ne!(first, second, "each hash must use a fresh salt");
        assert!(verify_password("same-password", &first).unwrap());
        assert!(verify_password("same-password", &second).unwrap());
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("real-password").expect("hashing should succeed");
        let verified = verify_password("guessed-password", &hash).expect("verify should succeed");
        assert!(!verified);
    }

    #[test]
    fn minimum_length_is_enforced() {
        let rejected = validate_password_strength("12345").unwrap_err();
        assert!(
            rejected.contains("at least 6 characters"),
            "error message should state the minimum length, got: {rejected}"
        );

        // The boundary itself is accepted.
        assert!(validate_password_strength("123456").is_ok());
    }
}
