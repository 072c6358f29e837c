//! Password hashing and verification.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Minimum password length accepted at signup
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Hash a password with a fresh random salt.
///
/// # Errors
/// Returns an error only if the hasher itself fails; normal input never errors.
pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|err| anyhow!("failed to hash password: {err}"))?
        .to_string();
    Ok(hash)
}

/// Verify a password against a stored digest.
/// Returns false on any mismatch or malformed digest; never panics.
#[must_use]
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_against_original_plaintext() {
        let digest = hash_password("hunter2!").unwrap();
        assert!(verify_password(&digest, "hunter2!"));
    }

    #[test]
    fn digest_never_equals_plaintext() {
        let digest = hash_password("hunter2!").unwrap();
        assert_ne!(digest, "hunter2!");
        assert!(digest.starts_with("$argon2"));
    }

    #[test]
    fn wrong_password_fails_verification() {
        let digest = hash_password("hunter2!").unwrap();
        assert!(!verify_password(&digest, "hunter3!"));
        assert!(!verify_password(&digest, ""));
    }

    #[test]
    fn malformed_digest_fails_quietly() {
        assert!(!verify_password("not-a-phc-string", "hunter2!"));
        assert!(!verify_password("", "hunter2!"));
    }

    #[test]
    fn same_password_hashes_differently_per_salt() {
        let first = hash_password("hunter2!").unwrap();
        let second = hash_password("hunter2!").unwrap();
        assert_ne!(first, second);
    }
}
