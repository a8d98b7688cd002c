//! One-way hashing for credential secrets.
//!
//! API secrets and account passwords are stored as salted Argon2id hashes in
//! PHC string format; the plaintext is never persisted.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::errors::{Error, Result};

/// Hashes a secret with a freshly generated salt.
///
/// Equal inputs produce different hashes; use [`verify_secret`] to check a
/// candidate against a stored hash.
pub fn hash_secret(secret: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Secret(e.to_string()))
}

/// Checks a candidate secret against a stored hash in constant time.
///
/// Returns `false` for a wrong secret and for a malformed stored hash; the
/// two cases are deliberately indistinguishable to the caller.
pub fn verify_secret(candidate: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted() {
        let hash1 = hash_secret("s3cret").unwrap();
        let hash2 = hash_secret("s3cret").unwrap();

        assert!(hash1.starts_with("$argon2id$"));
        assert_ne!(hash1, hash2);

        assert!(verify_secret("s3cret", &hash1));
        assert!(verify_secret("s3cret", &hash2));
    }

    #[test]
    fn test_wrong_secret_fails() {
        let hash = hash_secret("s3cret").unwrap();
        assert!(!verify_secret("wrong", &hash));
    }

    #[test]
    fn test_malformed_hash_reads_as_failed_check() {
        assert!(!verify_secret("s3cret", "not-a-phc-string"));
        assert!(!verify_secret("s3cret", ""));
    }

    #[test]
    fn test_unicode_secret() {
        let hash = hash_secret("pässwörd✓").unwrap();
        assert!(verify_secret("pässwörd✓", &hash));
    }
}
