use crate::error::{AuthError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2,
};

pub struct PasswordHasher;

impl PasswordHasher {
    /// Hash a password using Argon2id. A fresh salt is drawn per call, so
    /// the same input never hashes to the same string twice; matches are
    /// established through `verify`, never by comparing hashes.
    pub fn hash(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::PasswordHashError(e.to_string()))?
            .to_string();

        Ok(password_hash)
    }

    /// Verify a candidate against a stored hash. A hash that fails to
    /// parse counts as a mismatch, not an error.
    pub fn verify(candidate: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "p1";
        let hash = PasswordHasher::hash(password).expect("Failed to hash password");

        assert!(PasswordHasher::verify(password, &hash));
        assert!(!PasswordHasher::verify("wrong", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let password = "p1";
        let first = PasswordHasher::hash(password).unwrap();
        let second = PasswordHasher::hash(password).unwrap();

        // Different salt, different hash, but both verify.
        assert_ne!(first, second);
        assert!(PasswordHasher::verify(password, &first));
        assert!(PasswordHasher::verify(password, &second));
    }

    #[test]
    fn test_malformed_hash_fails_verification() {
        assert!(!PasswordHasher::verify("p1", "not-a-phc-string"));
        assert!(!PasswordHasher::verify("p1", ""));
    }
}
