use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use crate::error::AppError;

/// Hash a password with Argon2id into a PHC string. A fresh random salt is
/// generated per call and embedded in the output.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Hash(e.to_string()))?
        .to_string();
    Ok(phc)
}

/// Verify a password against a stored PHC string. An unparseable hash
/// counts as a mismatch.
pub fn verify_password(phc: &str, password: &str) -> bool {
    match PasswordHash::new(phc) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verify() {
        let password = "correct horse battery staple";

        let phc = hash_password(password).unwrap();
        assert!(verify_password(&phc, password));
        assert!(!verify_password(&phc, "wrong_password"));
    }

    #[test]
    fn test_salts_differ() {
        let a = hash_password("pw").unwrap();
        let b = hash_password("pw").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_hash_rejects() {
        assert!(!verify_password("not-a-phc-string", "pw"));
    }
}
