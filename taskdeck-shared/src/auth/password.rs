/// Password hashing module using bcrypt
///
/// Passwords are hashed with bcrypt at cost factor 12. bcrypt only consumes
/// the first 72 bytes of its input, so passwords longer than that are first
/// reduced with SHA-256 to a fixed-length hex string before hashing. The
/// same reduction is applied on verification, so the full input always
/// participates in the outcome.
///
/// # Security
///
/// - **Algorithm**: bcrypt, cost factor 12
/// - **Salt**: generated per hash and embedded in the output string
/// - **Long inputs**: SHA-256 pre-digest (64 hex chars) above 72 UTF-8 bytes
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let password = "super_secret_password_123";
/// let hash = hash_password(password)?;
///
/// assert!(verify_password(password, &hash)?);
/// assert!(!verify_password("wrong_password", &hash)?);
/// # Ok(())
/// # }
/// ```

use sha2::{Digest, Sha256};

/// bcrypt work factor. Cost 12 keeps offline brute force expensive while
/// staying under ~300ms per hash on current hardware.
const BCRYPT_COST: u32 = 12;

/// bcrypt's input length ceiling in bytes
const BCRYPT_MAX_BYTES: usize = 72;

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Stored hash is not a valid bcrypt string
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// Reduces over-long passwords to a fixed-length digest.
///
/// Inputs at or under 72 UTF-8 bytes pass through unchanged. Longer inputs
/// become the lowercase hex SHA-256 of the full byte sequence, so bytes past
/// position 72 still alter the result.
fn normalize(password: &str) -> String {
    if password.len() > BCRYPT_MAX_BYTES {
        hex::encode(Sha256::digest(password.as_bytes()))
    } else {
        password.to_string()
    }
}

/// Hashes a password with bcrypt at cost factor 12
///
/// The returned string embeds the algorithm version, cost, and salt, so it
/// is self-describing for verification.
///
/// # Errors
///
/// Returns `PasswordError::HashError` if bcrypt fails (effectively only on
/// RNG failure).
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::password::hash_password;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("my_password")?;
/// assert!(hash.starts_with("$2"));
/// # Ok(())
/// # }
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let normalized = normalize(password);

    bcrypt::hash(normalized, BCRYPT_COST).map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Verifies a password against a stored bcrypt hash
///
/// Applies the same over-length reduction as [`hash_password`] before
/// delegating to bcrypt's constant-time comparison.
///
/// # Returns
///
/// `Ok(true)` on a match, `Ok(false)` on a mismatch. A mismatch is never an
/// error.
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` only when the stored hash cannot be
/// parsed as a bcrypt string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let normalized = normalize(password);

    match bcrypt::verify(normalized, hash) {
        Ok(matches) => Ok(matches),
        Err(e) => Err(PasswordError::InvalidHash(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_format() {
        let hash = hash_password("test_password_123").expect("Hash should succeed");

        // bcrypt strings carry their version and cost
        assert!(hash.starts_with("$2"));
        assert!(hash.contains("$12$"));
    }

    #[test]
    fn test_hash_password_produces_different_salts() {
        let password = "same_password";

        let hash1 = hash_password(password).expect("Hash 1 should succeed");
        let hash2 = hash_password(password).expect("Hash 2 should succeed");

        // Different salts = different hashes, but both verify
        assert_ne!(hash1, hash2);
        assert!(verify_password(password, &hash1).unwrap());
        assert!(verify_password(password, &hash2).unwrap());
    }

    #[test]
    fn test_verify_password_correct() {
        let password = "correct_password";
        let hash = hash_password(password).expect("Hash should succeed");

        assert!(verify_password(password, &hash).expect("Verify should succeed"));
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password("correct_password").expect("Hash should succeed");

        let result = verify_password("wrong_password", &hash).expect("Verify should succeed");
        assert!(!result, "Wrong password should not verify");
    }

    #[test]
    fn test_verify_password_malformed_hash() {
        let result = verify_password("password", "not-a-bcrypt-hash");
        assert!(matches!(result, Err(PasswordError::InvalidHash(_))));
    }

    #[test]
    fn test_normalize_short_passthrough() {
        assert_eq!(normalize("short"), "short");

        // Exactly 72 bytes stays as-is
        let exact = "a".repeat(72);
        assert_eq!(normalize(&exact), exact);
    }

    #[test]
    fn test_normalize_long_is_hex_digest() {
        let long = "a".repeat(73);
        let reduced = normalize(&long);
        assert_eq!(reduced.len(), 64);
        assert!(reduced.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_long_passwords_differ_past_position_72() {
        // Two 100-byte passwords differing only in the last byte must not
        // collapse to the same hash outcome.
        let mut p1 = "x".repeat(99);
        let mut p2 = p1.clone();
        p1.push('a');
        p2.push('b');

        assert_ne!(normalize(&p1), normalize(&p2));

        let hash1 = hash_password(&p1).expect("Hash should succeed");
        assert!(verify_password(&p1, &hash1).unwrap());
        assert!(!verify_password(&p2, &hash1).unwrap());
    }

    #[test]
    fn test_long_password_roundtrip() {
        let long = "pass-".repeat(30);
        assert!(long.len() > 72);

        let hash = hash_password(&long).expect("Hash should succeed");
        assert!(verify_password(&long, &hash).unwrap());
    }

    #[test]
    fn test_hash_verify_roundtrip() {
        let passwords = vec![
            "simple",
            "with spaces",
            "with-special-chars!@#$%",
            "unicode-密码-パスワード",
        ];

        for password in passwords {
            let hash = hash_password(password).expect("Hash should succeed");
            let verified = verify_password(password, &hash).expect("Verify should succeed");
            assert!(verified, "Password '{}' should verify", password);
        }
    }
}
