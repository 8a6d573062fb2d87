/// JWT token issuance and verification
///
/// Tokens are signed with HS256 (HMAC-SHA256) and carry the authenticated
/// user's id and email. The default lifetime is 7 days; callers can override
/// it per token.
///
/// Verification never panics: every failure mode (bad signature, expired,
/// malformed) is an explicit [`JwtError`] value, and callers treat the
/// absence of claims as an authentication failure.
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::jwt::{create_token, verify_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
///
/// let claims = Claims::new(user_id, "user@example.com");
/// let token = create_token(&claims, "your-secret-key")?;
///
/// let verified = verify_token(&token, "your-secret-key")?;
/// assert_eq!(verified.sub, Some(user_id));
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default token lifetime in days
pub const DEFAULT_TOKEN_LIFETIME_DAYS: i64 = 7;

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to encode a token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Token failed validation (bad signature, malformed, wrong algorithm)
    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// JWT claims structure
///
/// `sub` and `email` are optional on the wire so the access gate can tell a
/// token that verified but lacks a user identifier apart from a token that
/// failed verification outright.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<Uuid>,

    /// Email address of the authenticated user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates claims for a user with the default 7-day lifetime
    pub fn new(user_id: Uuid, email: impl Into<String>) -> Self {
        Self::with_lifetime(user_id, email, Duration::days(DEFAULT_TOKEN_LIFETIME_DAYS))
    }

    /// Creates claims with a custom lifetime
    ///
    /// A zero or negative duration yields an already-expired token, which
    /// tests use to exercise the expiry path.
    pub fn with_lifetime(user_id: Uuid, email: impl Into<String>, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: Some(user_id),
            email: Some(email.into()),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        }
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Creates a signed JWT from claims
///
/// # Errors
///
/// Returns `JwtError::CreateError` if encoding fails.
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key).map_err(|e| JwtError::CreateError(e.to_string()))
}

/// Verifies a JWT and extracts its claims
///
/// Checks the signature and expiry. On success returns the claims mapping;
/// on any failure returns an explicit error value rather than panicking.
///
/// # Errors
///
/// - `JwtError::Expired` if the token's `exp` is in the past
/// - `JwtError::Invalid` for a bad signature or malformed token
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    // No clock-skew allowance: a token issued with zero lifetime is expired.
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::Invalid(e.to_string()),
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_claims_default_lifetime() {
        let claims = Claims::new(Uuid::new_v4(), "user@example.com");

        let lifetime = claims.exp - claims.iat;
        assert_eq!(lifetime, Duration::days(7).num_seconds());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_create_and_verify_token() {
        let user_id = Uuid::new_v4();

        let claims = Claims::new(user_id, "user@example.com");
        let token = create_token(&claims, SECRET).expect("Should create token");

        let verified = verify_token(&token, SECRET).expect("Should verify token");
        assert_eq!(verified.sub, Some(user_id));
        assert_eq!(verified.email.as_deref(), Some("user@example.com"));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let claims = Claims::new(Uuid::new_v4(), "user@example.com");
        let token = create_token(&claims, SECRET).expect("Should create token");

        let result = verify_token(&token, "a-different-secret-key-entirely");
        assert!(matches!(result, Err(JwtError::Invalid(_))));
    }

    #[test]
    fn test_verify_expired_token() {
        let claims = Claims::with_lifetime(
            Uuid::new_v4(),
            "user@example.com",
            Duration::seconds(-3600),
        );
        assert!(claims.is_expired());

        let token = create_token(&claims, SECRET).expect("Should create token");
        let result = verify_token(&token, SECRET);

        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_verify_near_zero_lifetime_token() {
        let claims =
            Claims::with_lifetime(Uuid::new_v4(), "user@example.com", Duration::seconds(-1));
        let token = create_token(&claims, SECRET).expect("Should create token");

        assert!(matches!(verify_token(&token, SECRET), Err(JwtError::Expired)));
    }

    #[test]
    fn test_verify_malformed_token() {
        let result = verify_token("not.a.token", SECRET);
        assert!(matches!(result, Err(JwtError::Invalid(_))));
    }

    #[test]
    fn test_token_without_sub_still_verifies() {
        // A token that verifies but carries no user id: the gate treats the
        // missing claim as its own failure reason.
        let now = Utc::now();
        let claims = Claims {
            sub: None,
            email: None,
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };

        let token = create_token(&claims, SECRET).expect("Should create token");
        let verified = verify_token(&token, SECRET).expect("Should verify token");
        assert!(verified.sub.is_none());
    }
}
