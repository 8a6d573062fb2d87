/// Bearer-token access gate for Axum
///
/// The gate extracts the `Authorization: Bearer <token>` header, verifies
/// the token, and requires a user-identifier claim. Each failure mode keeps
/// a machine-distinguishable reason — missing header, invalid token, or a
/// verified token with no user id — while every one of them surfaces to the
/// client as plain 401 Unauthorized.
///
/// After successful authentication the middleware inserts an [`AuthContext`]
/// into request extensions for handlers to extract.
///
/// # Example
///
/// ```no_run
/// use axum::{Extension, Router, routing::get, middleware};
/// use taskdeck_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, user {}!", auth.user_id)
/// }
/// ```

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{verify_token, JwtError};

/// Authentication context added to request extensions
///
/// Present on a request only after the gate accepted its bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user id
    pub user_id: Uuid,

    /// Email claim, when the token carried one
    pub email: Option<String>,
}

/// Error type for the access gate
///
/// The variants are deliberately distinct so logs and tests can tell the
/// failure modes apart, even though the HTTP status is 401 for all of them.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header, or it is not a Bearer credential
    #[error("Missing authorization header")]
    MissingHeader,

    /// Token failed verification (bad signature, expired, malformed)
    #[error("Invalid or expired token: {0}")]
    InvalidToken(#[from] JwtError),

    /// Token verified but carries no user-identifier claim
    #[error("Token payload missing user id")]
    MissingClaim,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!(reason = %self, "Request rejected by access gate");
        (StatusCode::UNAUTHORIZED, self.to_string()).into_response()
    }
}

/// Authenticates a request from its Authorization header value
///
/// This is the framework-free core of the gate: header → bearer token →
/// verified claims → required user-id claim.
///
/// # Errors
///
/// - [`AuthError::MissingHeader`] when the header is absent or not `Bearer`
/// - [`AuthError::InvalidToken`] when verification fails
/// - [`AuthError::MissingClaim`] when the token has no `sub`
pub fn authenticate(auth_header: Option<&str>, secret: &str) -> Result<AuthContext, AuthError> {
    let token = auth_header
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingHeader)?;

    let claims = verify_token(token, secret)?;

    let user_id = claims.sub.ok_or(AuthError::MissingClaim)?;

    Ok(AuthContext {
        user_id,
        email: claims.email,
    })
}

/// JWT authentication middleware
///
/// Wraps [`authenticate`] for use with `axum::middleware::from_fn`,
/// injecting the [`AuthContext`] into request extensions on success.
pub async fn require_auth(
    secret: String,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let context = authenticate(auth_header, &secret)?;
    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::{create_token, Claims};
    use chrono::{Duration, Utc};

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn bearer(token: &str) -> String {
        format!("Bearer {}", token)
    }

    #[test]
    fn test_authenticate_success() {
        let user_id = Uuid::new_v4();
        let token = create_token(&Claims::new(user_id, "user@example.com"), SECRET).unwrap();

        let context = authenticate(Some(&bearer(&token)), SECRET).expect("Should authenticate");
        assert_eq!(context.user_id, user_id);
        assert_eq!(context.email.as_deref(), Some("user@example.com"));
    }

    #[test]
    fn test_authenticate_missing_header() {
        let result = authenticate(None, SECRET);
        assert!(matches!(result, Err(AuthError::MissingHeader)));
    }

    #[test]
    fn test_authenticate_non_bearer_header() {
        let result = authenticate(Some("Basic dXNlcjpwYXNz"), SECRET);
        assert!(matches!(result, Err(AuthError::MissingHeader)));
    }

    #[test]
    fn test_authenticate_invalid_token() {
        let result = authenticate(Some("Bearer garbage"), SECRET);
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_authenticate_expired_token() {
        let claims =
            Claims::with_lifetime(Uuid::new_v4(), "user@example.com", Duration::seconds(-60));
        let token = create_token(&claims, SECRET).unwrap();

        let result = authenticate(Some(&bearer(&token)), SECRET);
        assert!(matches!(
            result,
            Err(AuthError::InvalidToken(JwtError::Expired))
        ));
    }

    #[test]
    fn test_authenticate_missing_user_claim() {
        let now = Utc::now();
        let claims = Claims {
            sub: None,
            email: Some("user@example.com".to_string()),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        let token = create_token(&claims, SECRET).unwrap();

        let result = authenticate(Some(&bearer(&token)), SECRET);
        assert!(matches!(result, Err(AuthError::MissingClaim)));
    }

    #[test]
    fn test_auth_errors_map_to_unauthorized() {
        for err in [
            AuthError::MissingHeader,
            AuthError::InvalidToken(JwtError::Expired),
            AuthError::MissingClaim,
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }
}
