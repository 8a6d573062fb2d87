/// Authentication and authorization utilities
///
/// This module provides the authentication primitives for Taskdeck:
///
/// # Modules
///
/// - [`password`]: bcrypt password hashing with a SHA-256 pre-hash for
///   over-long passwords
/// - [`jwt`]: JWT token issuance and verification
/// - [`middleware`]: Bearer-token access gate for Axum routes
/// - [`ownership`]: Per-user task ownership checks
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::auth::password::{hash_password, verify_password};
/// use taskdeck_shared::auth::jwt::{create_token, verify_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// // JWT token issuance
/// let claims = Claims::new(Uuid::new_v4(), "user@example.com");
/// let token = create_token(&claims, "secret-key")?;
/// let verified = verify_token(&token, "secret-key")?;
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod ownership;
pub mod password;
