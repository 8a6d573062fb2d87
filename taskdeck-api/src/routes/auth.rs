/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/auth/signup` - Register a new account
/// - `POST /api/auth/login` - Authenticate and get a token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{extract::State, http::StatusCode, Json};
use taskdeck_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, User},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Signup request
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Response for successful signup or login
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// User id
    pub user_id: String,

    /// Email address
    pub email: String,

    /// Bearer token
    pub token: String,
}

/// Maps validator errors into the API's per-field detail format
fn validation_details(e: validator::ValidationErrors) -> ApiError {
    let errors: Vec<ValidationErrorDetail> = e
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| ValidationErrorDetail {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string()),
            })
        })
        .collect();
    ApiError::ValidationError(errors)
}

/// Issues a bearer token for a user, honoring the configured lifetime
fn issue_token(state: &AppState, user: &User) -> Result<String, ApiError> {
    let claims = jwt::Claims::with_lifetime(
        user.id,
        user.email.clone(),
        chrono::Duration::days(state.config.jwt.expiration_days),
    );

    Ok(jwt::create_token(&claims, state.jwt_secret())?)
}

/// Register a new user account
///
/// Creates the user with a hashed password and returns a bearer token.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/signup
/// Content-Type: application/json
///
/// { "email": "user@example.com", "password": "longpassword1" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: email already registered
/// - `422 Unprocessable Entity`: invalid email or short password
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    req.validate().map_err(validation_details)?;

    // Check first for a friendlier error; the unique constraint still backs
    // this up under concurrent signups.
    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::BadRequest("Email already registered".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            password_hash,
        },
    )
    .await?;

    let token = issue_token(&state, &user)?;

    tracing::info!(user_id = %user.id, "New user registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user_id: user.id.to_string(),
            email: user.email,
            token,
        }),
    ))
}

/// Authenticate a user and return a bearer token
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/login
/// Content-Type: application/json
///
/// { "email": "user@example.com", "password": "longpassword1" }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: unknown email or wrong password (indistinguishable
///   to the caller)
/// - `422 Unprocessable Entity`: malformed email
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate().map_err(validation_details)?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let token = issue_token(&state, &user)?;

    Ok(Json(AuthResponse {
        user_id: user.id.to_string(),
        email: user.email,
        token,
    }))
}
