/// API route handlers
///
/// Handlers are organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (signup, login)
/// - `tasks`: Task CRUD endpoints

pub mod auth;
pub mod health;
pub mod tasks;
