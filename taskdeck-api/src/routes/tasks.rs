/// Task CRUD endpoints
///
/// All routes here sit behind the bearer-token gate; handlers receive the
/// authenticated caller via the `AuthContext` extension. Reads, updates,
/// and deletes of a single task additionally pass the ownership check, and
/// list operations are always scoped to the caller.
///
/// # Endpoints
///
/// - `GET    /api/tasks?completed=` - List the caller's tasks
/// - `POST   /api/tasks`            - Create a task
/// - `GET    /api/tasks/:id`        - Fetch one task
/// - `PUT    /api/tasks/:id`        - Partially update title/description
/// - `DELETE /api/tasks/:id`        - Delete permanently
/// - `PATCH  /api/tasks/:id/complete` - Toggle the completion flag

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskdeck_shared::{
    auth::{middleware::AuthContext, ownership},
    models::task::{CreateTask, Task, UpdateTask},
};
use validator::Validate;

/// Request body for creating a task
#[derive(Debug, Deserialize, Validate)]
pub struct TaskCreateRequest {
    /// Title (non-empty once trimmed, at most 200 chars)
    pub title: String,

    /// Optional description (at most 1000 chars)
    #[validate(length(max = 1000, message = "Description must be 1000 characters or less"))]
    pub description: Option<String>,
}

/// Request body for a partial task update
#[derive(Debug, Deserialize, Validate)]
pub struct TaskUpdateRequest {
    /// New title, re-validated when provided
    pub title: Option<String>,

    /// New description
    #[validate(length(max = 1000, message = "Description must be 1000 characters or less"))]
    pub description: Option<String>,
}

/// Query parameters for the list endpoint
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    /// Optional completion-status filter
    pub completed: Option<bool>,
}

/// Response body for the list endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskListResponse {
    /// The caller's tasks, in storage order
    pub tasks: Vec<Task>,

    /// Number of tasks returned
    pub total: usize,
}

/// Validates a title and returns it trimmed
///
/// Titles must be non-empty after trimming and at most 200 characters.
fn validate_title(title: &str) -> Result<String, ApiError> {
    let trimmed = title.trim();

    if trimmed.is_empty() {
        return Err(ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "title".to_string(),
            message: "Title cannot be empty or whitespace only".to_string(),
        }]));
    }

    if trimmed.chars().count() > 200 {
        return Err(ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "title".to_string(),
            message: "Title must be 200 characters or less".to_string(),
        }]));
    }

    Ok(trimmed.to_string())
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

/// List the caller's tasks, optionally filtered by completion status
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<TaskListResponse>> {
    let tasks = Task::list_for_user(&state.db, auth.user_id, query.completed).await?;
    let total = tasks.len();

    Ok(Json(TaskListResponse { tasks, total }))
}

/// Create a new task owned by the caller
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<TaskCreateRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate().map_err(validation_details)?;
    let title = validate_title(&req.title)?;

    let task = Task::create(
        &state.db,
        CreateTask {
            user_id: auth.user_id,
            title,
            description: req.description,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Fetch a single task
///
/// # Errors
///
/// - `404 Not Found`: no task with this id
/// - `403 Forbidden`: the task belongs to another user
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<i64>,
) -> ApiResult<Json<Task>> {
    let task = ownership::load_owned(&state.db, task_id, auth.user_id).await?;

    Ok(Json(task))
}

/// Partially update a task's title and/or description
///
/// Only the provided fields change; a provided title is re-validated.
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<i64>,
    Json(req): Json<TaskUpdateRequest>,
) -> ApiResult<Json<Task>> {
    req.validate().map_err(validation_details)?;
    let title = req.title.as_deref().map(validate_title).transpose()?;

    ownership::load_owned(&state.db, task_id, auth.user_id).await?;

    let task = Task::update(
        &state.db,
        task_id,
        UpdateTask {
            title,
            description: req.description,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// Delete a task permanently
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<i64>,
) -> ApiResult<StatusCode> {
    ownership::load_owned(&state.db, task_id, auth.user_id).await?;

    Task::delete(&state.db, task_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Toggle a task's completion status
pub async fn toggle_task_complete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<i64>,
) -> ApiResult<Json<Task>> {
    ownership::load_owned(&state.db, task_id, auth.user_id).await?;

    let task = Task::toggle_completed(&state.db, task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}
