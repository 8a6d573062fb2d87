/// Task ownership checks
///
/// Every read, update, and delete on a task goes through this gate: look the
/// task up by id, then compare its owner against the authenticated caller.
/// A missing task and a foreign task are distinct outcomes (404 vs 403 at
/// the HTTP boundary). The distinct status does let a non-owner learn that
/// a task id exists — an accepted tradeoff, kept as-is.
///
/// List operations never reach this module; they are scoped to the caller's
/// user id in the query itself.
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::auth::ownership::load_owned;
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, user_id: Uuid) -> anyhow::Result<()> {
/// let task = load_owned(&pool, 42, user_id).await?;
/// println!("Task belongs to caller: {}", task.title);
/// # Ok(())
/// # }
/// ```

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::task::Task;

/// Error type for ownership checks
#[derive(Debug, thiserror::Error)]
pub enum OwnershipError {
    /// No task with the given id exists
    #[error("Task not found")]
    NotFound,

    /// The task exists but belongs to a different user
    #[error("Not authorized to access this task")]
    Forbidden,

    /// Database error during lookup
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Checks that a task belongs to the given user
pub fn check_owner(task: &Task, user_id: Uuid) -> Result<(), OwnershipError> {
    if task.user_id != user_id {
        return Err(OwnershipError::Forbidden);
    }
    Ok(())
}

/// Loads a task and verifies the caller owns it
///
/// # Errors
///
/// - [`OwnershipError::NotFound`] when no task has the id
/// - [`OwnershipError::Forbidden`] when the task has a different owner
/// - [`OwnershipError::Database`] on connection/query failure
pub async fn load_owned(
    pool: &PgPool,
    task_id: i64,
    user_id: Uuid,
) -> Result<Task, OwnershipError> {
    let task = Task::find_by_id(pool, task_id)
        .await?
        .ok_or(OwnershipError::NotFound)?;

    check_owner(&task, user_id)?;

    Ok(task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn task_owned_by(user_id: Uuid) -> Task {
        Task {
            id: 1,
            user_id,
            title: "Buy milk".to_string(),
            description: None,
            completed: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_check_owner_accepts_owner() {
        let owner = Uuid::new_v4();
        let task = task_owned_by(owner);

        assert!(check_owner(&task, owner).is_ok());
    }

    #[test]
    fn test_check_owner_rejects_other_user() {
        let task = task_owned_by(Uuid::new_v4());
        let stranger = Uuid::new_v4();

        let result = check_owner(&task, stranger);
        assert!(matches!(result, Err(OwnershipError::Forbidden)));
    }
}
