/// Task model and database operations
///
/// Tasks are owned exclusively by one user; the owning user id never changes
/// after creation, and deletion is permanent (no tombstone). All mutating
/// operations go through the ownership checks in
/// [`crate::auth::ownership`] before touching a row.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title VARCHAR(200) NOT NULL,
///     description VARCHAR(1000),
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::models::task::{CreateTask, Task};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
/// let task = Task::create(
///     &pool,
///     CreateTask {
///         user_id,
///         title: "Buy milk".to_string(),
///         description: None,
///     },
/// )
/// .await?;
///
/// let mine = Task::list_for_user(&pool, user_id, None).await?;
/// assert!(mine.iter().any(|t| t.id == task.id));
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Task model representing a single todo item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Sequentially assigned id, unique per store
    pub id: i64,

    /// Owning user; never changes after creation
    pub user_id: Uuid,

    /// Title (non-empty, at most 200 characters)
    pub title: String,

    /// Optional description (at most 1000 characters)
    pub description: Option<String>,

    /// Completion flag
    pub completed: bool,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Owning user id
    pub user_id: Uuid,

    /// Title (validated at the boundary)
    pub title: String,

    /// Optional description
    pub description: Option<String>,
}

/// Input for a partial task update
///
/// Only non-None fields are written; the rest keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,
}

impl Task {
    /// Creates a new task
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, title, description)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, title, description, completed, created_at, updated_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.title)
        .bind(data.description)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by id
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, completed, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks for a user, optionally filtered by completion status
    ///
    /// Results come back in storage order (ascending id). No pagination.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: Uuid,
        completed: Option<bool>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = match completed {
            Some(completed) => {
                sqlx::query_as::<_, Task>(
                    r#"
                    SELECT id, user_id, title, description, completed, created_at, updated_at
                    FROM tasks
                    WHERE user_id = $1 AND completed = $2
                    ORDER BY id
                    "#,
                )
                .bind(user_id)
                .bind(completed)
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Task>(
                    r#"
                    SELECT id, user_id, title, description, completed, created_at, updated_at
                    FROM tasks
                    WHERE user_id = $1
                    ORDER BY id
                    "#,
                )
                .bind(user_id)
                .fetch_all(pool)
                .await?
            }
        };

        Ok(tasks)
    }

    /// Applies a partial update to a task
    ///
    /// Only the fields present in `data` are written. The `updated_at`
    /// timestamp is always refreshed.
    ///
    /// # Returns
    ///
    /// The updated task, or None if the id does not exist.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, title, description, completed, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.description)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Flips a task's completion flag
    ///
    /// # Returns
    ///
    /// The toggled task, or None if the id does not exist.
    pub async fn toggle_completed(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET completed = NOT completed,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, title, description, completed, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task permanently
    ///
    /// # Returns
    ///
    /// True if a row was removed, false if the id did not exist.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_task_default_is_empty() {
        let update = UpdateTask::default();
        assert!(update.title.is_none());
        assert!(update.description.is_none());
    }

    #[test]
    fn test_create_task_struct() {
        let data = CreateTask {
            user_id: Uuid::new_v4(),
            title: "Buy milk".to_string(),
            description: Some("2% if they have it".to_string()),
        };

        assert_eq!(data.title, "Buy milk");
        assert!(data.description.is_some());
    }

    // Database operations are covered by the API integration tests.
}
