//! Task persistence: point reads, creation, partial update, deletion, and
//! execution of list query specs. Ownership is enforced here via
//! [`assert_owner`], applied by handlers after a successful lookup.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Task, TaskUpdate};
use crate::store::query::TaskQuerySpec;

const TASK_COLUMNS: &str = "id, user_id, title, description, deadline, status, priority, created_at";

/// Fails with `Forbidden` unless `user_id` owns the task.
///
/// Ownership is identifier equality only; there is no delegation, sharing,
/// or administrative override. Callers must have already resolved the task
/// (a lookup miss is `NotFound`, reported before this check ever runs).
pub fn assert_owner(task: &Task, user_id: i32) -> Result<(), AppError> {
    if task.user_id != user_id {
        return Err(AppError::Forbidden("Not authorized to access this task".into()));
    }
    Ok(())
}

/// Fetches a task by identifier regardless of owner.
pub async fn fetch(pool: &PgPool, id: Uuid) -> Result<Option<Task>, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE id = $1",
        TASK_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(task)
}

/// Persists a new task. `created_at` is assigned by the database; the
/// returned row is authoritative.
pub async fn insert(pool: &PgPool, task: &Task) -> Result<Task, AppError> {
    let created = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks (id, user_id, title, description, deadline, status, priority) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(task.id)
    .bind(task.user_id)
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.deadline)
    .bind(task.status)
    .bind(task.priority)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

/// Applies a partial update as a single atomic document replace: supplied
/// fields overwrite, omitted fields keep their prior values via COALESCE.
/// The owner and creation timestamp are never touched.
pub async fn update(pool: &PgPool, id: Uuid, changes: &TaskUpdate) -> Result<Task, AppError> {
    let updated = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks SET \
             title = COALESCE($1, title), \
             description = COALESCE($2, description), \
             deadline = COALESCE($3, deadline), \
             status = COALESCE($4, status), \
             priority = COALESCE($5, priority) \
         WHERE id = $6 \
         RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(&changes.title)
    .bind(&changes.description)
    .bind(changes.deadline)
    .bind(changes.status)
    .bind(changes.priority)
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(updated)
}

/// Deletes a task permanently; there is no soft delete.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(())
}

/// Executes a query spec, materializing the matching tasks once.
///
/// The SQL text and the bind sequence both come from the spec, so identical
/// parameters always produce the same statement.
pub async fn list(pool: &PgPool, spec: &TaskQuerySpec) -> Result<Vec<Task>, AppError> {
    let sql = spec.sql();
    let mut query = sqlx::query_as::<_, Task>(&sql).bind(spec.owner_id());

    if let Some(status) = spec.status() {
        query = query.bind(status);
    }
    if let Some(pattern) = spec.search_pattern() {
        query = query.bind(pattern.clone());
        query = query.bind(pattern);
    }

    let tasks = query.fetch_all(pool).await?;
    Ok(tasks)
}
