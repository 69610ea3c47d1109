use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{Task, TaskInput, TaskQuery, TaskUpdate},
    store::{self, TaskQuerySpec},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Retrieves the authenticated user's tasks.
///
/// Supports filtering by `status`, a case-insensitive `search` over titles
/// and descriptions, and sorting via `sortBy` (`deadline`, `priority`,
/// `createdAt`) and `sortOrder` (`asc`/`desc`). Without sort parameters,
/// tasks come back newest first. Results are always scoped to the caller;
/// another user's tasks are never visible here.
#[get("")]
pub async fn get_tasks(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    query_params: web::Query<TaskQuery>,
) -> Result<impl Responder, AppError> {
    let spec = TaskQuerySpec::build(user.0.id, &query_params);
    let tasks = store::tasks::list(&pool, &spec).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated user.
///
/// The owner is taken from the resolved identity, never from the payload.
/// Omitted status and priority default to `pending` and `medium`.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = Task::new(task_data.into_inner(), user.0.id);
    let created = store::tasks::insert(&pool, &task).await?;

    Ok(HttpResponse::Created().json(created))
}

/// Retrieves a single task by identifier.
///
/// A missing or malformed identifier is `404`; an existing task owned by
/// someone else is rejected by the ownership guard.
#[get("/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = parse_task_id(&task_id)?;

    let task = store::tasks::fetch(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;
    store::tasks::assert_owner(&task, user.0.id)?;

    Ok(HttpResponse::Ok().json(task))
}

/// Updates a task the authenticated user owns.
///
/// The body is a partial field set: only supplied fields are replaced,
/// omitted fields retain their prior values. Returns the full updated task.
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    task_id: web::Path<String>,
    task_data: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;
    let id = parse_task_id(&task_id)?;

    let task = store::tasks::fetch(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;
    store::tasks::assert_owner(&task, user.0.id)?;

    let updated = store::tasks::update(&pool, id, &task_data).await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// Deletes a task the authenticated user owns. Deletion is permanent.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = parse_task_id(&task_id)?;

    let task = store::tasks::fetch(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;
    store::tasks::assert_owner(&task, user.0.id)?;

    store::tasks::delete(&pool, id).await?;

    Ok(HttpResponse::Ok().json(json!({ "msg": "Task removed" })))
}

/// Task identifiers that do not parse as UUIDs are indistinguishable from
/// missing tasks to the caller.
fn parse_task_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Task not found".into()))
}
