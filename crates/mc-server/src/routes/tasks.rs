use axum::extract::{Path, State};
use axum::Json;
use mc_core::task::{self, Task, TaskPatch};

use crate::error::AppError;
use crate::routes::blocking;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct CreateTaskBody {
    pub title: String,
    #[serde(default)]
    pub project: Option<String>,
}

/// GET /api/tasks
pub async fn list_tasks(State(app): State<AppState>) -> Result<Json<Vec<Task>>, AppError> {
    let root = app.root.clone();
    Ok(Json(blocking(move || task::list(&root)).await?))
}

/// POST /api/tasks: create a task in `todo`.
pub async fn create_task(
    State(app): State<AppState>,
    Json(body): Json<CreateTaskBody>,
) -> Result<Json<Task>, AppError> {
    let root = app.root.clone();
    let created = blocking(move || task::add(&root, &body.title, body.project)).await?;
    Ok(Json(created))
}

/// PATCH /api/tasks/:id: partial update, including status moves.
pub async fn update_task(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<Task>, AppError> {
    let root = app.root.clone();
    let updated = blocking(move || task::update(&root, &id, patch)).await?;
    Ok(Json(updated))
}

/// DELETE /api/tasks/:id
pub async fn delete_task(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let id_clone = id.clone();
    let deleted = blocking(move || task::delete(&root, &id_clone)).await?;
    if !deleted {
        return Err(AppError::not_found(format!("task not found: {id}")));
    }
    Ok(Json(serde_json::json!({ "deleted": true, "id": id })))
}
