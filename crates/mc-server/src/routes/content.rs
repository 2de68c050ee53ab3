use axum::extract::{Path, State};
use axum::Json;
use mc_core::content::{self, ContentItem, ContentPatch, NewContent};

use crate::error::AppError;
use crate::routes::blocking;
use crate::state::AppState;

/// GET /api/content
pub async fn list_content(State(app): State<AppState>) -> Result<Json<Vec<ContentItem>>, AppError> {
    let root = app.root.clone();
    Ok(Json(blocking(move || content::list(&root)).await?))
}

/// POST /api/content: add an idea to the pipeline.
pub async fn create_content(
    State(app): State<AppState>,
    Json(body): Json<NewContent>,
) -> Result<Json<ContentItem>, AppError> {
    let root = app.root.clone();
    Ok(Json(blocking(move || content::add(&root, body)).await?))
}

/// PATCH /api/content/:id
pub async fn update_content(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ContentPatch>,
) -> Result<Json<ContentItem>, AppError> {
    let root = app.root.clone();
    Ok(Json(
        blocking(move || content::update(&root, &id, patch)).await?,
    ))
}

/// DELETE /api/content/:id
pub async fn delete_content(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let id_clone = id.clone();
    let deleted = blocking(move || content::delete(&root, &id_clone)).await?;
    if !deleted {
        return Err(AppError::not_found(format!("content not found: {id}")));
    }
    Ok(Json(serde_json::json!({ "deleted": true, "id": id })))
}
