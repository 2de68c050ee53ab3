use axum::extract::{Query, State};
use axum::Json;
use mc_core::action_log::{self, ActionLogEntry};

use crate::error::AppError;
use crate::routes::blocking;
use crate::state::AppState;

pub const DEFAULT_LIMIT: usize = 50;
pub const MAX_LIMIT: usize = 500;

#[derive(Debug, Default, serde::Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(serde::Deserialize)]
pub struct AppendBody {
    pub actor: String,
    pub action: String,
    #[serde(default)]
    pub detail: Option<String>,
}

/// GET /api/actions?limit=N: newest first.
pub async fn list_actions(
    State(app): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<ActionLogEntry>>, AppError> {
    let root = app.root.clone();
    let limit = q.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    Ok(Json(
        blocking(move || action_log::recent(&root, limit)).await?,
    ))
}

/// POST /api/actions: record something an agent or the operator did.
pub async fn append_action(
    State(app): State<AppState>,
    Json(body): Json<AppendBody>,
) -> Result<Json<ActionLogEntry>, AppError> {
    let root = app.root.clone();
    let entry =
        blocking(move || action_log::append(&root, &body.actor, &body.action, body.detail))
            .await?;
    Ok(Json(entry))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn limit_applies_newest_first() {
        let dir = tempfile::TempDir::new().unwrap();
        let app = AppState::new(dir.path().to_path_buf());
        for action in ["one", "two", "three"] {
            append_action(
                State(app.clone()),
                Json(AppendBody {
                    actor: "cron".into(),
                    action: action.into(),
                    detail: None,
                }),
            )
            .await
            .unwrap();
        }
        let Json(entries) = list_actions(State(app), Query(ListQuery { limit: Some(2) }))
            .await
            .unwrap();
        let actions: Vec<_> = entries.iter().map(|e| e.action.as_str()).collect();
        assert_eq!(actions, vec!["three", "two"]);
    }
}
