use axum::extract::State;
use axum::Json;
use mc_core::config::Config;
use mc_core::paths;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/config: read-only view of `.mission-control/config.yaml`.
///
/// An uninitialized dashboard reports the defaults it is running with.
/// There is no write endpoint; the YAML file is edited directly.
pub async fn get_config(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let result = crate::routes::blocking(move || {
        let initialized = paths::config_path(&root).exists();
        let config = Config::load_or_default(&root)?;
        Ok(serde_json::json!({
            "initialized": initialized,
            "config": serde_json::to_value(&config)?,
            "warnings": serde_json::to_value(config.validate())?,
        }))
    })
    .await?;
    Ok(Json(result))
}
