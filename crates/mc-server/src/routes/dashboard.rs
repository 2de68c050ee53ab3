use axum::extract::State;
use axum::Json;
use mc_core::fallback::{Loaded, Origin};
use mc_core::feeds::{self, cron, social, trading};
use mc_core::overview;
use serde::Serialize;

use crate::error::AppError;
use crate::routes::blocking;
use crate::state::AppState;

/// Serialize a summary and add `"source": <origin>` alongside its fields.
fn with_source<T: Serialize>(summary: &T, origin: Origin) -> mc_core::Result<serde_json::Value> {
    let mut value = serde_json::to_value(summary)?;
    if let Some(obj) = value.as_object_mut() {
        obj.insert("source".to_string(), serde_json::to_value(origin)?);
    }
    Ok(value)
}

/// GET /api/overview: one-screen rollup across collections and feeds.
pub async fn get_overview(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let config = app.config();
    let result = blocking(move || {
        let today = chrono::Utc::now().date_naive();
        let overview = overview::build(&root, &config, today)?;
        Ok(serde_json::to_value(&overview)?)
    })
    .await?;
    Ok(Json(result))
}

/// GET /api/trading: trading bot summary.
pub async fn get_trading(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let path = app.config().feeds.trading_state;
    let result = blocking(move || {
        let Loaded { value, origin } =
            feeds::load_feed::<trading::TradingState>(&root, &path, feeds::TRADING)?;
        with_source(&trading::summarize(&value), origin)
    })
    .await?;
    Ok(Json(result))
}

/// GET /api/social: posting cadence and spend against budget.
pub async fn get_social(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let path = app.config().feeds.social_state;
    let result = blocking(move || {
        let Loaded { value, origin } =
            feeds::load_feed::<social::SocialState>(&root, &path, feeds::SOCIAL)?;
        let today = chrono::Utc::now().date_naive();
        with_source(&social::summarize(&value, today), origin)
    })
    .await?;
    Ok(Json(result))
}

/// GET /api/cron: scheduled job health.
pub async fn get_cron(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let root = app.root.clone();
    let path = app.config().feeds.cron_jobs;
    let result = blocking(move || {
        let Loaded { value, origin } =
            feeds::load_feed::<Vec<cron::CronJob>>(&root, &path, feeds::CRON)?;
        with_source(&cron::summarize(&value), origin)
    })
    .await?;
    Ok(Json(result))
}
