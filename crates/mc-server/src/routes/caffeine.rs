use axum::extract::{Query, State};
use axum::Json;
use mc_core::caffeine::{self, CaffeineReport, ScheduleConfig, ScheduleParams};
use mc_core::{fallback, paths, McError};
use std::path::Path;
use std::time::Duration;

use crate::error::AppError;
use crate::routes::blocking;
use crate::state::AppState;

/// GET /api/caffeine: compute today's curve and cutoff for the query params.
///
/// The live computation runs on the blocking pool under the configured
/// timeout. If it fails or times out the last cached report is returned with
/// `cached: true`; with no cache the response is a 503 `{error}`.
pub async fn get_caffeine(
    State(app): State<AppState>,
    Query(params): Query<ScheduleParams>,
) -> Result<Json<CaffeineReport>, AppError> {
    let cfg = app.config().caffeine;
    let schedule = ScheduleConfig::from_params(&params);
    let timeout_ms = cfg.compute_timeout_ms;
    let now = chrono::Local::now().naive_local();

    let task = tokio::task::spawn_blocking(move || caffeine::compute(&schedule, &cfg, now));
    let live = match tokio::time::timeout(Duration::from_millis(timeout_ms), task).await {
        Ok(Ok(report)) => Ok(report),
        Ok(Err(e)) => Err(McError::ComputeFailed(format!("compute task failed: {e}"))),
        Err(_) => Err(McError::ComputeFailed(format!(
            "timed out after {timeout_ms}ms"
        ))),
    };

    let cache_path = paths::caffeine_cache_path(&app.root);
    let report = blocking(move || with_cache_fallback(live, &cache_path)).await?;
    Ok(Json(report))
}

/// Resolve a live result against the cache, tagging cached reports.
pub fn with_cache_fallback(
    live: mc_core::Result<CaffeineReport>,
    cache_path: &Path,
) -> mc_core::Result<CaffeineReport> {
    let loaded = fallback::load_with_fallback(move || live, cache_path, None)?;
    let mut report = loaded.value;
    report.cached = loaded.origin.is_cached();
    Ok(report)
}
