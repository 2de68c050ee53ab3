pub mod actions;
pub mod caffeine;
pub mod config;
pub mod content;
pub mod dashboard;
pub mod events;
pub mod proposals;
pub mod tasks;

use crate::error::AppError;

/// Run a synchronous core call on the blocking pool.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> mc_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
    Ok(result)
}
