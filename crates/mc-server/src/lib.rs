pub mod embed;
pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, patch, post};
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(root: PathBuf) -> Router {
    let app_state = state::AppState::new(root);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Events (SSE)
        .route("/api/events", get(routes::events::sse_events))
        // Caffeine
        .route("/api/caffeine", get(routes::caffeine::get_caffeine))
        // Dashboard feeds
        .route("/api/overview", get(routes::dashboard::get_overview))
        .route("/api/trading", get(routes::dashboard::get_trading))
        .route("/api/social", get(routes::dashboard::get_social))
        .route("/api/cron", get(routes::dashboard::get_cron))
        // Tasks
        .route(
            "/api/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/api/tasks/{id}",
            patch(routes::tasks::update_task).delete(routes::tasks::delete_task),
        )
        // Content
        .route(
            "/api/content",
            get(routes::content::list_content).post(routes::content::create_content),
        )
        .route(
            "/api/content/{id}",
            patch(routes::content::update_content).delete(routes::content::delete_content),
        )
        // Proposals
        .route(
            "/api/proposals",
            get(routes::proposals::list_proposals).post(routes::proposals::create_proposal),
        )
        .route(
            "/api/proposals/{id}/approve",
            post(routes::proposals::approve_proposal),
        )
        .route(
            "/api/proposals/{id}/reject",
            post(routes::proposals::reject_proposal),
        )
        // Action log
        .route(
            "/api/actions",
            get(routes::actions::list_actions).post(routes::actions::append_action),
        )
        // Config
        .route("/api/config", get(routes::config::get_config))
        .fallback(embed::static_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Start the dashboard server on `127.0.0.1:{port}`.
pub async fn serve(root: PathBuf, port: u16, open_browser: bool) -> anyhow::Result<()> {
    let addr = format!("127.0.0.1:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(root, listener, open_browser).await
}

/// Start the dashboard server on a pre-bound listener.
///
/// The caller can bind port 0 and read the chosen port before starting.
pub async fn serve_on(
    root: PathBuf,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(root);

    tracing::info!("Mission Control listening on http://localhost:{actual_port}");

    if open_browser {
        let url = format!("http://localhost:{actual_port}");
        if let Err(e) = open::that(&url) {
            tracing::warn!(error = %e, "could not open browser");
        }
    }

    axum::serve(listener, app).await?;
    Ok(())
}
