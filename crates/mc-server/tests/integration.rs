use axum::http::StatusCode;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn init_dashboard(dir: &TempDir) {
    let config = mc_core::config::Config::new("test-dashboard");
    mc_core::io::ensure_dir(&mc_core::paths::data_dir(dir.path())).unwrap();
    mc_core::io::ensure_dir(&mc_core::paths::cache_dir(dir.path())).unwrap();
    config.save(dir.path()).unwrap();
}

async fn send(
    app: axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = axum::http::Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(axum::body::Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(axum::body::Body::empty()).unwrap(),
    };
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "GET", uri, None).await
}

async fn post_json(
    app: axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "POST", uri, Some(body)).await
}

async fn patch_json(
    app: axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "PATCH", uri, Some(body)).await
}

fn router(dir: &TempDir) -> axum::Router {
    mc_server::build_router(dir.path().to_path_buf())
}

// ---------------------------------------------------------------------------
// Caffeine
// ---------------------------------------------------------------------------

#[tokio::test]
async fn caffeine_report_has_documented_shape() {
    let dir = TempDir::new().unwrap();
    let (status, json) = get(
        router(&dir),
        "/api/caffeine?wake=6:30&sleep=22:30&coffees=2&source=espresso",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["wake_time"], "06:30");
    assert_eq!(json["sleep_time"], "22:30");
    assert_eq!(json["num_coffees"], 2);
    assert_eq!(json["coffee_mg"], 63.0);
    assert_eq!(json["source"], "espresso");
    assert_eq!(json["half_life_hours"], 5.7);
    assert_eq!(json["threshold_mg"], 25.0);
    assert!(json.get("cached").is_none());

    let curve = json["curve"].as_array().unwrap();
    // 24h at 15-minute spacing, both ends included.
    assert_eq!(curve.len(), 97);
    assert!(curve[0][0].is_string());
    assert!(curve[0][1].is_number());
    assert_eq!(json["intake_times"].as_array().unwrap().len(), 2);
    assert!(["SAFE", "APPROACHING", "CUT_OFF"].contains(&json["status"].as_str().unwrap()));
}

#[tokio::test]
async fn caffeine_normalizes_bad_params() {
    let dir = TempDir::new().unwrap();
    let (status, json) = get(
        router(&dir),
        "/api/caffeine?wake=banana&sleep=25:99&coffees=20&source=mate",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["wake_time"], "07:00");
    assert_eq!(json["sleep_time"], "23:00");
    assert_eq!(json["num_coffees"], 8);
    assert_eq!(json["source"], "coffee");
}

#[tokio::test]
async fn caffeine_honours_configured_model() {
    let dir = TempDir::new().unwrap();
    let mut config = mc_core::config::Config::new("tuned");
    config.caffeine.half_life_hours = 4.0;
    config.caffeine.threshold_mg = 40.0;
    config.save(dir.path()).unwrap();

    let (_, json) = get(router(&dir), "/api/caffeine").await;
    assert_eq!(json["half_life_hours"], 4.0);
    assert_eq!(json["threshold_mg"], 40.0);
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn task_lifecycle() {
    let dir = TempDir::new().unwrap();
    init_dashboard(&dir);

    let (status, json) = post_json(
        router(&dir),
        "/api/tasks",
        serde_json::json!({ "title": "Ship weekly report", "project": "ops" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], "T1");
    assert_eq!(json["status"], "todo");

    let (status, json) = patch_json(
        router(&dir),
        "/api/tasks/T1",
        serde_json::json!({ "status": "in_progress" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "in_progress");

    let (_, json) = get(router(&dir), "/api/overview").await;
    assert_eq!(json["open_tasks"], 1);
    assert_eq!(json["dashboard"], "test-dashboard");

    let (status, _) = send(router(&dir), "DELETE", "/api/tasks/T1", None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, json) = get(router(&dir), "/api/tasks").await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn task_errors_map_to_status_codes() {
    let dir = TempDir::new().unwrap();
    init_dashboard(&dir);

    let (status, json) =
        post_json(router(&dir), "/api/tasks", serde_json::json!({ "title": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("title"));

    let (status, json) = patch_json(
        router(&dir),
        "/api/tasks/T42",
        serde_json::json!({ "title": "x" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].is_string());
}

// ---------------------------------------------------------------------------
// Proposals
// ---------------------------------------------------------------------------

#[tokio::test]
async fn proposal_can_only_be_decided_once() {
    let dir = TempDir::new().unwrap();
    init_dashboard(&dir);

    let (_, json) = post_json(
        router(&dir),
        "/api/proposals",
        serde_json::json!({ "title": "Pause weather trades", "source": "trading-bot" }),
    )
    .await;
    assert_eq!(json["status"], "pending");

    let (status, json) = post_json(
        router(&dir),
        "/api/proposals/P1/approve",
        serde_json::json!({ "note": "agreed" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "approved");

    let (status, _) = send(router(&dir), "POST", "/api/proposals/P1/reject", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, json) = get(router(&dir), "/api/overview").await;
    assert_eq!(json["pending_proposals"], 0);
}

// ---------------------------------------------------------------------------
// Content and action log
// ---------------------------------------------------------------------------

#[tokio::test]
async fn content_moves_through_pipeline() {
    let dir = TempDir::new().unwrap();
    init_dashboard(&dir);

    post_json(
        router(&dir),
        "/api/content",
        serde_json::json!({ "title": "Caffeine cutoff explainer", "platform": "X" }),
    )
    .await;
    let (status, json) = patch_json(
        router(&dir),
        "/api/content/C1",
        serde_json::json!({ "status": "scheduled", "scheduled_for": "2026-10-15T09:00:00Z" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "scheduled");
    assert_eq!(json["platform"], "x");

    let (_, json) = get(router(&dir), "/api/overview").await;
    assert_eq!(json["content_pipeline"]["scheduled"], 1);
}

#[tokio::test]
async fn action_log_lists_newest_first() {
    let dir = TempDir::new().unwrap();
    init_dashboard(&dir);

    for action in ["backup started", "backup finished"] {
        let (status, _) = post_json(
            router(&dir),
            "/api/actions",
            serde_json::json!({ "actor": "cron", "action": action }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    let (_, json) = get(router(&dir), "/api/actions?limit=1").await;
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action"], "backup finished");
}

// ---------------------------------------------------------------------------
// Feeds, config, fallback routing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn social_feed_reads_configured_path() {
    let dir = TempDir::new().unwrap();
    let mut config = mc_core::config::Config::new("feeds");
    config.feeds.social_state = "bots/social.json".into();
    config.save(dir.path()).unwrap();

    std::fs::create_dir_all(dir.path().join("bots")).unwrap();
    std::fs::write(
        dir.path().join("bots/social.json"),
        r#"{"daily_post_limit": 5, "monthly_budget_usd": 100, "monthly_spend_usd": 25, "posts": []}"#,
    )
    .unwrap();

    let (status, json) = get(router(&dir), "/api/social").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "live");
    assert_eq!(json["remaining_today"], 5);
    assert_eq!(json["budget_used_pct"], 25.0);
}

#[tokio::test]
async fn config_endpoint_reports_initialized() {
    let dir = TempDir::new().unwrap();
    init_dashboard(&dir);
    let (status, json) = get(router(&dir), "/api/config").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["initialized"], true);
    assert_eq!(json["config"]["dashboard"]["name"], "test-dashboard");
}

#[tokio::test]
async fn unknown_api_route_is_json_404() {
    let dir = TempDir::new().unwrap();
    let (status, json) = get(router(&dir), "/api/nothing-here").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn non_api_paths_serve_dashboard_shell() {
    let dir = TempDir::new().unwrap();
    let req = axum::http::Request::builder()
        .uri("/")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = router(&dir).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&body).contains("Mission Control"));
}

#[tokio::test]
async fn events_stream_names_the_changed_file() {
    let dir = TempDir::new().unwrap();
    init_dashboard(&dir);
    let req = axum::http::Request::builder()
        .uri("/api/events")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = router(&dir).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/event-stream"));

    // Let the watcher take its first snapshot before touching the file.
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    std::fs::write(
        mc_core::paths::data_file(dir.path(), mc_core::paths::TASKS_FILE),
        b"[]",
    )
    .unwrap();

    let mut body = response.into_body();
    let frame = tokio::time::timeout(std::time::Duration::from_secs(5), body.frame())
        .await
        .expect("no event within timeout")
        .unwrap()
        .unwrap();
    let text = String::from_utf8_lossy(frame.data_ref().unwrap()).to_string();
    assert!(text.contains("event: update"), "{text}");
    assert!(text.contains("data: tasks"), "{text}");
}
