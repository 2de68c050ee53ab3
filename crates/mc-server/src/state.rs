use mc_core::config::Config;
use mc_core::paths;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::sync::broadcast;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    /// Carries the name of the watched file that changed.
    pub event_tx: broadcast::Sender<String>,
}

impl AppState {
    pub fn new(root: PathBuf) -> Self {
        let (tx, _) = broadcast::channel(64);
        let state = Self {
            root,
            event_tx: tx.clone(),
        };

        // Poll the config and data files and broadcast the name of each one
        // whose mtime moved. Only spawned inside a Tokio runtime (skipped in
        // sync unit tests).
        if tokio::runtime::Handle::try_current().is_ok() {
            let files = watched_files(&state.root);
            tokio::spawn(async move {
                let mut last = snapshot(&files).await;
                loop {
                    tokio::time::sleep(std::time::Duration::from_millis(800)).await;
                    let current = snapshot(&files).await;
                    for name in changed(&files, &last, &current) {
                        tracing::debug!(file = name, "watched file changed");
                        let _ = tx.send(name.to_string());
                    }
                    last = current;
                }
            });
        }

        state
    }

    /// Current config, or defaults when the dashboard is not initialized.
    /// A broken config file is logged and replaced with defaults so the
    /// read-only views keep working.
    pub fn config(&self) -> Config {
        match Config::load_or_default(&self.root) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(error = %e, "config unreadable, using defaults");
                Config::new("Mission Control")
            }
        }
    }
}

/// A file the watcher polls, tagged with the name sent to SSE clients.
#[derive(Debug, Clone)]
pub struct WatchedFile {
    pub name: &'static str,
    pub path: PathBuf,
}

pub fn watched_files(root: &Path) -> Vec<WatchedFile> {
    let mut files = vec![WatchedFile {
        name: "config",
        path: paths::config_path(root),
    }];
    for (name, file) in [
        ("tasks", paths::TASKS_FILE),
        ("content", paths::CONTENT_FILE),
        ("proposals", paths::PROPOSALS_FILE),
        ("actions", paths::ACTIONS_FILE),
    ] {
        files.push(WatchedFile {
            name,
            path: paths::data_file(root, file),
        });
    }
    files
}

/// Names of the files whose mtime differs between two snapshots.
fn changed(
    files: &[WatchedFile],
    last: &[Option<SystemTime>],
    current: &[Option<SystemTime>],
) -> Vec<&'static str> {
    files
        .iter()
        .zip(last.iter().zip(current))
        .filter(|(_, (before, after))| before != after)
        .map(|(f, _)| f.name)
        .collect()
}

async fn snapshot(files: &[WatchedFile]) -> Vec<Option<SystemTime>> {
    let mut out = Vec::with_capacity(files.len());
    for WatchedFile { path: f, .. } in files {
        let mtime = match tokio::fs::metadata(f).await {
            Ok(meta) => meta.modified().ok(),
            Err(_) => None,
        };
        out.push(mtime);
    }
    out
}
