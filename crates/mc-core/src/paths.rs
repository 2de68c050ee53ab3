use crate::error::{McError, Result};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const MC_DIR: &str = ".mission-control";
pub const DATA_DIR: &str = ".mission-control/data";
pub const CACHE_DIR: &str = ".mission-control/cache";

pub const CONFIG_FILE: &str = ".mission-control/config.yaml";

pub const TASKS_FILE: &str = "tasks.json";
pub const CONTENT_FILE: &str = "content.json";
pub const PROPOSALS_FILE: &str = "proposals.json";
pub const ACTIONS_FILE: &str = "actions.json";

pub const CAFFEINE_CACHE: &str = "caffeine.json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn mc_dir(root: &Path) -> PathBuf {
    root.join(MC_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn data_dir(root: &Path) -> PathBuf {
    root.join(DATA_DIR)
}

pub fn cache_dir(root: &Path) -> PathBuf {
    root.join(CACHE_DIR)
}

pub fn data_file(root: &Path, name: &str) -> PathBuf {
    data_dir(root).join(name)
}

/// Cache file for a named data source, e.g. `cache/trading.json`.
pub fn cache_file(root: &Path, name: &str) -> PathBuf {
    cache_dir(root).join(format!("{name}.json"))
}

pub fn caffeine_cache_path(root: &Path) -> PathBuf {
    cache_dir(root).join(CAFFEINE_CACHE)
}

/// Resolve a configured feed path: `~/` expands to the home directory,
/// relative paths are taken relative to `root`.
pub fn resolve_feed_path(root: &Path, raw: &Path) -> Result<PathBuf> {
    if let Ok(rest) = raw.strip_prefix("~") {
        let home = home::home_dir().ok_or(McError::HomeNotFound)?;
        return Ok(home.join(rest));
    }
    if raw.is_absolute() {
        Ok(raw.to_path_buf())
    } else {
        Ok(root.join(raw))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/mc");
        assert_eq!(
            config_path(root),
            PathBuf::from("/tmp/mc/.mission-control/config.yaml")
        );
        assert_eq!(
            data_file(root, TASKS_FILE),
            PathBuf::from("/tmp/mc/.mission-control/data/tasks.json")
        );
        assert_eq!(
            cache_file(root, "trading"),
            PathBuf::from("/tmp/mc/.mission-control/cache/trading.json")
        );
    }

    #[test]
    fn relative_feed_path_joins_root() {
        let root = Path::new("/tmp/mc");
        let p = resolve_feed_path(root, Path::new("bots/state.json")).unwrap();
        assert_eq!(p, PathBuf::from("/tmp/mc/bots/state.json"));
    }

    #[test]
    fn absolute_feed_path_is_kept() {
        let root = Path::new("/tmp/mc");
        let p = resolve_feed_path(root, Path::new("/var/bot/state.json")).unwrap();
        assert_eq!(p, PathBuf::from("/var/bot/state.json"));
    }

    #[test]
    fn tilde_feed_path_expands_home() {
        let root = Path::new("/tmp/mc");
        let p = resolve_feed_path(root, Path::new("~/bots/state.json")).unwrap();
        assert!(p.ends_with("bots/state.json"));
        assert!(!p.starts_with("~"));
    }
}
