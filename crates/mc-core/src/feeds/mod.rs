//! Read-only views over the JSON state files the external bots write.
//!
//! Every feed goes through `fallback::load_with_fallback` with its type's
//! `Default` as the last resort, so a missing bot never takes the dashboard
//! down. A successful live read refreshes `cache/<name>.json`.

pub mod cron;
pub mod social;
pub mod trading;

use crate::error::Result;
use crate::fallback::{self, Loaded, Origin};
use crate::paths;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

pub const TRADING: &str = "trading";
pub const SOCIAL: &str = "social";
pub const CRON: &str = "cron";

pub fn load_feed<T>(root: &Path, feed_path: &Path, name: &str) -> Result<Loaded<T>>
where
    T: DeserializeOwned + Serialize + Default,
{
    let path = paths::resolve_feed_path(root, feed_path)?;
    let cache = paths::cache_file(root, name);
    let loaded = fallback::load_with_fallback(
        || fallback::read_json::<T>(&path),
        &cache,
        Some(T::default()),
    )?;
    if loaded.origin == Origin::Live {
        fallback::refresh_cache(&cache, &loaded.value);
    }
    Ok(loaded)
}

/// Percentage rounded to one decimal; `None` when the denominator is zero.
pub fn percent(part: f64, whole: f64) -> Option<f64> {
    if whole == 0.0 || !whole.is_finite() {
        return None;
    }
    Some((part / whole * 1000.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn percent_rounds_and_guards_zero() {
        assert_eq!(percent(1.0, 3.0), Some(33.3));
        assert_eq!(percent(2.0, 2.0), Some(100.0));
        assert_eq!(percent(1.0, 0.0), None);
    }

    #[test]
    fn live_feed_refreshes_cache_then_cache_serves_when_feed_breaks() {
        let dir = TempDir::new().unwrap();
        let feed = dir.path().join("feeds/jobs.json");
        crate::io::atomic_write(&feed, br#"[{"name":"backup","last_status":"ok"}]"#).unwrap();

        let live: Loaded<Vec<cron::CronJob>> =
            load_feed(dir.path(), Path::new("feeds/jobs.json"), CRON).unwrap();
        assert_eq!(live.origin, Origin::Live);
        assert!(paths::cache_file(dir.path(), CRON).exists());

        std::fs::write(&feed, b"garbage").unwrap();
        let cached: Loaded<Vec<cron::CronJob>> =
            load_feed(dir.path(), Path::new("feeds/jobs.json"), CRON).unwrap();
        assert_eq!(cached.origin, Origin::Cached);
        assert_eq!(cached.value.len(), 1);
    }

    #[test]
    fn missing_feed_without_cache_is_default() {
        let dir = TempDir::new().unwrap();
        let loaded: Loaded<trading::TradingState> =
            load_feed(dir.path(), Path::new("nope.json"), TRADING).unwrap();
        assert_eq!(loaded.origin, Origin::Default);
        assert!(loaded.value.trades.is_empty());
    }
}
