//! Live → cache → default loading used by every dashboard data endpoint.

use crate::error::{McError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Live,
    Cached,
    Default,
}

impl Origin {
    pub fn is_cached(self) -> bool {
        self == Origin::Cached
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub value: T,
    pub origin: Origin,
}

/// Try `primary`; if it fails, read `cache_path`; if that is missing or
/// malformed, use `default`. Only when all three are unavailable is the
/// primary error returned.
pub fn load_with_fallback<T, F>(primary: F, cache_path: &Path, default: Option<T>) -> Result<Loaded<T>>
where
    T: DeserializeOwned,
    F: FnOnce() -> Result<T>,
{
    let primary_err = match primary() {
        Ok(value) => {
            return Ok(Loaded {
                value,
                origin: Origin::Live,
            })
        }
        Err(e) => e,
    };
    tracing::warn!(error = %primary_err, cache = %cache_path.display(), "live load failed, trying cache");

    match read_json::<T>(cache_path) {
        Ok(value) => {
            return Ok(Loaded {
                value,
                origin: Origin::Cached,
            })
        }
        Err(e) => tracing::debug!(error = %e, "cache unusable"),
    }

    match default {
        Some(value) => Ok(Loaded {
            value,
            origin: Origin::Default,
        }),
        None => Err(match primary_err {
            McError::Io(_) | McError::Json(_) => {
                McError::CacheUnavailable(cache_path.display().to_string())
            }
            other => other,
        }),
    }
}

/// Best-effort cache refresh after a successful live load.
pub fn refresh_cache<T: Serialize>(cache_path: &Path, value: &T) {
    if let Err(e) = crate::io::write_json(cache_path, value) {
        tracing::warn!(error = %e, cache = %cache_path.display(), "failed to refresh cache");
    }
}

/// Read and parse a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = std::fs::read(path)?;
    Ok(serde_json::from_slice(&data)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
