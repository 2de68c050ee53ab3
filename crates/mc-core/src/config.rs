use crate::error::{McError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// DashboardConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_dashboard_name")]
    pub name: String,
}

fn default_dashboard_name() -> String {
    "Mission Control".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            name: default_dashboard_name(),
        }
    }
}

// ---------------------------------------------------------------------------
// CaffeineConfig
// ---------------------------------------------------------------------------

/// Model parameters for the caffeine calculator.
///
/// The half-life and threshold defaults are product values; they are exposed
/// here so they can be tuned per person without touching the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaffeineConfig {
    #[serde(default = "default_half_life")]
    pub half_life_hours: f64,
    #[serde(default = "default_threshold")]
    pub threshold_mg: f64,
    #[serde(default = "default_sample_interval")]
    pub sample_interval_minutes: u32,
    #[serde(default = "default_approaching")]
    pub approaching_minutes: u32,
    #[serde(default = "default_compute_timeout")]
    pub compute_timeout_ms: u64,
    /// Per-source mg overrides keyed by source key (`coffee`, `cold_brew`, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub source_mg: BTreeMap<String, f64>,
}

fn default_half_life() -> f64 {
    5.7
}

fn default_threshold() -> f64 {
    25.0
}

fn default_sample_interval() -> u32 {
    15
}

fn default_approaching() -> u32 {
    120
}

fn default_compute_timeout() -> u64 {
    2000
}

impl Default for CaffeineConfig {
    fn default() -> Self {
        Self {
            half_life_hours: default_half_life(),
            threshold_mg: default_threshold(),
            sample_interval_minutes: default_sample_interval(),
            approaching_minutes: default_approaching(),
            compute_timeout_ms: default_compute_timeout(),
            source_mg: BTreeMap::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// FeedsConfig
// ---------------------------------------------------------------------------

/// Locations of the JSON state files written by the external bots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedsConfig {
    #[serde(default = "default_trading_state")]
    pub trading_state: PathBuf,
    #[serde(default = "default_social_state")]
    pub social_state: PathBuf,
    #[serde(default = "default_cron_jobs")]
    pub cron_jobs: PathBuf,
}

fn default_trading_state() -> PathBuf {
    PathBuf::from("feeds/trading-state.json")
}

fn default_social_state() -> PathBuf {
    PathBuf::from("feeds/social-state.json")
}

fn default_cron_jobs() -> PathBuf {
    PathBuf::from("feeds/cron-jobs.json")
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            trading_state: default_trading_state(),
            social_state: default_social_state(),
            cron_jobs: default_cron_jobs(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub caffeine: CaffeineConfig,
    #[serde(default)]
    pub feeds: FeedsConfig,
}

fn default_version() -> u32 {
    1
}

impl Config {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: 1,
            dashboard: DashboardConfig { name: name.into() },
            caffeine: CaffeineConfig::default(),
            feeds: FeedsConfig::default(),
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(McError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Load the config, or fall back to defaults when the dashboard has not
    /// been initialized. A present-but-broken file is still an error.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        match Self::load(root) {
            Ok(cfg) => Ok(cfg),
            Err(McError::NotInitialized) => Ok(Self::new(default_dashboard_name())),
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let c = &self.caffeine;

        if !(c.half_life_hours.is_finite() && c.half_life_hours > 0.0) {
            warnings.push(error(format!(
                "caffeine.half_life_hours must be positive, got {}",
                c.half_life_hours
            )));
        }
        if !(c.threshold_mg.is_finite() && c.threshold_mg > 0.0) {
            warnings.push(error(format!(
                "caffeine.threshold_mg must be positive, got {}",
                c.threshold_mg
            )));
        }
        if c.sample_interval_minutes == 0 {
            warnings.push(error(
                "caffeine.sample_interval_minutes must be at least 1".to_string(),
            ));
        } else if !(5..=60).contains(&c.sample_interval_minutes) {
            warnings.push(warning(format!(
                "caffeine.sample_interval_minutes {} is outside 5..=60 and will be clamped",
                c.sample_interval_minutes
            )));
        }
        if c.compute_timeout_ms == 0 {
            warnings.push(error(
                "caffeine.compute_timeout_ms must be at least 1".to_string(),
            ));
        }

        for (key, mg) in &c.source_mg {
            if crate::caffeine::CaffeineSource::from_key(key).is_none() {
                warnings.push(warning(format!(
                    "unknown caffeine source '{key}' in caffeine.source_mg"
                )));
            }
            if !(mg.is_finite() && *mg > 0.0) {
                warnings.push(error(format!(
                    "caffeine.source_mg.{key} must be positive, got {mg}"
                )));
            }
        }

        if self.dashboard.name.trim().is_empty() {
            warnings.push(warning("dashboard.name is empty".to_string()));
        }

        warnings
    }
}

fn error(message: String) -> ConfigWarning {
    ConfigWarning {
        level: WarnLevel::Error,
        message,
    }
}

fn warning(message: String) -> ConfigWarning {
    ConfigWarning {
        level: WarnLevel::Warning,
        message,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
