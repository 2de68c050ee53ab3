//! Dose schedule generation and request normalization.
//!
//! Caller input is never rejected: malformed times fall back to defaults,
//! dose counts are clamped to `MIN_DOSES..=MAX_DOSES`, unknown sources
//! become coffee.

use super::source::CaffeineSource;
use chrono::{Duration, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const MIN_DOSES: u32 = 1;
pub const MAX_DOSES: u32 = 8;
pub const DEFAULT_DOSES: u32 = 3;

pub fn default_wake() -> NaiveTime {
    NaiveTime::from_hms_opt(7, 0, 0).unwrap_or(NaiveTime::MIN)
}

pub fn default_sleep() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 0, 0).unwrap_or(NaiveTime::MIN)
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A single intake at a specific instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoseEvent {
    pub timestamp: NaiveDateTime,
    pub amount_mg: f64,
}

/// Raw, unvalidated request parameters as they arrive from a query string
/// or the command line.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleParams {
    pub wake: Option<String>,
    pub sleep: Option<String>,
    pub coffees: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub wake_time: NaiveTime,
    pub sleep_time: NaiveTime,
    pub dose_count: u32,
    pub source: CaffeineSource,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            wake_time: default_wake(),
            sleep_time: default_sleep(),
            dose_count: DEFAULT_DOSES,
            source: CaffeineSource::Coffee,
        }
    }
}

impl ScheduleConfig {
    pub fn from_params(params: &ScheduleParams) -> Self {
        let source = match params.source.as_deref().map(str::trim) {
            None | Some("") => CaffeineSource::Coffee,
            Some(raw) => CaffeineSource::from_key(raw).unwrap_or_else(|| {
                tracing::debug!(source = raw, "unknown caffeine source, using coffee");
                CaffeineSource::Coffee
            }),
        };
        Self {
            wake_time: parse_time_of_day(params.wake.as_deref(), default_wake()),
            sleep_time: parse_time_of_day(params.sleep.as_deref(), default_sleep()),
            dose_count: parse_dose_count(params.coffees.as_deref()),
            source,
        }
    }
}

/// The wake-to-wake window a request is evaluated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub wake: NaiveDateTime,
    pub sleep: NaiveDateTime,
    pub next_wake: NaiveDateTime,
}

impl DayWindow {
    /// Anchor the window so that `now` falls inside `[wake, next_wake)`.
    /// A sleep time at or before the wake time is taken to be the next day.
    pub fn anchored(config: &ScheduleConfig, now: NaiveDateTime) -> Self {
        let mut wake = now.date().and_time(config.wake_time);
        if now < wake {
            wake -= Duration::days(1);
        }
        let mut sleep = wake.date().and_time(config.sleep_time);
        if sleep <= wake {
            sleep += Duration::days(1);
        }
        Self {
            wake,
            sleep,
            next_wake: wake + Duration::days(1),
        }
    }

    pub fn waking_minutes(&self) -> i64 {
        (self.sleep - self.wake).num_minutes()
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// First dose at wake; the rest evenly spaced so the last dose lands halfway
/// through the waking window.
pub fn generate(config: &ScheduleConfig, window: &DayWindow, dose_mg: f64) -> Vec<DoseEvent> {
    let count = config.dose_count.clamp(MIN_DOSES, MAX_DOSES);
    let half_secs = window.waking_minutes() as f64 * 60.0 / 2.0;
    let step_secs = if count > 1 {
        half_secs / f64::from(count - 1)
    } else {
        0.0
    };

    (0..count)
        .map(|i| DoseEvent {
            timestamp: window.wake + Duration::seconds((step_secs * f64::from(i)).round() as i64),
            amount_mg: dose_mg,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Input normalization
// ---------------------------------------------------------------------------

pub fn clamp_dose_count(n: i64) -> u32 {
    n.clamp(i64::from(MIN_DOSES), i64::from(MAX_DOSES)) as u32
}

/// Parse a dose count leniently. Non-numeric input yields the default;
/// numeric input is clamped.
pub fn parse_dose_count(raw: Option<&str>) -> u32 {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return DEFAULT_DOSES;
    };
    if let Ok(n) = raw.parse::<i64>() {
        return clamp_dose_count(n);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => clamp_dose_count(f.round() as i64),
        _ => {
            tracing::debug!(coffees = raw, "unparseable dose count, using default");
            DEFAULT_DOSES
        }
    }
}

static TIME_RE: OnceLock<Regex> = OnceLock::new();

fn time_re() -> &'static Regex {
    TIME_RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2})(?::?(\d{2}))?\s*([ap])?\.?\s*(?:m\.?)?$").unwrap()
    })
}

/// Parse `HH:MM`, `H`, `H:MM`, `HHMM` and 12-hour forms like `7:30pm`.
/// Anything unparseable or out of range returns `default`.
pub fn parse_time_of_day(raw: Option<&str>, default: NaiveTime) -> NaiveTime {
    let Some(raw) = raw.map(|s| s.trim().to_ascii_lowercase()) else {
        return default;
    };
    let Some(caps) = time_re().captures(&raw) else {
        tracing::debug!(time = %raw, "unparseable time of day, using default");
        return default;
    };

    let hour: u32 = caps[1].parse().unwrap_or(u32::MAX);
    let minute: u32 = caps.get(2).map_or(Some(0), |m| m.as_str().parse().ok()).unwrap_or(u32::MAX);
    let hour = match caps.get(3).map(|m| m.as_str()) {
        Some(meridiem) => {
            if !(1..=12).contains(&hour) {
                return default;
            }
            match (meridiem, hour) {
                ("a", 12) => 0,
                ("a", h) => h,
                (_, 12) => 12,
                (_, h) => h + 12,
            }
        }
        None => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(default)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
