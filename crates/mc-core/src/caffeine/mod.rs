//! Caffeine calculator: dose schedule → decay model → curve + safety solver.
//!
//! Everything here is pure. `compute` is the one entry point the server and
//! CLI call; it produces the flat `CaffeineReport` the dashboard renders.

pub mod model;
pub mod schedule;
pub mod solver;
pub mod source;

pub use model::{concentration_at, ConcentrationSample, DecayModel};
pub use schedule::{DayWindow, DoseEvent, ScheduleConfig, ScheduleParams};
pub use solver::{SafetyResult, SafetyStatus};
pub use source::CaffeineSource;

use crate::config::CaffeineConfig;
use crate::error::Result;
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaffeineReport {
    pub last_coffee_time: String,
    pub sleep_time: String,
    pub wake_time: String,
    pub num_coffees: u32,
    pub coffee_mg: f64,
    pub source: CaffeineSource,
    pub current_mg: f64,
    pub safe_sleep_time: String,
    pub status: SafetyStatus,
    pub cutoff_str: String,
    pub half_life_hours: f64,
    pub threshold_mg: f64,
    pub curve: Vec<ConcentrationSample>,
    pub intake_times: Vec<NaiveDateTime>,
    pub generated_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cached: bool,
}

/// Run the full pipeline for one request at instant `now`.
pub fn compute(schedule: &ScheduleConfig, cfg: &CaffeineConfig, now: NaiveDateTime) -> CaffeineReport {
    let model = DecayModel::from_config(cfg);
    let dose_mg = schedule.source.mg_with(&cfg.source_mg);
    let window = DayWindow::anchored(schedule, now);
    let doses = schedule::generate(schedule, &window, dose_mg);

    let curve = model::sample_curve(
        &model,
        &doses,
        window.wake,
        window.next_wake,
        cfg.sample_interval_minutes,
    );
    let approaching = Duration::minutes(i64::from(cfg.approaching_minutes));
    let safety = solver::solve(&model, &doses, now, window.sleep, dose_mg, approaching);

    CaffeineReport {
        last_coffee_time: safety
            .cutoff_time
            .map(solver::clock)
            .unwrap_or_else(|| solver::NO_CUTOFF.to_string()),
        sleep_time: schedule.sleep_time.format("%H:%M").to_string(),
        wake_time: schedule.wake_time.format("%H:%M").to_string(),
        num_coffees: doses.len() as u32,
        coffee_mg: dose_mg,
        source: schedule.source,
        current_mg: safety.current_mg,
        safe_sleep_time: solver::clock(safety.safe_sleep_time),
        status: safety.status,
        cutoff_str: solver::cutoff_text(&safety, now, schedule.source, model.threshold_mg),
        half_life_hours: model.half_life_hours,
        threshold_mg: model.threshold_mg,
        curve,
        intake_times: doses.iter().map(|d| d.timestamp).collect(),
        generated_at: now,
        cached: false,
    }
}

/// Read a previously written report. Missing or malformed files are errors
/// the caller is expected to absorb.
pub fn read_cached(path: &Path) -> Result<CaffeineReport> {
    crate::fallback::read_json(path)
}

pub fn write_cache(path: &Path, report: &CaffeineReport) -> Result<()> {
    crate::io::write_json(path, report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
