use super::schedule::DoseEvent;
use crate::config::CaffeineConfig;
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Values below this are shown as zero. The model itself never floors.
pub const DISPLAY_EPSILON_MG: f64 = 0.01;

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Longest span the solver will ever add to or subtract from a timestamp.
pub const MAX_SPAN_HOURS: f64 = 24.0 * 366.0;

/// First-order elimination parameters. Curve sampling and the safety solver
/// both take this one value so they can never disagree on the half-life.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayModel {
    pub half_life_hours: f64,
    pub threshold_mg: f64,
}

impl Default for DecayModel {
    fn default() -> Self {
        Self::from_config(&CaffeineConfig::default())
    }
}

impl DecayModel {
    pub fn new(half_life_hours: f64, threshold_mg: f64) -> Self {
        Self {
            half_life_hours,
            threshold_mg,
        }
    }

    /// Build from config. Non-finite or non-positive values are replaced
    /// with the defaults.
    pub fn from_config(cfg: &CaffeineConfig) -> Self {
        let defaults = CaffeineConfig::default();
        Self::new(
            positive_or(cfg.half_life_hours, defaults.half_life_hours, "half_life_hours"),
            positive_or(cfg.threshold_mg, defaults.threshold_mg, "threshold_mg"),
        )
    }

    /// mg left from `mg` after `hours` of elimination.
    pub fn remaining(&self, mg: f64, hours: f64) -> f64 {
        mg * 0.5_f64.powf(hours / self.half_life_hours)
    }

    pub fn concentration_at(&self, t: NaiveDateTime, doses: &[DoseEvent]) -> f64 {
        concentration_at(t, doses, self.half_life_hours)
    }

    /// Hours needed for `from_mg` to decay down to `to_mg`.
    pub fn hours_to_decay(&self, from_mg: f64, to_mg: f64) -> f64 {
        self.half_life_hours * (from_mg / to_mg).log2()
    }
}

/// Sum of every dose taken at or before `t`, each decayed by the time since
/// it was taken. Doses after `t` contribute nothing.
pub fn concentration_at(t: NaiveDateTime, doses: &[DoseEvent], half_life_hours: f64) -> f64 {
    doses
        .iter()
        .filter(|d| d.timestamp <= t)
        .map(|d| d.amount_mg * 0.5_f64.powf(hours_between(d.timestamp, t) / half_life_hours))
        .sum()
}

fn positive_or(value: f64, default: f64, field: &str) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        tracing::warn!(field, value, default, "invalid caffeine model value, using default");
        default
    }
}

pub fn hours_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_milliseconds() as f64 / MS_PER_HOUR
}

/// Saturates at `MAX_SPAN_HOURS` in either direction; NaN maps to zero.
pub fn hours_to_duration(hours: f64) -> Duration {
    let hours = if hours.is_nan() {
        0.0
    } else {
        hours.clamp(-MAX_SPAN_HOURS, MAX_SPAN_HOURS)
    };
    Duration::milliseconds((hours * MS_PER_HOUR).round() as i64)
}

/// Round for presentation; sub-epsilon values read as zero.
pub fn display_mg(mg: f64) -> f64 {
    if mg < DISPLAY_EPSILON_MG {
        0.0
    } else {
        (mg * 100.0).round() / 100.0
    }
}

// ---------------------------------------------------------------------------
// Curve sampling
// ---------------------------------------------------------------------------

pub const MIN_SAMPLE_MINUTES: u32 = 5;
pub const MAX_SAMPLE_MINUTES: u32 = 60;

/// One point on the plotted curve. Serialized as `[timestamp, mg]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(
    into = "(NaiveDateTime, f64)",
    from = "(NaiveDateTime, f64)"
)]
pub struct ConcentrationSample {
    pub timestamp: NaiveDateTime,
    pub mg: f64,
}

impl From<ConcentrationSample> for (NaiveDateTime, f64) {
    fn from(s: ConcentrationSample) -> Self {
        (s.timestamp, s.mg)
    }
}

impl From<(NaiveDateTime, f64)> for ConcentrationSample {
    fn from((timestamp, mg): (NaiveDateTime, f64)) -> Self {
        Self { timestamp, mg }
    }
}

/// Evaluate the model every `interval_minutes` from `start` through `end`
/// inclusive. The interval is clamped to `MIN_SAMPLE_MINUTES..=MAX_SAMPLE_MINUTES`.
pub fn sample_curve(
    model: &DecayModel,
    doses: &[DoseEvent],
    start: NaiveDateTime,
    end: NaiveDateTime,
    interval_minutes: u32,
) -> Vec<ConcentrationSample> {
    let step = Duration::minutes(i64::from(
        interval_minutes.clamp(MIN_SAMPLE_MINUTES, MAX_SAMPLE_MINUTES),
    ));
    let mut samples = Vec::new();
    let mut t = start;
    while t <= end {
        samples.push(ConcentrationSample {
            timestamp: t,
            mg: display_mg(model.concentration_at(t, doses)),
        });
        t += step;
    }
    samples
}
