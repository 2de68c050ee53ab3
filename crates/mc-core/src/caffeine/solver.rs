use super::model::{hours_to_duration, DecayModel};
use super::schedule::DoseEvent;
use super::source::CaffeineSource;
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyStatus {
    Safe,
    CutOff,
    Approaching,
}

impl SafetyStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SafetyStatus::Safe => "SAFE",
            SafetyStatus::CutOff => "CUT_OFF",
            SafetyStatus::Approaching => "APPROACHING",
        }
    }
}

impl fmt::Display for SafetyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyResult {
    pub current_mg: f64,
    pub safe_sleep_time: NaiveDateTime,
    /// Last-call deadline; `None` when a single serving is already at or
    /// under the threshold.
    pub cutoff_time: Option<NaiveDateTime>,
    pub status: SafetyStatus,
}

/// Latest time a dose of `dose_mg` can be taken and still decay to the
/// threshold by `sleep`.
pub fn last_call_time(
    model: &DecayModel,
    sleep: NaiveDateTime,
    dose_mg: f64,
) -> Option<NaiveDateTime> {
    if dose_mg <= model.threshold_mg {
        return None;
    }
    Some(sleep - hours_to_duration(model.hours_to_decay(dose_mg, model.threshold_mg)))
}

/// First instant at or after `now` where `current_mg` has decayed to the
/// threshold.
pub fn safe_sleep_time(model: &DecayModel, now: NaiveDateTime, current_mg: f64) -> NaiveDateTime {
    if current_mg <= model.threshold_mg {
        return now;
    }
    now + hours_to_duration(model.hours_to_decay(current_mg, model.threshold_mg))
}

pub fn classify(
    model: &DecayModel,
    now: NaiveDateTime,
    current_mg: f64,
    cutoff: Option<NaiveDateTime>,
    approaching: Duration,
) -> SafetyStatus {
    if current_mg <= model.threshold_mg {
        return SafetyStatus::Safe;
    }
    match cutoff {
        Some(c) if now >= c => SafetyStatus::CutOff,
        Some(c) if c - now <= approaching => SafetyStatus::Approaching,
        _ => SafetyStatus::Safe,
    }
}

pub fn solve(
    model: &DecayModel,
    doses: &[DoseEvent],
    now: NaiveDateTime,
    sleep: NaiveDateTime,
    dose_mg: f64,
    approaching: Duration,
) -> SafetyResult {
    let current_mg = model.concentration_at(now, doses);
    let cutoff_time = last_call_time(model, sleep, dose_mg);
    SafetyResult {
        current_mg,
        safe_sleep_time: safe_sleep_time(model, now, current_mg),
        cutoff_time,
        status: classify(model, now, current_mg, cutoff_time, approaching),
    }
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

pub const NO_CUTOFF: &str = "no cutoff needed";

/// `03:54 PM`
pub fn clock(t: NaiveDateTime) -> String {
    t.format("%I:%M %p").to_string()
}

fn span(d: Duration) -> String {
    let minutes = d.num_minutes().max(0);
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// One-line explanation of the last-call state shown next to the status.
pub fn cutoff_text(
    result: &SafetyResult,
    now: NaiveDateTime,
    source: CaffeineSource,
    threshold_mg: f64,
) -> String {
    match result.cutoff_time {
        None => format!(
            "No cutoff needed: {} is at or under the {threshold_mg} mg threshold",
            source.label()
        ),
        Some(c) if now >= c && result.status == SafetyStatus::Safe => format!(
            "Past last call at {}, already under the {threshold_mg} mg threshold",
            clock(c)
        ),
        Some(c) if now >= c => format!("Cut off since {}", clock(c)),
        Some(c) => format!("Last call at {} ({} left)", clock(c), span(c - now)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 14)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn doses(times: &[NaiveDateTime], mg: f64) -> Vec<DoseEvent> {
        times
            .iter()
            .map(|t| DoseEvent {
                timestamp: *t,
                amount_mg: mg,
            })
            .collect()
    }

    fn two_hours() -> Duration {
        Duration::hours(2)
    }

    #[test]
    fn last_call_inverts_single_dose_decay() {
        let model = DecayModel::default();
        let sleep = at(23, 0);
        let last = last_call_time(&model, sleep, 95.0).unwrap();
        let hours = crate::caffeine::model::hours_between(last, sleep);
        let left = model.remaining(95.0, hours);
        assert!((left - 25.0).abs() < 1e-3, "left {left}");
    }

    #[test]
    fn last_call_undefined_when_serving_under_threshold() {
        let model = DecayModel::default();
        assert_eq!(last_call_time(&model, at(23, 0), 25.0), None);
        assert_eq!(last_call_time(&model, at(23, 0), 10.0), None);
    }

    #[test]
    fn safe_sleep_is_now_when_under_threshold() {
        let model = DecayModel::default();
        let now = at(21, 0);
        let d = doses(&[at(7, 0)], 95.0);
        let result = solve(&model, &d, now, at(23, 0), 95.0, two_hours());
        assert!(result.current_mg <= 25.0);
        assert_eq!(result.safe_sleep_time, now);
        assert_ne!(result.status, SafetyStatus::CutOff);
    }

    #[test]
    fn safe_sleep_after_now_when_over_threshold() {
        let model = DecayModel::default();
        let now = at(12, 0);
        let d = doses(&[at(12, 0)], 200.0);
        let t = safe_sleep_time(&model, now, 200.0);
        assert_eq!(t, now + hours_to_duration(5.7 * 3.0));
        assert!(model.concentration_at(t, &d) <= 25.0 + 1e-6);
    }

    #[test]
    fn safe_sleep_is_idempotent() {
        let model = DecayModel::default();
        let d = doses(&[at(7, 0), at(11, 0), at(15, 0)], 95.0);
        let a = solve(&model, &d, at(16, 20), at(23, 0), 95.0, two_hours());
        let b = solve(&model, &d, at(16, 20), at(23, 0), 95.0, two_hours());
        assert_eq!(a, b);
    }

    #[test]
    fn status_transitions_around_last_call() {
        let model = DecayModel::default();
        let last = last_call_time(&model, at(23, 0), 95.0).unwrap();
        let d = doses(&[at(7, 0), at(11, 0), at(15, 0)], 95.0);

        let early = at(9, 0);
        assert_eq!(
            classify(&model, early, model.concentration_at(early, &d), Some(last), two_hours()),
            SafetyStatus::Safe
        );

        let near = last - Duration::minutes(30);
        assert_eq!(
            classify(&model, near, model.concentration_at(near, &d), Some(last), two_hours()),
            SafetyStatus::Approaching
        );

        let past = last + Duration::minutes(1);
        assert_eq!(
            classify(&model, past, model.concentration_at(past, &d), Some(last), two_hours()),
            SafetyStatus::CutOff
        );
    }

    #[test]
    fn cutoff_text_variants() {
        let model = DecayModel::default();
        let now = at(12, 0);
        let last = at(15, 30);
        let mut result = SafetyResult {
            current_mg: 80.0,
            safe_sleep_time: now,
            cutoff_time: Some(last),
            status: SafetyStatus::Safe,
        };
        assert_eq!(
            cutoff_text(&result, now, CaffeineSource::Coffee, model.threshold_mg),
            "Last call at 03:30 PM (3h 30m left)"
        );
        assert_eq!(
            cutoff_text(&result, at(16, 0), CaffeineSource::Coffee, model.threshold_mg),
            "Past last call at 03:30 PM, already under the 25 mg threshold"
        );
        result.status = SafetyStatus::CutOff;
        assert_eq!(
            cutoff_text(&result, at(16, 0), CaffeineSource::Coffee, model.threshold_mg),
            "Cut off since 03:30 PM"
        );
        result.cutoff_time = None;
        assert!(cutoff_text(&result, now, CaffeineSource::GreenTea, 30.0)
            .starts_with("No cutoff needed: green tea"));
    }

    #[test]
    fn status_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&SafetyStatus::CutOff).unwrap(),
            "\"CUT_OFF\""
        );
    }

    #[test]
    fn safety_result_json_round_trip() {
        let result = SafetyResult {
            current_mg: 123.456789,
            safe_sleep_time: at(22, 17),
            cutoff_time: Some(at(16, 40)),
            status: SafetyStatus::Approaching,
        };
        let json = serde_json::to_string(&result).unwrap();
        let back: SafetyResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
