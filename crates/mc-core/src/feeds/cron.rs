use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[serde(alias = "success")]
    Ok,
    #[serde(alias = "failed", alias = "failure")]
    Error,
    Running,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CronJob {
    pub name: String,
    #[serde(default)]
    pub schedule: String,
    #[serde(default)]
    pub last_run: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_status: JobStatus,
    #[serde(default)]
    pub last_duration_secs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CronSummary {
    pub total: usize,
    pub ok: usize,
    pub failing: usize,
    pub running: usize,
    pub unknown: usize,
    /// Failing jobs first, then by name.
    pub jobs: Vec<CronJob>,
}

pub fn summarize(jobs: &[CronJob]) -> CronSummary {
    let count = |s: JobStatus| jobs.iter().filter(|j| j.last_status == s).count();
    let mut sorted = jobs.to_vec();
    sorted.sort_by(|a, b| {
        let rank = |j: &CronJob| u8::from(j.last_status != JobStatus::Error);
        rank(a).cmp(&rank(b)).then_with(|| a.name.cmp(&b.name))
    });

    CronSummary {
        total: jobs.len(),
        ok: count(JobStatus::Ok),
        failing: count(JobStatus::Error),
        running: count(JobStatus::Running),
        unknown: count(JobStatus::Unknown),
        jobs: sorted,
    }
}
