use super::percent;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot written by the social posting bot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialState {
    #[serde(default)]
    pub daily_post_limit: u32,
    #[serde(default)]
    pub monthly_budget_usd: f64,
    #[serde(default)]
    pub monthly_spend_usd: f64,
    #[serde(default)]
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub text: String,
    pub posted_at: DateTime<Utc>,
    #[serde(default = "default_kind")]
    pub kind: String,
}

fn default_kind() -> String {
    "post".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialSummary {
    pub posts_today: usize,
    pub daily_post_limit: u32,
    pub remaining_today: u32,
    pub monthly_budget_usd: f64,
    pub monthly_spend_usd: f64,
    pub budget_remaining_usd: f64,
    pub budget_used_pct: Option<f64>,
    pub last_post_at: Option<DateTime<Utc>>,
}

/// Summarize against `today` (UTC calendar day).
pub fn summarize(state: &SocialState, today: NaiveDate) -> SocialSummary {
    let posts_today = state
        .posts
        .iter()
        .filter(|p| p.posted_at.date_naive() == today)
        .count();
    let used = u32::try_from(posts_today).unwrap_or(u32::MAX);

    SocialSummary {
        posts_today,
        daily_post_limit: state.daily_post_limit,
        remaining_today: state.daily_post_limit.saturating_sub(used),
        monthly_budget_usd: state.monthly_budget_usd,
        monthly_spend_usd: state.monthly_spend_usd,
        budget_remaining_usd: ((state.monthly_budget_usd - state.monthly_spend_usd).max(0.0)
            * 100.0)
            .round()
            / 100.0,
        budget_used_pct: percent(state.monthly_spend_usd, state.monthly_budget_usd),
        last_post_at: state.posts.iter().map(|p| p.posted_at).max(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post(day: u32, hour: u32) -> Post {
        Post {
            text: "gm".into(),
            posted_at: Utc.with_ymd_and_hms(2026, 10, day, hour, 0, 0).unwrap(),
            kind: "post".into(),
        }
    }

    #[test]
    fn counts_only_todays_posts() {
        let state = SocialState {
            daily_post_limit: 5,
            monthly_budget_usd: 100.0,
            monthly_spend_usd: 42.0,
            posts: vec![post(13, 22), post(14, 8), post(14, 12)],
        };
        let s = summarize(&state, NaiveDate::from_ymd_opt(2026, 10, 14).unwrap());
        assert_eq!(s.posts_today, 2);
        assert_eq!(s.remaining_today, 3);
        assert_eq!(s.budget_used_pct, Some(42.0));
        assert_eq!(s.budget_remaining_usd, 58.0);
        assert_eq!(s.last_post_at, Some(post(14, 12).posted_at));
    }

    #[test]
    fn remaining_never_negative() {
        let state = SocialState {
            daily_post_limit: 1,
            posts: vec![post(14, 1), post(14, 2)],
            ..Default::default()
        };
        let s = summarize(&state, NaiveDate::from_ymd_opt(2026, 10, 14).unwrap());
        assert_eq!(s.remaining_today, 0);
        assert_eq!(s.budget_used_pct, None);
    }
}
