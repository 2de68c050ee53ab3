//! One-screen rollup across every collection and feed.

use crate::config::Config;
use crate::error::Result;
use crate::fallback::Origin;
use crate::{content, feeds, proposal, task};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub dashboard: String,
    pub open_tasks: usize,
    pub task_summary: String,
    pub pending_proposals: usize,
    pub content_pipeline: BTreeMap<String, usize>,
    pub trading_win_rate_pct: Option<f64>,
    pub trading_pnl: f64,
    pub social_remaining_today: u32,
    pub cron_failing: usize,
    /// Where each feed's numbers came from.
    pub sources: BTreeMap<&'static str, Origin>,
}

pub fn build(root: &Path, config: &Config, today: NaiveDate) -> Result<Overview> {
    let tasks = task::list(root)?;
    let proposals = proposal::list(root)?;
    let items = content::list(root)?;

    let trading = feeds::load_feed::<feeds::trading::TradingState>(
        root,
        &config.feeds.trading_state,
        feeds::TRADING,
    )?;
    let social = feeds::load_feed::<feeds::social::SocialState>(
        root,
        &config.feeds.social_state,
        feeds::SOCIAL,
    )?;
    let cron = feeds::load_feed::<Vec<feeds::cron::CronJob>>(
        root,
        &config.feeds.cron_jobs,
        feeds::CRON,
    )?;

    let trading_summary = feeds::trading::summarize(&trading.value);
    let social_summary = feeds::social::summarize(&social.value, today);
    let cron_summary = feeds::cron::summarize(&cron.value);

    let mut sources = BTreeMap::new();
    sources.insert(feeds::TRADING, trading.origin);
    sources.insert(feeds::SOCIAL, social.origin);
    sources.insert(feeds::CRON, cron.origin);

    Ok(Overview {
        dashboard: config.dashboard.name.clone(),
        open_tasks: task::open_count(&tasks),
        task_summary: task::summarize(&tasks),
        pending_proposals: proposal::pending_count(&proposals),
        content_pipeline: content::pipeline_counts(&items)
            .into_iter()
            .map(|(status, n)| (status.to_string(), n))
            .collect(),
        trading_win_rate_pct: trading_summary.win_rate_pct,
        trading_pnl: trading_summary.total_pnl,
        social_remaining_today: social_summary.remaining_today,
        cron_failing: cron_summary.failing,
        sources,
    })
}
