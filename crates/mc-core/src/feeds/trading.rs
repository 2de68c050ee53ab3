use super::percent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot written by the prediction-market bot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradingState {
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub starting_balance: f64,
    #[serde(default)]
    pub trades: Vec<Trade>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub market: String,
    /// e.g. `weather` or `crypto`.
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub side: String,
    #[serde(default)]
    pub stake: f64,
    #[serde(default)]
    pub pnl: Option<f64>,
    #[serde(default)]
    pub settled: bool,
    #[serde(default)]
    pub opened_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: String,
    pub settled: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate_pct: Option<f64>,
    pub pnl: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingSummary {
    pub balance: f64,
    pub starting_balance: f64,
    pub total_trades: usize,
    pub open_trades: usize,
    pub settled_trades: usize,
    pub wins: usize,
    pub losses: usize,
    /// Wins over decided trades; break-even settlements are excluded.
    pub win_rate_pct: Option<f64>,
    pub total_pnl: f64,
    pub open_stake: f64,
    pub roi_pct: Option<f64>,
    pub by_category: Vec<CategoryStats>,
}

#[derive(Default)]
struct Tally {
    settled: usize,
    wins: usize,
    losses: usize,
    pnl: f64,
}

impl Tally {
    fn add(&mut self, pnl: f64) {
        self.settled += 1;
        self.pnl += pnl;
        if pnl > 0.0 {
            self.wins += 1;
        } else if pnl < 0.0 {
            self.losses += 1;
        }
    }

    fn win_rate(&self) -> Option<f64> {
        percent(self.wins as f64, (self.wins + self.losses) as f64)
    }
}

pub fn summarize(state: &TradingState) -> TradingSummary {
    let mut overall = Tally::default();
    let mut categories: BTreeMap<String, Tally> = BTreeMap::new();
    let mut open_trades = 0;
    let mut open_stake = 0.0;

    for trade in &state.trades {
        if !trade.settled {
            open_trades += 1;
            open_stake += trade.stake;
            continue;
        }
        let pnl = trade.pnl.unwrap_or(0.0);
        overall.add(pnl);
        let key = if trade.category.trim().is_empty() {
            "uncategorized".to_string()
        } else {
            trade.category.trim().to_ascii_lowercase()
        };
        categories.entry(key).or_default().add(pnl);
    }

    TradingSummary {
        balance: state.balance,
        starting_balance: state.starting_balance,
        total_trades: state.trades.len(),
        open_trades,
        settled_trades: overall.settled,
        wins: overall.wins,
        losses: overall.losses,
        win_rate_pct: overall.win_rate(),
        total_pnl: round_cents(overall.pnl),
        open_stake: round_cents(open_stake),
        roi_pct: percent(state.balance - state.starting_balance, state.starting_balance),
        by_category: categories
            .into_iter()
            .map(|(category, t)| CategoryStats {
                category,
                settled: t.settled,
                wins: t.wins,
                losses: t.losses,
                win_rate_pct: t.win_rate(),
                pnl: round_cents(t.pnl),
            })
            .collect(),
    }
}

fn round_cents(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
