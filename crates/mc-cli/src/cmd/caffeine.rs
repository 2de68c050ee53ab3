use crate::output::print_json;
use anyhow::Context;
use mc_core::caffeine::{self, ScheduleConfig, ScheduleParams};
use mc_core::config::Config;
use mc_core::paths;
use std::path::Path;

pub fn run(root: &Path, params: ScheduleParams, write_cache: bool, json: bool) -> anyhow::Result<()> {
    let config = Config::load_or_default(root).context("failed to load config")?;
    let schedule = ScheduleConfig::from_params(&params);
    let now = chrono::Local::now().naive_local();
    let report = caffeine::compute(&schedule, &config.caffeine, now);

    if write_cache {
        let path = paths::caffeine_cache_path(root);
        caffeine::write_cache(&path, &report)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    if json {
        return print_json(&report);
    }

    let intake: Vec<String> = report
        .intake_times
        .iter()
        .map(|t| t.format("%H:%M").to_string())
        .collect();

    println!(
        "{} x {} ({} mg each), awake {} to {}",
        report.num_coffees,
        report.source.label(),
        report.coffee_mg,
        report.wake_time,
        report.sleep_time
    );
    println!("  intake:      {}", intake.join(", "));
    println!("  status:      {}", report.status);
    println!("  in system:   {:.1} mg", report.current_mg);
    println!("  last call:   {}", report.last_coffee_time);
    println!("  safe sleep:  {}", report.safe_sleep_time);
    println!("  {}", report.cutoff_str);
    Ok(())
}
