//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `roster_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use roster_core::dashboard::metrics::overview;
use roster_core::{init_logging_from_config, logging_status, CoreConfig, OverviewFilter, Store};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("roster_core ping={}", roster_core::ping());
    println!("roster_core version={}", roster_core::core_version());

    let config = CoreConfig::from_env();
    if config.log_dir.is_some() {
        if let Err(err) = init_logging_from_config(&config) {
            eprintln!("roster_core logging error={err}");
            return ExitCode::FAILURE;
        }
    }
    match logging_status() {
        Some((level, dir)) => println!("roster_core logging={level} dir={}", dir.display()),
        None => println!("roster_core logging=off"),
    }

    let store = match Store::open(&config.db_path) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("roster_core store error={err}");
            return ExitCode::FAILURE;
        }
    };

    let filter = OverviewFilter {
        top_performers: config.top_performers,
        recent_activities: config.recent_activity as usize,
        ..OverviewFilter::default()
    };
    let view = overview(
        &filter,
        &store.employees(),
        &store.tasks(),
        &store.activities(),
    );
    println!(
        "roster_core employees={} completed_tasks={} average_performance={:.2} average_rating={:.2} activities={}",
        view.employee_count,
        view.completed_tasks,
        view.average_performance,
        view.average_rating,
        view.recent_activities.len()
    );
    ExitCode::SUCCESS
}
