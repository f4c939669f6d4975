//! `vg watch` — run the periodic inactivity check in the foreground.

use crate::cmd::open_project;
use crate::output::{OutputMode, StdoutSink, render_success};
use anyhow::Result;
use clap::Args;
use std::io::BufRead as _;
use std::path::Path;
use std::time::Duration;
use vigil_core::schedule::Scheduler;

#[derive(Args, Debug, Default)]
pub struct WatchArgs {
    /// Override the check interval in seconds (default: config
    /// `schedule.check_interval_hours`).
    #[arg(long)]
    pub interval_secs: Option<u64>,
}

/// Execute `vg watch`. Delivers a report every interval through the same
/// sink as `vg inactive`, until stdin reaches EOF or the process is
/// interrupted. A failed tick is logged and the loop keeps going.
pub fn run_watch(args: &WatchArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let (cfg, ledger) = open_project(output, project_root)?;

    let interval = args.interval_secs.map_or_else(
        || Duration::from_secs(cfg.schedule.check_interval_hours * 3600),
        Duration::from_secs,
    );

    let roster = crate::roster::FileRoster::new(project_root, cfg.tracking.target_tag.clone());
    let sink = StdoutSink::new(output);

    render_success(
        output,
        &format!(
            "watching: checking inactivity every {}s (Ctrl-C or EOF to stop)",
            interval.as_secs()
        ),
    )?;

    let scheduler = Scheduler::spawn(interval, move || {
        super::inactive::deliver_inactivity_report(&ledger, &roster, &cfg, &sink)
    })?;

    // Park the foreground on stdin; EOF is the clean stop signal for
    // scripted runs, Ctrl-C ends the process either way.
    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
    }

    scheduler.stop();
    Ok(())
}
