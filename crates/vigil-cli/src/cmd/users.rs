//! `vg users` — full-ledger activity report.

use crate::cmd::{open_project, page_budget};
use crate::output::{CliError, OutputMode, StdoutSink, last_active_value};
use anyhow::Result;
use clap::Args;
use std::path::Path;
use vigil_core::report::{Accent, ReportEntry, ReportSink as _, paginate};

#[derive(Args, Debug, Default)]
pub struct UsersArgs {}

/// Execute `vg users`.
pub fn run_users(_args: &UsersArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let (cfg, ledger) = open_project(output, project_root)?;

    let records = match ledger.list_all() {
        Ok(records) => records,
        Err(error) => {
            // An explanatory failure message stands in for the report.
            crate::output::render_error(
                output,
                &CliError::from_code(error.code(), error.to_string()),
            )?;
            return Err(error.into());
        }
    };

    let entries: Vec<ReportEntry> = records
        .iter()
        .map(|record| {
            ReportEntry::new(
                record.user_id.as_str(),
                last_active_value(Some(record.last_activity_ms)),
            )
        })
        .collect();

    let batches = paginate(
        &entries,
        "Tracked users",
        "No users found in the ledger.",
        Accent::Normal,
        page_budget(&cfg.report),
    );

    let sink = StdoutSink::new(output);
    for batch in &batches {
        sink.deliver(batch)?;
    }
    Ok(())
}
