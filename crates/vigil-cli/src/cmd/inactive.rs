//! `vg inactive` — evaluate and report inactive tagged members.

use crate::cmd::{open_project, page_budget};
use crate::output::{CliError, OutputMode, StdoutSink, last_active_value};
use anyhow::Result;
use clap::Args;
use std::path::Path;
use tracing::warn;
use vigil_core::config::ProjectConfig;
use vigil_core::evaluate::{DAY_MS, evaluate, now_ms};
use vigil_core::ledger::ActivityLedger;
use vigil_core::report::{Accent, ReportEntry, ReportSink, paginate};
use vigil_core::snapshot::MembershipSource;

#[derive(Args, Debug, Default)]
pub struct InactiveArgs {}

/// Snapshot the membership, evaluate inactivity, and deliver the paginated
/// report through `sink`.
///
/// Shared by the on-demand command and the watch loop so both deliver
/// through the same collaborator.
///
/// # Errors
///
/// Returns an error when the snapshot cannot be taken or delivery fails;
/// per-member ledger read failures only log and skip.
pub fn deliver_inactivity_report(
    ledger: &ActivityLedger,
    roster: &dyn MembershipSource,
    cfg: &ProjectConfig,
    sink: &dyn ReportSink,
) -> Result<()> {
    let members = roster.snapshot()?;
    let threshold_ms = cfg.tracking.inactive_after_days * DAY_MS;
    let evaluation = evaluate(&members, ledger, threshold_ms, now_ms());

    if !evaluation.skipped.is_empty() {
        warn!(
            skipped = evaluation.skipped.len(),
            "some members were excluded because their ledger reads failed"
        );
    }

    let entries: Vec<ReportEntry> = evaluation
        .inactive
        .iter()
        .map(|entry| {
            ReportEntry::new(
                entry.user_id.as_str(),
                last_active_value(entry.last_activity_ms),
            )
        })
        .collect();

    let batches = paginate(
        &entries,
        "Inactive members",
        "No inactive members found.",
        Accent::Alert,
        page_budget(&cfg.report),
    );

    for batch in &batches {
        sink.deliver(batch)?;
    }
    Ok(())
}

/// Execute `vg inactive`.
pub fn run_inactive(_args: &InactiveArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let (cfg, ledger) = open_project(output, project_root)?;
    let roster = crate::roster::FileRoster::new(project_root, cfg.tracking.target_tag.clone());
    let sink = StdoutSink::new(output);

    if let Err(error) = deliver_inactivity_report(&ledger, &roster, &cfg, &sink) {
        // An explanatory failure message stands in for the report.
        crate::output::render_error(output, &CliError::new(error.to_string()))?;
        return Err(error);
    }
    Ok(())
}
