//! Command handlers for the `vg` binary.

pub mod inactive;
pub mod init;
pub mod record;
pub mod users;
pub mod watch;

use crate::output::{CliError, OutputMode, render_error};
use anyhow::Result;
use std::path::Path;
use vigil_core::config::{self, ProjectConfig, ReportConfig};
use vigil_core::error::ErrorCode;
use vigil_core::ledger::ActivityLedger;
use vigil_core::report::PageBudget;

/// Load project config and open the activity ledger, rendering a structured
/// error when the directory was never initialized.
pub fn open_project(
    output: OutputMode,
    project_root: &Path,
) -> Result<(ProjectConfig, ActivityLedger)> {
    let vigil_dir = project_root.join(config::PROJECT_DIR);
    if !vigil_dir.exists() {
        render_error(
            output,
            &CliError::from_code(
                ErrorCode::NotInitialized,
                format!("{} does not exist", vigil_dir.display()),
            ),
        )?;
        anyhow::bail!("project not initialized");
    }

    let cfg = config::load_project_config(project_root)?;
    let ledger = ActivityLedger::open(&config::ledger_path(project_root))?;
    Ok((cfg, ledger))
}

/// Packing caps from the report section of the config.
#[must_use]
pub const fn page_budget(report: &ReportConfig) -> PageBudget {
    PageBudget {
        max_chars: report.page_chars,
        max_pages: report.batch_pages,
    }
}
