//! `vg init` — initialize a vigil project.

use crate::output::{OutputMode, render_success};
use crate::roster::STARTER_ROSTER;
use anyhow::{Context as _, Result};
use clap::Args;
use std::path::Path;
use vigil_core::config::{self, ProjectConfig};
use vigil_core::ledger::ActivityLedger;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Force re-initialization even if `.vigil/` already exists.
    #[arg(long)]
    pub force: bool,
}

const GITIGNORE: &str = "activity.db\nactivity.db-shm\nactivity.db-wal\n";

/// Execute `vg init`. Creates the project skeleton:
///
/// ```text
/// .vigil/
///   activity.db     (ledger database, migrated to the latest schema)
///   config.toml     (default project config)
///   roster.toml     (starter roster, commented example)
///   .gitignore      (ledger database files)
/// ```
///
/// # Errors
///
/// Returns an error if `.vigil/` already exists and `--force` is not set,
/// or if any filesystem or database operation fails.
pub fn run_init(args: &InitArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let vigil_dir = project_root.join(config::PROJECT_DIR);

    if vigil_dir.exists() && !args.force {
        anyhow::bail!(".vigil/ already exists. Use `vg init --force` to reinitialize.");
    }

    std::fs::create_dir_all(&vigil_dir)
        .with_context(|| format!("Failed to create {}", vigil_dir.display()))?;

    config::save_project_config(project_root, &ProjectConfig::default())?;

    // Keep an existing roster on --force: re-init repairs config and schema,
    // it does not discard the member list.
    let roster_path = vigil_dir.join("roster.toml");
    if !roster_path.exists() {
        std::fs::write(&roster_path, STARTER_ROSTER)
            .with_context(|| format!("Failed to write {}", roster_path.display()))?;
    }

    std::fs::write(vigil_dir.join(".gitignore"), GITIGNORE).context("Failed to write .gitignore")?;

    // Opening creates the database and applies migrations.
    let _ledger = ActivityLedger::open(&config::ledger_path(project_root))?;

    render_success(output, "initialized .vigil/")?;
    Ok(())
}
