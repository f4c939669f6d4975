use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the project state directory created by `vg init`.
pub const PROJECT_DIR: &str = ".vigil";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub tracking: TrackingConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            tracking: TrackingConfig::default(),
            report: ReportConfig::default(),
            schedule: ScheduleConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Membership tag that puts a user in scope for inactivity checks.
    #[serde(default = "default_target_tag")]
    pub target_tag: String,
    /// Days of silence after which a tagged member counts as inactive.
    /// The boundary is strict: exactly this many days is still active.
    #[serde(default = "default_inactive_after_days")]
    pub inactive_after_days: i64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            target_tag: default_target_tag(),
            inactive_after_days: default_inactive_after_days(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Character budget per report page body.
    #[serde(default = "default_page_chars")]
    pub page_chars: usize,
    /// Maximum pages delivered per batch.
    #[serde(default = "default_batch_pages")]
    pub batch_pages: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page_chars: default_page_chars(),
            batch_pages: default_batch_pages(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Hours between periodic inactivity checks.
    #[serde(default = "default_check_interval_hours")]
    pub check_interval_hours: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            check_interval_hours: default_check_interval_hours(),
        }
    }
}

/// Path of the config file under `project_root`.
#[must_use]
pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_DIR).join("config.toml")
}

/// Path of the activity ledger database under `project_root`.
#[must_use]
pub fn ledger_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_DIR).join("activity.db")
}

pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = config_path(project_root);
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Write `config` to its canonical location, creating `.vigil/` if needed.
pub fn save_project_config(project_root: &Path, config: &ProjectConfig) -> Result<()> {
    let path = config_path(project_root);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn default_target_tag() -> String {
    "member".to_string()
}

const fn default_inactive_after_days() -> i64 {
    14
}

const fn default_page_chars() -> usize {
    1024
}

const fn default_batch_pages() -> usize {
    10
}

const fn default_check_interval_hours() -> u64 {
    24
}
