//! Shared output layer for human/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: readable text for humans, stable JSON for machines. Report
//! batches flow through [`StdoutSink`], the same delivery seam the
//! scheduler uses, so on-demand and periodic reports render identically.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{self, Write};
use vigil_core::report::{Accent, ReportBatch, ReportSink};

/// The two output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text.
    Human,
    /// Machine-readable JSON (one object per result).
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    #[must_use]
    pub fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// A structured error with optional suggestion and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Human-readable error message.
    pub message: String,
    /// Optional suggestion for how to fix the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Machine-readable error code (e.g. "E1001").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    /// Create a simple error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            error_code: None,
        }
    }

    /// Build from a core error code, keeping the code's remediation hint.
    pub fn from_code(code: vigil_core::error::ErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: code.hint().map(String::from),
            error_code: Some(code.code().to_string()),
        }
    }
}

/// Render a serializable value to stdout in the requested format.
///
/// In JSON mode, the value is serialized with `serde_json`. In human mode,
/// the provided `human_fn` closure is called to produce text output.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Human => {
            human_fn(value, &mut out)?;
        }
    }
    Ok(())
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "error": error,
            });
            serde_json::to_writer_pretty(&mut out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Human => {
            writeln!(out, "error: {}", error.message)?;
            if let Some(ref suggestion) = error.suggestion {
                writeln!(out, "  suggestion: {suggestion}")?;
            }
        }
    }
    Ok(())
}

/// Render a success message to stdout.
pub fn render_success(mode: OutputMode, message: &str) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "ok": true,
                "message": message,
            });
            serde_json::to_writer_pretty(&mut out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Human => {
            writeln!(out, "✓ {message}")?;
        }
    }
    Ok(())
}

/// Format an epoch-millisecond instant for report lines.
#[must_use]
pub fn format_instant_ms(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms).map_or_else(
        || format!("{ms} ms"),
        |instant| instant.format("%Y-%m-%d %H:%M UTC").to_string(),
    )
}

/// Report-line value for a last-activity instant, `None` meaning never seen.
#[must_use]
pub fn last_active_value(ms: Option<i64>) -> String {
    ms.map_or_else(
        || "Last active: never".to_string(),
        |ms| format!("Last active: {}", format_instant_ms(ms)),
    )
}

/// Delivers report batches to stdout.
///
/// Human mode renders each page with its title, accent marker, body, and
/// footer; JSON mode emits one JSON object per batch so multi-batch reports
/// stream as JSON Lines.
#[derive(Debug, Clone, Copy)]
pub struct StdoutSink {
    mode: OutputMode,
}

impl StdoutSink {
    #[must_use]
    pub const fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl ReportSink for StdoutSink {
    fn deliver(&self, batch: &ReportBatch) -> anyhow::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();

        if self.mode.is_json() {
            serde_json::to_writer(&mut out, batch)?;
            writeln!(out)?;
        } else {
            for page in &batch.pages {
                let marker = match page.accent {
                    Accent::Normal => "",
                    Accent::Alert => " [!]",
                };
                writeln!(out, "== {}{marker} ==", page.title)?;
                write!(out, "{}", page.body)?;
                if !page.body.ends_with('\n') {
                    writeln!(out)?;
                }
                writeln!(out, "-- {}", page.footer)?;
                writeln!(out)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CliError, OutputMode, format_instant_ms, last_active_value};
    use vigil_core::error::ErrorCode;

    #[test]
    fn output_mode_is_json() {
        assert!(OutputMode::Json.is_json());
        assert!(!OutputMode::Human.is_json());
    }

    #[test]
    fn cli_error_simple() {
        let err = CliError::new("something went wrong");
        assert_eq!(err.message, "something went wrong");
        assert!(err.suggestion.is_none());
        assert!(err.error_code.is_none());
    }

    #[test]
    fn cli_error_from_code_carries_hint() {
        let err = CliError::from_code(ErrorCode::NotInitialized, "no project here");
        assert_eq!(err.error_code.as_deref(), Some("E1001"));
        assert!(err.suggestion.as_deref().is_some_and(|s| s.contains("vg init")));
    }

    #[test]
    fn instant_formatting_is_utc() {
        // 2023-11-14T22:13:20Z
        assert_eq!(format_instant_ms(1_700_000_000_000), "2023-11-14 22:13 UTC");
    }

    #[test]
    fn last_active_value_spells_out_never() {
        assert_eq!(last_active_value(None), "Last active: never");
        assert!(last_active_value(Some(1_700_000_000_000)).starts_with("Last active: 2023-11-14"));
    }
}
