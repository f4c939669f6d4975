//! `vg record` — upsert one activity event into the ledger.

use crate::cmd::open_project;
use crate::output::{CliError, OutputMode, render, render_error};
use anyhow::Result;
use chrono::DateTime;
use clap::Args;
use serde::Serialize;
use std::io::Write as _;
use std::path::Path;
use vigil_core::error::ErrorCode;

#[derive(Args, Debug)]
pub struct RecordArgs {
    /// User the activity event belongs to.
    pub user_id: String,

    /// Event instant as RFC 3339 (defaults to now). Events may arrive out of
    /// order; the last recorded one wins.
    #[arg(long)]
    pub at: Option<String>,
}

/// JSON payload for `vg record`.
#[derive(Debug, Serialize)]
struct Recorded {
    user_id: String,
    recorded_at_ms: i64,
}

/// Execute `vg record`.
pub fn run_record(args: &RecordArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let at_ms = match &args.at {
        None => vigil_core::evaluate::now_ms(),
        Some(raw) => match DateTime::parse_from_rfc3339(raw) {
            Ok(instant) => instant.timestamp_millis(),
            Err(error) => {
                render_error(
                    output,
                    &CliError::from_code(
                        ErrorCode::InvalidTimestamp,
                        format!("could not parse --at value '{raw}': {error}"),
                    ),
                )?;
                anyhow::bail!("invalid --at timestamp");
            }
        },
    };

    let (_cfg, ledger) = open_project(output, project_root)?;

    if let Err(error) = ledger.record_activity(&args.user_id, at_ms) {
        render_error(output, &CliError::from_code(error.code(), error.to_string()))?;
        return Err(error.into());
    }

    let payload = Recorded {
        user_id: args.user_id.clone(),
        recorded_at_ms: at_ms,
    };
    render(output, &payload, |payload, w| {
        writeln!(
            w,
            "✓ recorded activity for {} at {}",
            payload.user_id,
            crate::output::format_instant_ms(payload.recorded_at_ms)
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_args_parse_with_and_without_at() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: RecordArgs,
        }

        let w = Wrapper::parse_from(["test", "u-100"]);
        assert_eq!(w.args.user_id, "u-100");
        assert!(w.args.at.is_none());

        let w = Wrapper::parse_from(["test", "u-100", "--at", "2024-01-01T00:00:00Z"]);
        assert_eq!(w.args.at.as_deref(), Some("2024-01-01T00:00:00Z"));
    }
}
