//! Inactivity evaluation over a membership snapshot and the activity ledger.

use crate::error::StorageError;
use crate::ledger::ActivityLedger;
use crate::snapshot::Member;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Milliseconds in one day.
pub const DAY_MS: i64 = 86_400_000;

/// Reference inactivity threshold: fourteen days of silence.
pub const DEFAULT_THRESHOLD_MS: i64 = 14 * DAY_MS;

/// The current instant as epoch milliseconds, the unit the ledger stores.
#[must_use]
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// A member selected by the inactivity predicate.
///
/// `last_activity_ms` is `None` only for "never active" entries; the
/// evaluator itself never emits those (untracked members are excluded, not
/// reported), but renderers share this shape with the full-ledger report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InactiveEntry {
    pub user_id: String,
    pub last_activity_ms: Option<i64>,
}

/// A member the evaluator could not check because their ledger read failed.
///
/// Skips are diagnostics, not failures: the run continues without them.
#[derive(Debug)]
pub struct SkippedMember {
    pub user_id: String,
    pub error: StorageError,
}

/// Result of one evaluation run.
#[derive(Debug, Default)]
pub struct Evaluation {
    /// Tagged members over the threshold, sorted by `user_id`.
    pub inactive: Vec<InactiveEntry>,
    /// Members excluded because their record could not be read.
    pub skipped: Vec<SkippedMember>,
}

/// Select the members who hold the target tag and have been silent for
/// strictly longer than `threshold_ms` as of `now_ms`.
///
/// The predicate applies per member, short-circuiting on the first failing
/// clause:
/// 1. the member holds the target tag
/// 2. the ledger has a record for them ("never active" means not yet
///    tracked, not long gone)
/// 3. `now_ms - last_activity_ms > threshold_ms`, strictly; silence equal
///    to the threshold does not qualify
///
/// Output is sorted by `user_id` so a given input always produces the same
/// sequence. A ledger read failure for one member becomes a
/// [`SkippedMember`] diagnostic and the run continues.
#[must_use]
pub fn evaluate(
    members: &[Member],
    ledger: &ActivityLedger,
    threshold_ms: i64,
    now_ms: i64,
) -> Evaluation {
    info!(members = members.len(), "evaluating inactivity");

    let mut result = Evaluation::default();

    for member in members {
        if !member.holds_target_tag {
            continue;
        }

        let last_activity_ms = match ledger.get_last_activity(&member.user_id) {
            Ok(last) => last,
            Err(error) => {
                warn!(user_id = %member.user_id, %error, "skipping member: ledger read failed");
                result.skipped.push(SkippedMember {
                    user_id: member.user_id.clone(),
                    error,
                });
                continue;
            }
        };

        let Some(last_ms) = last_activity_ms else {
            debug!(user_id = %member.user_id, "never active, not yet tracked");
            continue;
        };

        let silent_ms = now_ms - last_ms;
        debug!(user_id = %member.user_id, last_ms, silent_ms, "checked member");

        if silent_ms > threshold_ms {
            result.inactive.push(InactiveEntry {
                user_id: member.user_id.clone(),
                last_activity_ms: Some(last_ms),
            });
        }
    }

    result.inactive.sort_by(|a, b| a.user_id.cmp(&b.user_id));
    result
}
