//! Membership snapshot seam.
//!
//! The member list is owned by an external collaborator (chat platform,
//! roster file, test fixture). The core consumes a fresh read-only snapshot
//! per evaluation and never caches or mutates it.

use crate::error::SnapshotError;

/// One currently known community member, as seen at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub user_id: String,
    /// Whether the member currently holds the tag that puts them in scope
    /// for inactivity checks.
    pub holds_target_tag: bool,
}

impl Member {
    #[must_use]
    pub fn new(user_id: impl Into<String>, holds_target_tag: bool) -> Self {
        Self {
            user_id: user_id.into(),
            holds_target_tag,
        }
    }
}

/// Supplies the current membership snapshot on demand.
///
/// A failed or partial enumeration is a [`SnapshotError`]; it aborts the
/// evaluation run that requested it but never crashes the process.
pub trait MembershipSource {
    /// Fetch every currently known member with their tag state.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] when the member list cannot be enumerated.
    fn snapshot(&self) -> Result<Vec<Member>, SnapshotError>;
}
