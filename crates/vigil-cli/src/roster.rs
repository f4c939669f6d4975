//! Roster file: the CLI's membership snapshot source.
//!
//! The chat platform that owns the real member list is out of scope; the
//! CLI stands in with a TOML roster at `.vigil/roster.toml`:
//!
//! ```toml
//! [[members]]
//! id = "u-100"
//! tags = ["member", "moderator"]
//! ```
//!
//! Each snapshot re-reads the file, so edits show up on the next
//! evaluation without restarting a watch loop.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use vigil_core::config::PROJECT_DIR;
use vigil_core::error::SnapshotError;
use vigil_core::snapshot::{Member, MembershipSource};

/// Starter roster written by `vg init`.
pub const STARTER_ROSTER: &str = "# One [[members]] block per community member.\n\
    # Tags control which members are in scope for inactivity checks.\n\
    #\n\
    # [[members]]\n\
    # id = \"u-100\"\n\
    # tags = [\"member\"]\n";

#[derive(Debug, Deserialize)]
struct RosterFile {
    #[serde(default)]
    members: Vec<RosterMember>,
}

#[derive(Debug, Deserialize)]
struct RosterMember {
    id: String,
    #[serde(default)]
    tags: Vec<String>,
}

/// Membership source backed by the project roster file.
#[derive(Debug, Clone)]
pub struct FileRoster {
    path: PathBuf,
    target_tag: String,
}

impl FileRoster {
    #[must_use]
    pub fn new(project_root: &Path, target_tag: impl Into<String>) -> Self {
        Self {
            path: project_root.join(PROJECT_DIR).join("roster.toml"),
            target_tag: target_tag.into(),
        }
    }

}

impl MembershipSource for FileRoster {
    fn snapshot(&self) -> Result<Vec<Member>, SnapshotError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| {
            SnapshotError::with_source(format!("read roster at {}", self.path.display()), source)
        })?;

        let parsed: RosterFile = toml::from_str(&content).map_err(|source| {
            SnapshotError::with_source(format!("parse roster at {}", self.path.display()), source)
        })?;

        Ok(parsed
            .members
            .into_iter()
            .map(|member| {
                let holds_tag = member.tags.iter().any(|tag| *tag == self.target_tag);
                Member::new(member.id, holds_tag)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{FileRoster, STARTER_ROSTER};
    use vigil_core::config::PROJECT_DIR;
    use vigil_core::snapshot::MembershipSource;

    fn write_roster(dir: &std::path::Path, content: &str) {
        let vigil = dir.join(PROJECT_DIR);
        std::fs::create_dir_all(&vigil).expect("create .vigil");
        std::fs::write(vigil.join("roster.toml"), content).expect("write roster");
    }

    #[test]
    fn missing_roster_is_a_snapshot_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let roster = FileRoster::new(dir.path(), "member");

        let err = roster.snapshot().expect_err("snapshot should fail");
        assert!(err.to_string().contains("snapshot unavailable"));
    }

    #[test]
    fn malformed_roster_is_a_snapshot_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_roster(dir.path(), "members = 5");

        let roster = FileRoster::new(dir.path(), "member");
        assert!(roster.snapshot().is_err());
    }

    #[test]
    fn starter_roster_parses_to_empty_snapshot() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_roster(dir.path(), STARTER_ROSTER);

        let roster = FileRoster::new(dir.path(), "member");
        let members = roster.snapshot().expect("snapshot");
        assert!(members.is_empty());
    }

    #[test]
    fn tags_resolve_target_tag_membership() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_roster(
            dir.path(),
            r#"
[[members]]
id = "u-tagged"
tags = ["member", "moderator"]

[[members]]
id = "u-other"
tags = ["guest"]

[[members]]
id = "u-untagged"
"#,
        );

        let roster = FileRoster::new(dir.path(), "member");
        let members = roster.snapshot().expect("snapshot");

        assert_eq!(members.len(), 3);
        assert!(members[0].holds_target_tag);
        assert_eq!(members[0].user_id, "u-tagged");
        assert!(!members[1].holds_target_tag);
        assert!(!members[2].holds_target_tag);
    }
}
