//! Load-time integrity checks and the issues they report.

mod checks;
mod issue;

pub use checks::check_village;
pub use issue::{IssueCounts, IssueKind, LoadIssue, Severity};
