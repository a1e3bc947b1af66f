//! Commit data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Account;

/// The result of comparing two commits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    /// Number of commits between base and head, across all pages.
    pub total_commits: usize,

    /// Commits between base and head, oldest first.
    #[serde(default)]
    pub commits: Vec<Commit>,
}

/// A commit object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    /// The SHA of the commit.
    pub sha: String,

    /// The commit details.
    pub commit: CommitDetails,

    /// The Github account of the author, when Github could link one.
    #[serde(default)]
    pub author: Option<Account>,

    /// Parent commits.
    #[serde(default)]
    pub parents: Vec<ParentCommit>,
}

/// The git data of a commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetails {
    /// The author of the commit.
    #[serde(default)]
    pub author: Option<GitIdentity>,
    /// The committer of the commit.
    #[serde(default)]
    pub committer: Option<GitIdentity>,
    /// The commit message.
    pub message: String,
    /// Signature verification.
    #[serde(default)]
    pub verification: Verification,
}

/// The name, email and date git recorded for an author or committer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitIdentity {
    /// Name
    #[serde(default)]
    pub name: String,
    /// Email
    #[serde(default)]
    pub email: String,
    /// The date of the commit.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// Signature verification status, as computed by Github.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Verification {
    /// Whether the signature was verified.
    pub verified: bool,
    /// Why verification succeeded or failed, e.g. `unsigned`.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Reference to a parent commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParentCommit {
    /// The SHA of the parent.
    pub sha: String,
}
