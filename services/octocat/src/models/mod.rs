//! Github API object models.

use serde::{Deserialize, Serialize};

pub mod commits;
pub mod events;

pub use commits::{Commit, Comparison};
pub use events::{PullRequest, PullRequestEvent};

/// A Github account, as linked to commits and pull requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Account login.
    pub login: String,

    /// Account ID.
    pub id: u64,

    /// Account type.
    #[serde(rename = "type", default)]
    pub kind: AccountType,
}

/// The kind of Github account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccountType {
    /// A person.
    #[default]
    User,

    /// An app or other automation.
    Bot,

    /// An organization.
    Organization,

    /// Anything Github adds later.
    #[serde(other)]
    Unknown,
}
