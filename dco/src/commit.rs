//! Commit records as seen by the validator.

use std::fmt;

/// A git identity: the name and email recorded in a commit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Identity {
    /// Display name
    pub name: String,
    /// Email address, possibly empty when the source omitted it.
    pub email: String,
}

impl Identity {
    /// Create a new identity from a name and an email.
    pub fn new<N: Into<String>, E: Into<String>>(name: N, email: E) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// Classification of a hosting platform account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountKind {
    /// A regular user account.
    #[default]
    User,
    /// An automated account. Bots are never asked to sign off.
    Bot,
    /// An organization account.
    Organization,
}

/// The hosting platform account linked to a commit author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Platform login
    pub login: String,
    /// Account classification
    pub kind: AccountKind,
}

impl Account {
    /// A regular user account with the given login.
    pub fn user<L: Into<String>>(login: L) -> Self {
        Self {
            login: login.into(),
            kind: AccountKind::User,
        }
    }

    /// A bot account with the given login.
    pub fn bot<L: Into<String>>(login: L) -> Self {
        Self {
            login: login.into(),
            kind: AccountKind::Bot,
        }
    }

    /// Is this account classified as a bot?
    pub fn is_bot(&self) -> bool {
        self.kind == AccountKind::Bot
    }
}

/// A single commit from a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Commit SHA
    pub sha: String,

    /// Platform account of the author, when the platform could link one.
    pub account: Option<Account>,

    /// Git author
    pub author: Identity,

    /// Git committer
    pub committer: Identity,

    /// Full commit message, trailers included.
    pub message: String,

    /// Number of parent commits.
    pub parents: usize,

    /// Whether the platform verified the commit signature.
    pub verified: bool,
}

impl Commit {
    /// Create an unverified, single-parent commit with no linked account,
    /// where the author also committed the change.
    pub fn new<S, M>(sha: S, author: Identity, message: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Self {
            sha: sha.into(),
            account: None,
            committer: author.clone(),
            author,
            message: message.into(),
            parents: 1,
            verified: false,
        }
    }

    /// Set the linked platform account.
    pub fn with_account(mut self, account: Account) -> Self {
        self.account = Some(account);
        self
    }

    /// Set the committer identity.
    pub fn with_committer(mut self, committer: Identity) -> Self {
        self.committer = committer;
        self
    }

    /// Set the number of parents.
    pub fn with_parents(mut self, parents: usize) -> Self {
        self.parents = parents;
        self
    }

    /// Set the verification flag.
    pub fn with_verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }

    /// Merge commits have more than one parent.
    pub fn is_merge(&self) -> bool {
        self.parents > 1
    }

    /// Was this commit authored by a bot account?
    pub fn is_bot(&self) -> bool {
        self.account.as_ref().is_some_and(Account::is_bot)
    }

    /// The email that identifies this commit: the author's, or the
    /// committer's when the author email is empty.
    pub fn email(&self) -> &str {
        if self.author.email.is_empty() {
            &self.committer.email
        } else {
            &self.author.email
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_display() {
        let identity = Identity::new("Jane Doe", "jane@example.com");
        assert_eq!(identity.to_string(), "Jane Doe <jane@example.com>");
    }

    #[test]
    fn merge_detection() {
        let commit = Commit::new("abc", Identity::default(), "merge");
        assert!(!commit.is_merge());
        assert!(commit.with_parents(2).is_merge());
    }

    #[test]
    fn email_falls_back_to_committer() {
        let commit = Commit::new("abc", Identity::new("Jane", ""), "msg")
            .with_committer(Identity::new("Jane", "jane@example.com"));
        assert_eq!(commit.email(), "jane@example.com");

        let commit = Commit::new("abc", Identity::new("Jane", "a@example.com"), "msg")
            .with_committer(Identity::new("Jane", "b@example.com"));
        assert_eq!(commit.email(), "a@example.com");
    }

    #[test]
    fn bot_requires_account() {
        let commit = Commit::new("abc", Identity::default(), "msg");
        assert!(!commit.is_bot());
        assert!(commit.with_account(Account::bot("dependabot[bot]")).is_bot());
    }
}
