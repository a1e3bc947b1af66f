//! Conversion from Github API models to the commits the validator checks.

use octocat::models::commits::{Commit as GithubCommit, GitIdentity};
use octocat::models::{Account as GithubAccount, AccountType};

fn identity(identity: Option<GitIdentity>) -> dco::Identity {
    identity
        .map(|identity| dco::Identity::new(identity.name, identity.email))
        .unwrap_or_default()
}

fn account(account: GithubAccount) -> dco::Account {
    let kind = match account.kind {
        AccountType::Bot => dco::AccountKind::Bot,
        AccountType::Organization => dco::AccountKind::Organization,
        AccountType::User | AccountType::Unknown => dco::AccountKind::User,
    };

    dco::Account {
        login: account.login,
        kind,
    }
}

/// Convert a commit from a Github comparison.
pub(crate) fn commit(commit: GithubCommit) -> dco::Commit {
    dco::Commit {
        sha: commit.sha,
        account: commit.author.map(account),
        author: identity(commit.commit.author),
        committer: identity(commit.commit.committer),
        message: commit.commit.message,
        parents: commit.parents.len(),
        verified: commit.commit.verification.verified,
    }
}

#[cfg(test)]
mod tests {
    use octocat::models::commits::{CommitDetails, ParentCommit, Verification};

    use super::*;

    fn github_commit() -> GithubCommit {
        GithubCommit {
            sha: "abc".into(),
            commit: CommitDetails {
                author: Some(GitIdentity {
                    name: "Jane Doe".into(),
                    email: "jane@example.com".into(),
                    date: None,
                }),
                committer: None,
                message: "fix".into(),
                verification: Verification {
                    verified: true,
                    reason: Some("valid".into()),
                },
            },
            author: Some(GithubAccount {
                login: "renovate[bot]".into(),
                id: 2,
                kind: AccountType::Bot,
            }),
            parents: vec![
                ParentCommit { sha: "p1".into() },
                ParentCommit { sha: "p2".into() },
            ],
        }
    }

    #[test]
    fn converts_commit() {
        let converted = commit(github_commit());

        assert_eq!(converted.sha, "abc");
        assert_eq!(converted.author, dco::Identity::new("Jane Doe", "jane@example.com"));
        assert_eq!(converted.committer, dco::Identity::default());
        assert!(converted.is_bot());
        assert!(converted.is_merge());
        assert!(converted.verified);
        assert_eq!(converted.email(), "jane@example.com");
    }

    #[test]
    fn unlinked_author() {
        let mut github = github_commit();
        github.author = None;
        assert!(commit(github).account.is_none());
    }
}
