use std::fmt;
use std::future::Future;

use crate::commit::{Commit, Identity};
use crate::email::is_valid_email;
use crate::signoff::{extract_signoffs, Signoff};

/// Why a commit failed the DCO check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Sign-off is required but the message has no `Signed-off-by` line.
    MissingSignoff,

    /// Sign-off is not required for this author, but then the commit must
    /// carry a verified signature, and it does not.
    Unverified,

    /// The commit email is not a syntactically valid address.
    InvalidEmail(String),

    /// The only sign-off does not identify the author or committer.
    Mismatch {
        /// Identity the sign-off should have named.
        expected: Identity,
        /// Sign-off found in the message.
        found: Signoff,
    },

    /// None of several sign-offs identify the author or committer.
    NotFound {
        /// Identity one of the sign-offs should have named.
        expected: Identity,
        /// Sign-offs found in the message, in order.
        found: Vec<Signoff>,
    },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::MissingSignoff => f.write_str("The sign-off is missing."),
            FailureReason::Unverified => {
                f.write_str("Commit by organization member is not verified.")
            }
            FailureReason::InvalidEmail(email) => {
                write!(f, "{email} is not a valid email address.")
            }
            FailureReason::Mismatch { expected, found } => {
                write!(f, "Expected \"{expected}\", but got \"{found}\".")
            }
            FailureReason::NotFound { expected, found } => {
                write!(f, "Can not find \"{expected}\", in [")?;
                for (index, signoff) in found.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "\"{signoff}\"")?;
                }
                f.write_str("].")
            }
        }
    }
}

/// A commit that failed the DCO check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    /// Commit SHA
    pub sha: String,
    /// Link to the commit within the pull request.
    pub url: String,
    /// Author display name
    pub author: String,
    /// Committer display name
    pub committer: String,
    /// What went wrong.
    pub reason: FailureReason,
}

impl FailureRecord {
    fn new(commit: &Commit, base_url: &str, reason: FailureReason) -> Self {
        Self {
            sha: commit.sha.clone(),
            url: format!("{}/commits/{}", base_url.trim_end_matches('/'), commit.sha),
            author: commit.author.name.clone(),
            committer: commit.committer.name.clone(),
            reason,
        }
    }

    /// Human readable explanation of the failure.
    pub fn message(&self) -> String {
        self.reason.to_string()
    }
}

/// Check every commit for a valid DCO sign-off.
///
/// `is_required_for` is called with the platform login of each commit author
/// and decides whether that author must sign off. Commits without a linked
/// account always require a sign-off. An author who does not need to sign off
/// must instead push verified commits.
///
/// Merge commits and commits by bots are never reported. The returned records
/// follow the order of `commits`, at most one per commit.
///
/// An error from `is_required_for` aborts the check and is returned as-is.
pub async fn validate<F, Fut, E>(
    commits: &[Commit],
    mut is_required_for: F,
    base_url: &str,
) -> Result<Vec<FailureRecord>, E>
where
    F: FnMut(&str) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    let mut failed = Vec::new();

    for commit in commits {
        let required = match &commit.account {
            Some(account) => is_required_for(account.login.as_str()).await?,
            None => true,
        };

        if commit.is_merge() {
            tracing::trace!(sha = %commit.sha, "Skipping merge commit");
            continue;
        }

        if !required && commit.verified {
            tracing::trace!(sha = %commit.sha, "Skipping verified commit");
            continue;
        }

        if commit.is_bot() {
            tracing::trace!(sha = %commit.sha, "Skipping commit by bot");
            continue;
        }

        if let Some(reason) = check_commit(commit, required) {
            tracing::debug!(sha = %commit.sha, %reason, "Commit failed DCO check");
            failed.push(FailureRecord::new(commit, base_url, reason));
        }
    }

    Ok(failed)
}

fn check_commit(commit: &Commit, required: bool) -> Option<FailureReason> {
    let signoffs = extract_signoffs(&commit.message);

    match signoffs.as_slice() {
        [] if required => Some(FailureReason::MissingSignoff),
        [] if !commit.verified => Some(FailureReason::Unverified),
        [] => None,
        [signoff] => {
            let email = commit.email();
            if !is_valid_email(email) {
                return Some(FailureReason::InvalidEmail(email.to_owned()));
            }

            (!signoff.matches(commit)).then(|| FailureReason::Mismatch {
                expected: commit.author.clone(),
                found: signoff.clone(),
            })
        }
        many => {
            let any_match = many.iter().any(|signoff| signoff.matches(commit));
            (!any_match).then(|| FailureReason::NotFound {
                expected: commit.author.clone(),
                found: many.to_vec(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> Identity {
        Identity::new("Jane Doe", "jane@example.com")
    }

    #[test]
    fn not_found_lists_every_signoff() {
        let reason = FailureReason::NotFound {
            expected: jane(),
            found: vec![
                Signoff {
                    name: "A".into(),
                    email: "a@example.com".into(),
                },
                Signoff {
                    name: "B".into(),
                    email: "b@example.com".into(),
                },
            ],
        };

        assert_eq!(
            reason.to_string(),
            r#"Can not find "Jane Doe <jane@example.com>", in ["A <a@example.com>", "B <b@example.com>"]."#
        );
    }

    #[test]
    fn invalid_email_message() {
        let reason = FailureReason::InvalidEmail("jane@".into());
        assert_eq!(reason.to_string(), "jane@ is not a valid email address.");
    }

    #[test]
    fn record_url_joins_base() {
        let commit = Commit::new("deadbeef", jane(), "msg");
        let record = FailureRecord::new(
            &commit,
            "https://github.com/o/r/pull/1/",
            FailureReason::MissingSignoff,
        );
        assert_eq!(record.url, "https://github.com/o/r/pull/1/commits/deadbeef");
        assert_eq!(record.message(), "The sign-off is missing.");
    }

    #[test]
    fn invalid_email_only_checked_for_single_signoff() {
        let commit = Commit::new("abc", Identity::new("Jane Doe", "not-an-email"), "fix")
            .with_verified(false);
        assert_eq!(
            check_commit(&commit, true),
            Some(FailureReason::MissingSignoff)
        );

        let commit = Commit::new(
            "abc",
            Identity::new("Jane Doe", "not-an-email"),
            "fix\n\nSigned-off-by: Jane Doe <not-an-email>",
        );
        assert_eq!(
            check_commit(&commit, true),
            Some(FailureReason::InvalidEmail("not-an-email".into()))
        );

        let commit = Commit::new(
            "abc",
            Identity::new("Jane Doe", "not-an-email"),
            "fix\n\nSigned-off-by: Jane Doe <not-an-email>\nSigned-off-by: X <x@example.com>",
        );
        assert_eq!(check_commit(&commit, true), None);
    }
}
