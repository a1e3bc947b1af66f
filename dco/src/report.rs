//! Human readable reports for failed DCO checks.

use std::fmt;

use crate::validate::FailureRecord;

const CHECKOUT_HELP: &str = "To fix, first ensure you have a local copy of your branch by \
[checking out the pull request locally via command line]\
(https://help.github.com/en/github/collaborating-with-issues-and-pull-requests/checking-out-pull-requests-locally). \
Next, head to your local branch and run: ";

const SHORT_SHA_LENGTH: usize = 7;

/// Wrap `code` in a fenced markdown code block, optionally tagged with a
/// language for syntax highlighting.
pub fn create_code_block(code: &str, language: Option<&str>) -> String {
    format!("```{}\n{code}\n```", language.unwrap_or_default())
}

/// Instructions for fixing the sign-off on a pull request branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Remediation {
    /// Exactly one commit failed: amend it.
    SingleCommit {
        /// Branch to force-push
        reference: String,
    },

    /// Several commits failed: rebase the whole branch with sign-off.
    MultipleCommits {
        /// Branch to force-push
        reference: String,
        /// Number of commits in the pull request.
        total: usize,
        /// Number of commits that failed.
        failed: usize,
    },
}

impl Remediation {
    /// Pick the instructions matching the number of failed commits.
    ///
    /// Returns `None` when nothing failed.
    pub fn select<R: Into<String>>(reference: R, total: usize, failed: usize) -> Option<Self> {
        match failed {
            0 => None,
            1 => Some(Remediation::SingleCommit {
                reference: reference.into(),
            }),
            _ => Some(Remediation::MultipleCommits {
                reference: reference.into(),
                total,
                failed,
            }),
        }
    }

    fn reference(&self) -> &str {
        match self {
            Remediation::SingleCommit { reference } => reference,
            Remediation::MultipleCommits { reference, .. } => reference,
        }
    }
}

impl fmt::Display for Remediation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let push = create_code_block(
            &format!("git push --force-with-lease origin {}", self.reference()),
            Some("bash"),
        );

        match self {
            Remediation::SingleCommit { .. } => {
                let amend = create_code_block("git commit --amend --signoff", Some("bash"));
                write!(
                    f,
                    "You only have one commit incorrectly signed off! {CHECKOUT_HELP}\n{amend}\n\
                     Now your commits will have your sign off. Next run \n{push}"
                )
            }
            Remediation::MultipleCommits { total, failed, .. } => {
                let rebase =
                    create_code_block(&format!("git rebase HEAD~{total} --signoff"), Some("bash"));
                write!(
                    f,
                    "You have {failed} commits incorrectly signed off. {CHECKOUT_HELP}\n{rebase}\n \
                     Now your commits will have your sign off. Next run \n{push}"
                )
            }
        }
    }
}

impl fmt::Display for FailureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = self.sha.get(..SHORT_SHA_LENGTH).unwrap_or(&self.sha);
        write!(
            f,
            "Commit sha: [{short}]({}), Author: {}, Committer: {}; {}",
            self.url, self.author, self.committer, self.reason
        )
    }
}

/// A complete report: remediation instructions followed by one line per
/// failed commit.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    remediation: Option<Remediation>,
    failures: &'a [FailureRecord],
}

impl<'a> Report<'a> {
    /// Build a report for `failures` out of `total` commits on branch `reference`.
    pub fn new<R: Into<String>>(reference: R, total: usize, failures: &'a [FailureRecord]) -> Self {
        Self {
            remediation: Remediation::select(reference, total, failures.len()),
            failures,
        }
    }

    /// Did every commit pass?
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// The selected remediation, if anything failed.
    pub fn remediation(&self) -> Option<&Remediation> {
        self.remediation.as_ref()
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(remediation) = &self.remediation {
            write!(f, "{remediation}\n\n")?;
        }

        for (index, failure) in self.failures.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{failure}")?;
        }

        Ok(())
    }
}
