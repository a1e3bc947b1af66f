use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::commit::Commit;

static SIGNOFF_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^Signed-off-by: (.*?) <(.*?)>$").expect("sign-off pattern is valid")
});

/// A `Signed-off-by: Name <email>` declaration found in a commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signoff {
    /// Declared name
    pub name: String,
    /// Declared email
    pub email: String,
}

impl Signoff {
    /// Does this declaration identify the author or committer of `commit`?
    ///
    /// The name must match one of the two names and the email one of the two
    /// emails, ignoring case. Name and email may come from different identities.
    pub fn matches(&self, commit: &Commit) -> bool {
        let name = self.name.to_lowercase();
        let email = self.email.to_lowercase();

        let name_matches = [&commit.author.name, &commit.committer.name]
            .into_iter()
            .any(|candidate| candidate.to_lowercase() == name);
        let email_matches = [&commit.author.email, &commit.committer.email]
            .into_iter()
            .any(|candidate| candidate.to_lowercase() == email);

        name_matches && email_matches
    }
}

impl fmt::Display for Signoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// Extract every sign-off declaration from a commit message, in order.
///
/// Only whole lines count: a declaration embedded in a longer line, or
/// followed by anything after the closing `>`, is ignored.
pub fn extract_signoffs(message: &str) -> Vec<Signoff> {
    message
        .lines()
        .filter_map(|line| SIGNOFF_LINE.captures(line))
        .map(|captures| Signoff {
            name: captures[1].to_owned(),
            email: captures[2].to_owned(),
        })
        .collect()
}
