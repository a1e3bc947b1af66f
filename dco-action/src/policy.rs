use std::collections::HashSet;

/// Decides which authors must sign off their commits.
///
/// Everybody must, except the configured exempt logins. Github logins are
/// case-insensitive, and so is the comparison.
#[derive(Debug, Clone, Default)]
pub(crate) struct SignoffPolicy {
    exempt: HashSet<String>,
}

impl SignoffPolicy {
    pub(crate) fn new<I, S>(exempt: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            exempt: exempt
                .into_iter()
                .map(|login| login.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub(crate) fn is_required_for(&self, login: &str) -> bool {
        !self.exempt.contains(&login.to_lowercase())
    }
}
