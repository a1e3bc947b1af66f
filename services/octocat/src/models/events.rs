//! Webhook event payloads, as delivered to Github Actions.

use serde::{Deserialize, Serialize};

/// The subset of an event payload the DCO check reads.
///
/// Any event can be decoded; `pull_request` is only present for
/// `pull_request` and `pull_request_target` events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestEvent {
    /// The pull request that triggered the event.
    #[serde(default)]
    pub pull_request: Option<PullRequest>,
}

/// A pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// Pull request number.
    pub number: u64,

    /// Link to the pull request on github.com.
    pub html_url: String,

    /// The branch the pull request merges into.
    pub base: GitRef,

    /// The branch the pull request merges from.
    pub head: GitRef,
}

/// A branch tip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitRef {
    /// Branch name.
    #[serde(rename = "ref")]
    pub reference: String,

    /// Commit at the tip of the branch.
    pub sha: String,
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn deserialize_pull_request_event() {
        let event: PullRequestEvent = serde_json::from_str(indoc! {r#"
            {
              "action": "synchronize",
              "number": 7,
              "pull_request": {
                "number": 7,
                "html_url": "https://github.com/octo/repo/pull/7",
                "base": { "ref": "main", "sha": "1111111111111111111111111111111111111111" },
                "head": { "ref": "feature/dco", "sha": "2222222222222222222222222222222222222222" }
              }
            }
        "#})
        .unwrap();

        let pull_request = event.pull_request.unwrap();
        assert_eq!(pull_request.number, 7);
        assert_eq!(pull_request.head.reference, "feature/dco");
        assert_eq!(pull_request.base.sha, "1".repeat(40));
    }

    #[test]
    fn deserialize_push_event() {
        let event: PullRequestEvent =
            serde_json::from_str(r#"{"ref": "refs/heads/main", "before": "0", "after": "1"}"#)
                .unwrap();
        assert!(event.pull_request.is_none());
    }
}
