use std::{fmt, io, str::FromStr};

use camino::{Utf8Path, Utf8PathBuf};
use http::{header::InvalidHeaderValue, HeaderValue};
use serde::Deserialize;
use zeroize::Zeroize;

use crate::models::PullRequestEvent;

const DEFAULT_API_URL: &str = "https://api.github.com";

const TOKEN_INPUT: &str = "INPUT_GITHUB-TOKEN";
const TOKEN_VAR: &str = "GITHUB_TOKEN";
const API_URL_VAR: &str = "GITHUB_API_URL";
const REPOSITORY_VAR: &str = "GITHUB_REPOSITORY";
const EVENT_PATH_VAR: &str = "GITHUB_EVENT_PATH";
const EXEMPT_AUTHORS_INPUT: &str = "INPUT_EXEMPT-AUTHORS";

/// A Github API token.
///
/// Hidden from debug output and wiped from memory on drop.
#[derive(Clone, Deserialize)]
#[serde(from = "String")]
pub struct Token(String);

impl Token {
    /// Expose the underlying token.
    pub fn revealed(&self) -> &str {
        &self.0
    }

    /// The token as a sensitive `Authorization: Bearer` header value.
    pub fn bearer(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut header = HeaderValue::try_from(format!("Bearer {}", self.revealed()))?;
        header.set_sensitive(true);
        Ok(header)
    }
}

impl Drop for Token {
    fn drop(&mut self) {
        self.0.zeroize()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(****)")
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Token(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token(value.to_owned())
    }
}

/// A repository in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Repository {
    /// User or organization owning the repository.
    pub owner: String,
    /// Repository name.
    pub name: String,
}

impl FromStr for Repository {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Repository {
                    owner: owner.to_owned(),
                    name: name.to_owned(),
                })
            }
            _ => Err(ConfigError::InvalidRepository(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Repository {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Errors reading the action configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("Missing environment variable {0}")]
    Missing(&'static str),

    /// The repository is not in `owner/name` form.
    #[error("Invalid repository {0:?}, expected owner/name")]
    InvalidRepository(String),

    /// The event payload could not be read.
    #[error(transparent)]
    Event(#[from] EventError),
}

/// Reasons an event payload could not be read.
#[derive(Debug, thiserror::Error)]
pub enum EventErrorKind {
    /// Reading the file failed.
    #[error("IO: {0}")]
    Io(#[from] io::Error),

    /// The file is not a valid event payload.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The event payload at `path` could not be read.
#[derive(Debug, thiserror::Error)]
#[error("Reading event payload from {path}")]
pub struct EventError {
    path: Utf8PathBuf,
    source: EventErrorKind,
}

/// Configuration for the DCO check, as provided by Github Actions.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionConfig {
    /// Token used to call the Github API.
    pub token: Token,

    /// Base URL of the Github API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Repository the workflow runs in.
    pub repository: Repository,

    /// Path to the JSON payload of the triggering event.
    pub event_path: Utf8PathBuf,

    /// Logins that do not need to sign off, as long as their commits are verified.
    #[serde(default)]
    pub exempt_authors: Vec<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_owned()
}

impl ActionConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to
    /// its value. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let token = var(TOKEN_INPUT)
            .or_else(|| var(TOKEN_VAR))
            .ok_or(ConfigError::Missing(TOKEN_VAR))?;

        let repository: Repository = var(REPOSITORY_VAR)
            .ok_or(ConfigError::Missing(REPOSITORY_VAR))?
            .parse()?;

        let event_path: Utf8PathBuf = var(EVENT_PATH_VAR)
            .ok_or(ConfigError::Missing(EVENT_PATH_VAR))?
            .into();

        let exempt_authors: Vec<String> = var(EXEMPT_AUTHORS_INPUT)
            .map(|value| {
                value
                    .split([',', '\n'])
                    .map(str::trim)
                    .filter(|login| !login.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        let config = ActionConfig {
            token: token.into(),
            api_url: var(API_URL_VAR).unwrap_or_else(default_api_url),
            repository,
            event_path,
            exempt_authors,
        };

        tracing::debug!(
            repository = %config.repository,
            api = %config.api_url,
            event = %config.event_path,
            "Loaded action configuration"
        );

        Ok(config)
    }

    /// Read and decode the triggering event payload.
    pub fn load_event(&self) -> Result<PullRequestEvent, ConfigError> {
        Ok(read_event(&self.event_path)?)
    }
}

fn read_event(path: &Utf8Path) -> Result<PullRequestEvent, EventError> {
    let contents = std::fs::read_to_string(path).map_err(|err| EventError {
        path: path.to_path_buf(),
        source: err.into(),
    })?;

    serde_json::from_str(&contents).map_err(|err| EventError {
        path: path.to_path_buf(),
        source: err.into(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write as _;

    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let vars: HashMap<_, _> = vars.iter().copied().collect();
        move |key: &str| vars.get(key).map(|value| value.to_string())
    }

    #[test]
    fn token_hidden_debug() {
        let token = Token::from("ghs_secret");
        assert_eq!(format!("{token:?}"), "Token(****)");
        assert_eq!(token.revealed(), "ghs_secret");
        assert!(token.bearer().unwrap().is_sensitive());
    }

    #[test]
    fn parse_repository() {
        let repository: Repository = "octo/repo".parse().unwrap();
        assert_eq!(repository.owner, "octo");
        assert_eq!(repository.name, "repo");
        assert_eq!(repository.to_string(), "octo/repo");

        for invalid in ["octo", "/repo", "octo/", "octo/repo/extra"] {
            assert!(invalid.parse::<Repository>().is_err(), "{invalid}");
        }
    }

    #[test]
    fn config_from_lookup() {
        let config = ActionConfig::from_lookup(lookup(&[
            ("INPUT_GITHUB-TOKEN", "input-token"),
            ("GITHUB_TOKEN", "env-token"),
            ("GITHUB_REPOSITORY", "octo/repo"),
            ("GITHUB_EVENT_PATH", "/tmp/event.json"),
            ("INPUT_EXEMPT-AUTHORS", "alice, bob,,\ncarol"),
        ]))
        .unwrap();

        assert_eq!(config.token.revealed(), "input-token");
        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(config.repository.to_string(), "octo/repo");
        assert_eq!(config.event_path.as_str(), "/tmp/event.json");
        assert_eq!(config.exempt_authors, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn token_falls_back_to_environment() {
        let config = ActionConfig::from_lookup(lookup(&[
            ("INPUT_GITHUB-TOKEN", ""),
            ("GITHUB_TOKEN", "env-token"),
            ("GITHUB_REPOSITORY", "octo/repo"),
            ("GITHUB_EVENT_PATH", "/tmp/event.json"),
            ("GITHUB_API_URL", "https://ghe.example.com/api/v3"),
        ]))
        .unwrap();

        assert_eq!(config.token.revealed(), "env-token");
        assert_eq!(config.api_url, "https://ghe.example.com/api/v3");
        assert!(config.exempt_authors.is_empty());
    }

    #[test]
    fn missing_variables() {
        let err = ActionConfig::from_lookup(lookup(&[("GITHUB_REPOSITORY", "octo/repo")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("GITHUB_TOKEN")));

        let err = ActionConfig::from_lookup(lookup(&[
            ("GITHUB_TOKEN", "token"),
            ("GITHUB_REPOSITORY", "octo/repo"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("GITHUB_EVENT_PATH")));
    }

    #[test]
    fn load_event_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"pull_request": {{"number": 1, "html_url": "https://github.com/octo/repo/pull/1",
                "base": {{"ref": "main", "sha": "aaa"}}, "head": {{"ref": "topic", "sha": "bbb"}}}}}}"#
        )
        .unwrap();

        let config = ActionConfig {
            token: "token".into(),
            api_url: default_api_url(),
            repository: "octo/repo".parse().unwrap(),
            event_path: Utf8PathBuf::from_path_buf(file.path().to_owned()).unwrap(),
            exempt_authors: Vec::new(),
        };

        let event = config.load_event().unwrap();
        assert_eq!(event.pull_request.unwrap().head.reference, "topic");
    }

    #[test]
    fn load_event_reports_path() {
        let config = ActionConfig {
            token: "token".into(),
            api_url: default_api_url(),
            repository: "octo/repo".parse().unwrap(),
            event_path: "/nonexistent/event.json".into(),
            exempt_authors: Vec::new(),
        };

        let err = config.load_event().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Reading event payload from /nonexistent/event.json"
        );
    }
}
