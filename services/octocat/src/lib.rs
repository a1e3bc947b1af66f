//! Simple client for the parts of the Github API used to check pull requests.

use bytes::Bytes;
use http::header::{self, HeaderName, HeaderValue};
use http_body_util::BodyExt as _;
use hyperdriver::client::conn::transport::tcp::TcpTransportConfig;
use hyperdriver::service::{ServiceExt, SharedService};
use hyperdriver::{Body, Client};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tower_http::set_header::SetRequestHeaderLayer;

mod config;
pub mod models;

pub use crate::config::{ActionConfig, ConfigError, EventError, EventErrorKind, Repository, Token};
use crate::models::Comparison;

const CONNECT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);
const TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);
const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";
const GITHUB_API_VERSION_HEADER: &str = "x-github-api-version";
const USER_AGENT: &str = "dco-action/0.9.0";
const COMPARE_PAGE_SIZE: usize = 100;

/// Errors that can occur when using the Github client.
#[derive(Debug, Error)]
pub enum Error {
    /// An error that occurs when sending a request.
    #[error("Sending request: {0}")]
    Request(#[from] hyperdriver::client::Error),

    /// The request could not be built, usually because of an invalid URL.
    #[error("Building request: {0}")]
    Http(#[from] http::Error),

    /// The token can not be sent as a header.
    #[error("Authorization header: {0}")]
    Header(#[from] http::header::InvalidHeaderValue),

    /// An error that occurs when serializing or deserializing a model.
    #[error("Model: {0}")]
    Serde(#[from] serde_json::Error),

    /// A response not in the 200-299 range.
    #[error("Response: {0}")]
    Response(#[from] ResponseError),

    /// An error that occurs when receiving a response body.
    #[error("Receiving body: {0}")]
    Body(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// An error that occurs when a response is not successful.
#[derive(Debug, Clone, Error)]
#[error("Response error: {status:?} {body}")]
pub struct ResponseError {
    status: http::StatusCode,
    body: String,
}

impl ResponseError {
    async fn from_response(response: http::Response<Body>) -> Self {
        let status = response.status();
        let body = read_body(response)
            .await
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default();
        Self { status, body }
    }

    /// HTTP status of the response.
    pub fn status(&self) -> http::StatusCode {
        self.status
    }
}

async fn read_body(response: http::Response<Body>) -> Result<Bytes, Error> {
    let collected = response
        .into_body()
        .collect()
        .await
        .map_err(|err| Error::Body(err.into()))?;
    Ok(collected.to_bytes())
}

/// A Github client that makes token authenticated requests against the Github API.
#[derive(Debug, Clone)]
pub struct GithubClient {
    api: String,
    token: Token,
    client: hyperdriver::client::SharedClientService<Body, Body>,
}

impl GithubClient {
    /// Create a new Github client for the API at `api_url`.
    pub fn new<U: Into<String>>(api_url: U, token: Token) -> Self {
        let mut tcp = TcpTransportConfig::default();
        tcp.connect_timeout = Some(CONNECT_TIMEOUT);

        let client = Client::builder()
            .with_tcp(tcp)
            .with_auto_http()
            .with_user_agent(USER_AGENT.to_owned())
            .with_timeout(TIMEOUT)
            .build_service();

        Self::with_service(api_url, token, client)
    }

    /// Create a Github client from the action configuration.
    pub fn from_config(config: &ActionConfig) -> Self {
        Self::new(config.api_url.clone(), config.token.clone())
    }

    /// Create a Github client which sends requests through `service`.
    pub fn with_service<U, S>(api_url: U, token: Token, service: S) -> Self
    where
        U: Into<String>,
        S: tower::Service<
                http::Request<Body>,
                Response = http::Response<Body>,
                Error = hyperdriver::client::Error,
            > + Clone
            + Send
            + Sync
            + 'static,
        S::Future: Send + 'static,
    {
        let client = tower::ServiceBuilder::new()
            .layer(SharedService::layer())
            .layer(SetRequestHeaderLayer::if_not_present(
                header::ACCEPT,
                HeaderValue::from_static(GITHUB_ACCEPT),
            ))
            .layer(SetRequestHeaderLayer::if_not_present(
                HeaderName::from_static(GITHUB_API_VERSION_HEADER),
                HeaderValue::from_static(GITHUB_API_VERSION),
            ))
            .service(service);

        let api = api_url.into().trim_end_matches('/').to_owned();

        Self { api, token, client }
    }

    /// Send an authenticated GET request to `endpoint` and decode the JSON response.
    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, Error> {
        let req = http::Request::get(format!("{}/{}", self.api, endpoint))
            .header(header::AUTHORIZATION, self.token.bearer()?)
            .body(Body::empty())?;

        let resp = self.client.clone().oneshot(req).await?;

        if !resp.status().is_success() {
            let error = ResponseError::from_response(resp).await;
            return Err(Error::Response(error));
        }

        let body = read_body(resp).await?;
        tracing::trace!(%endpoint, bytes = body.len(), "Got response");
        Ok(serde_json::from_slice(&body)?)
    }

    /// Compare two commits, returning every commit reachable from `head` but not from `base`.
    ///
    /// Github pages the commit list; all pages are fetched.
    #[tracing::instrument(skip(self))]
    pub async fn compare(
        &self,
        repository: &Repository,
        base: &str,
        head: &str,
    ) -> Result<Comparison, Error> {
        let endpoint = format!(
            "repos/{owner}/{name}/compare/{base}...{head}",
            owner = repository.owner,
            name = repository.name,
        );

        let mut page = 1;
        let mut comparison: Comparison = self
            .get(&format!("{endpoint}?per_page={COMPARE_PAGE_SIZE}&page={page}"))
            .await?;

        while comparison.commits.len() < comparison.total_commits {
            page += 1;
            let next: Comparison = self
                .get(&format!("{endpoint}?per_page={COMPARE_PAGE_SIZE}&page={page}"))
                .await?;

            if next.commits.is_empty() {
                tracing::warn!(
                    total = comparison.total_commits,
                    fetched = comparison.commits.len(),
                    "Comparison ended before all commits were listed"
                );
                break;
            }

            comparison.commits.extend(next.commits);
        }

        tracing::debug!(commits = comparison.commits.len(), "Compared {base}...{head}");
        Ok(comparison)
    }
}
