//! Github Action checking that every commit of a pull request is signed off
//! according to the Developer Certificate of Origin.
//!
//! Prints a report and exits with a failure status when a commit is missing a
//! valid `Signed-off-by` trailer.

use std::convert::Infallible;
use std::process::ExitCode;

use eyre::WrapErr as _;
use octocat::{ActionConfig, GithubClient};
use tracing_subscriber::EnvFilter;

mod github;
mod policy;

use self::policy::SignoffPolicy;

#[tokio::main]
async fn main() -> eyre::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ActionConfig::from_env().wrap_err("Loading action configuration")?;
    let event = config.load_event()?;

    let Some(pull_request) = event.pull_request else {
        tracing::info!("Not triggered by a pull request, nothing to check");
        return Ok(ExitCode::SUCCESS);
    };

    let client = GithubClient::from_config(&config);
    let comparison = client
        .compare(
            &config.repository,
            &pull_request.base.sha,
            &pull_request.head.sha,
        )
        .await
        .wrap_err_with(|| {
            format!(
                "Listing commits of {}#{}",
                config.repository, pull_request.number
            )
        })?;

    let commits: Vec<dco::Commit> = comparison
        .commits
        .into_iter()
        .map(github::commit)
        .collect();

    let policy = SignoffPolicy::new(&config.exempt_authors);
    let failed = dco::validate(
        &commits,
        |login| {
            let required = policy.is_required_for(login);
            async move { Ok::<_, Infallible>(required) }
        },
        &pull_request.html_url,
    )
    .await?;

    let report = dco::Report::new(pull_request.head.reference.as_str(), commits.len(), &failed);
    if report.is_success() {
        tracing::info!(commits = commits.len(), "All commits are signed off");
        return Ok(ExitCode::SUCCESS);
    }

    tracing::error!(
        commits = commits.len(),
        failed = failed.len(),
        "DCO check failed"
    );
    println!("{report}");
    Ok(ExitCode::FAILURE)
}
