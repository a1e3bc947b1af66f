//! List the commits between two revisions of a repository using the Github API.
//!
//! Run with: GITHUB_TOKEN=... cargo run -p octocat --example compare -- octo/repo main feature

use eyre::{eyre, WrapErr as _};
use octocat::{GithubClient, Repository, Token};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let (Some(repository), Some(base), Some(head)) = (args.next(), args.next(), args.next())
    else {
        return Err(eyre!("usage: compare <owner/repo> <base> <head>"));
    };

    let repository: Repository = repository.parse()?;
    let token = Token::from(std::env::var("GITHUB_TOKEN").wrap_err("GITHUB_TOKEN is not set")?);

    let client = GithubClient::new("https://api.github.com", token);
    let comparison = client
        .compare(&repository, &base, &head)
        .await
        .wrap_err("Comparing commits")?;

    for commit in &comparison.commits {
        let summary = commit.commit.message.lines().next().unwrap_or_default();
        println!("{} {}", &commit.sha[..7.min(commit.sha.len())], summary);
    }

    Ok(())
}
