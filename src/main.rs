mod batch;
mod config;
mod error;
mod format;
mod github;
mod issue;

use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::github::client::GitHubClient;

#[derive(Parser)]
#[command(
  name = "gh-issue-loader",
  about = "Create GitHub issues from a JSON or YAML file"
)]
struct Cli {
  /// GitHub token
  #[arg(long)]
  token: String,

  /// Path to issues JSON/YAML file
  #[arg(long)]
  file: PathBuf,

  /// Target repository in owner/name format (e.g. octocat/hello-world)
  #[arg(long)]
  repo: String,

  /// GitHub API base URL
  #[arg(long, default_value = config::DEFAULT_API_URL)]
  api_url: String,

  /// Validate the file and list the issues without creating them
  #[arg(long)]
  dry_run: bool,
}

const DEFAULT_LOG_FILTER: &str = "warn";

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
    )
    .init();

  let cli = Cli::parse();

  if let Err(e) = run(cli).await {
    eprintln!("Error: {}", e.chain());
    std::process::exit(1);
  }
}

async fn run(cli: Cli) -> Result<()> {
  let config = Config::new(&cli.token, &cli.repo, &cli.api_url)?;
  debug!("{config:?}");

  let mut stdout = std::io::stdout();

  if cli.dry_run {
    let count = batch::plan(&cli.file, &mut stdout)?;
    info!("dry run: {count} issue(s) would be created in {}", config.repo);
    return Ok(());
  }

  let client = GitHubClient::new(&config)?;
  batch::run(&client, &config.repo, &cli.file, &mut stdout).await?;

  Ok(())
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_default_log_filter_is_quiet() {
    let filter = tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER);
    assert_eq!(filter.max_level_hint(), Some(tracing::level_filters::LevelFilter::WARN));
  }

  #[test]
  fn test_cli_definition() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_cli_requires_all_flags() {
    assert!(Cli::try_parse_from(["gh-issue-loader", "--token", "t", "--repo", "o/r"]).is_err());

    let cli = Cli::try_parse_from([
      "gh-issue-loader",
      "--token",
      "t",
      "--file",
      "issues.yaml",
      "--repo",
      "o/r",
    ])
    .unwrap();
    assert_eq!(cli.file, PathBuf::from("issues.yaml"));
    assert_eq!(cli.api_url, config::DEFAULT_API_URL);
    assert!(!cli.dry_run);
  }
}
