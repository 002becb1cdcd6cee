use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::config::RepoSlug;
use crate::error::Result;
use crate::format;
use crate::github::client::IssueClient;
use crate::issue::normalize::normalize;
use crate::issue::Issue;

/// Decodes and validates the whole file. Nothing is submitted unless every
/// record is valid.
pub fn load(path: &Path) -> Result<Vec<Issue>> {
  let decoded = format::decode(path)?;
  let issues = normalize(&decoded.value)?;
  info!("loaded {} issue(s) from {}", issues.len(), path.display());
  Ok(issues)
}

/// Creates every issue in file order, writing one confirmation line each.
///
/// The first failed submission ends the run: issues already created stay
/// created and the rest are never sent.
pub async fn run(
  client: &dyn IssueClient,
  repo: &RepoSlug,
  path: &Path,
  out: &mut dyn Write,
) -> Result<usize> {
  let issues = load(path)?;

  for issue in &issues {
    let created = client.create_issue(repo, issue).await?;
    writeln!(out, "{}", created.confirmation())?;
  }

  info!("created {} issue(s) in {repo}", issues.len());
  Ok(issues.len())
}

/// Dry run: validates the file and lists what would be created.
pub fn plan(path: &Path, out: &mut dyn Write) -> Result<usize> {
  let issues = load(path)?;
  for issue in &issues {
    writeln!(out, "Would create issue: {issue}")?;
  }
  Ok(issues.len())
}
