use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Request, StatusCode};
use tracing::{debug, info};

use crate::config::{Config, RepoSlug};
use crate::error::{LoaderError, Result};
use crate::github::issue::IssuePayload;
use crate::issue::{CreatedIssue, Issue};

const AGENT: &str = "gh-issue-loader";
const GITHUB_JSON: &str = "application/vnd.github+json";

#[async_trait]
pub trait IssueClient: Send + Sync {
  /// Creates one issue. Failures are returned as-is, never retried.
  async fn create_issue(&self, repo: &RepoSlug, issue: &Issue) -> Result<CreatedIssue>;
}

pub struct GitHubClient {
  http: Client,
  token: String,
  api_url: String,
}

impl GitHubClient {
  pub fn new(config: &Config) -> Result<Self> {
    let http = Client::builder()
      .build()
      .map_err(|e| LoaderError::Config(format!("failed to build http client: {e}")))?;

    Ok(Self {
      http,
      token: config.token.clone(),
      api_url: config.api_url.clone(),
    })
  }

  pub fn issues_url(&self, repo: &RepoSlug) -> String {
    format!("{}/repos/{}/{}/issues", self.api_url, repo.owner, repo.name)
  }

  pub fn build_request(&self, repo: &RepoSlug, issue: &Issue) -> Result<Request> {
    let payload = IssuePayload::from(issue);
    let request = self
      .http
      .post(self.issues_url(repo))
      .header(AUTHORIZATION, format!("token {}", self.token))
      .header(ACCEPT, GITHUB_JSON)
      .header(CONTENT_TYPE, "application/json")
      .header(USER_AGENT, AGENT)
      .json(&payload)
      .build()?;
    Ok(request)
  }
}

#[async_trait]
impl IssueClient for GitHubClient {
  async fn create_issue(&self, repo: &RepoSlug, issue: &Issue) -> Result<CreatedIssue> {
    let request = self.build_request(repo, issue)?;
    info!("creating issue in {repo}: {issue}");

    let response = self.http.execute(request).await?;
    let status = response.status();
    let body = response.text().await?;
    debug!("github responded {status} ({} bytes)", body.len());

    parse_response(status, body)
  }
}

fn parse_response(status: StatusCode, body: String) -> Result<CreatedIssue> {
  if !status.is_success() {
    return Err(LoaderError::Api {
      status: status.as_u16(),
      body,
    });
  }
  Ok(serde_json::from_str(&body)?)
}
