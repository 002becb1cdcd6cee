use crate::error::{LoaderError, Result};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Target repository in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
  pub owner: String,
  pub name: String,
}

impl RepoSlug {
  pub fn parse(s: &str) -> Result<Self> {
    match s.split_once('/') {
      Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
        Ok(Self {
          owner: owner.to_string(),
          name: name.to_string(),
        })
      }
      _ => Err(LoaderError::Config(format!(
        "repo must be in owner/name format: {s}"
      ))),
    }
  }
}

impl std::fmt::Display for RepoSlug {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}/{}", self.owner, self.name)
  }
}

#[derive(Clone)]
pub struct Config {
  pub token: String,
  pub repo: RepoSlug,
  pub api_url: String,
}

impl Config {
  pub fn new(token: &str, repo: &str, api_url: &str) -> Result<Self> {
    let config = Config {
      token: token.to_string(),
      repo: RepoSlug::parse(repo)?,
      api_url: api_url.trim_end_matches('/').to_string(),
    };
    config.validate()?;
    Ok(config)
  }

  fn validate(&self) -> Result<()> {
    if self.token.trim().is_empty() {
      return Err(LoaderError::Config("token must not be empty".into()));
    }
    if !(self.api_url.starts_with("https://") || self.api_url.starts_with("http://")) {
      return Err(LoaderError::Config(format!(
        "api url must start with http:// or https://: {}",
        self.api_url
      )));
    }
    Ok(())
  }
}

// Keeps the token out of logs.
impl std::fmt::Debug for Config {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Config")
      .field("token", &"***")
      .field("repo", &self.repo)
      .field("api_url", &self.api_url)
      .finish()
  }
}
