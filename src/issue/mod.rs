pub mod normalize;

use serde::Deserialize;

/// A validated issue, ready to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
  pub title: String,
  pub body: Option<String>,
  pub labels: Option<Vec<String>>,
}

impl std::fmt::Display for Issue {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.title)
  }
}

/// The parts of GitHub's create-issue response we report back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreatedIssue {
  #[serde(default)]
  pub number: Option<u64>,
  #[serde(default)]
  pub html_url: Option<String>,
}

impl CreatedIssue {
  pub fn confirmation(&self) -> String {
    let number = self
      .number
      .map(|n| n.to_string())
      .unwrap_or_else(|| "?".to_string());
    let url = self.html_url.as_deref().unwrap_or("?");
    format!("Created issue #{number}: {url}")
  }
}
