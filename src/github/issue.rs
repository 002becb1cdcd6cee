use serde::Serialize;

use crate::issue::Issue;

/// Request body for `POST /repos/{owner}/{repo}/issues`. Empty bodies and
/// empty label lists are left out entirely.
#[derive(Debug, Serialize)]
pub struct IssuePayload<'a> {
  pub title: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub body: Option<&'a str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub labels: Option<&'a [String]>,
}

impl<'a> From<&'a Issue> for IssuePayload<'a> {
  fn from(issue: &'a Issue) -> Self {
    Self {
      title: &issue.title,
      body: issue.body.as_deref().filter(|b| !b.is_empty()),
      labels: issue.labels.as_deref().filter(|l| !l.is_empty()),
    }
  }
}
