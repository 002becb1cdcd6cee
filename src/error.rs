use std::path::PathBuf;

use crate::format::Format;

#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
  #[error("failed to parse {format} in {}: {message}", path.display())]
  Format {
    path: PathBuf,
    format: Format,
    message: String,
  },

  #[error("{0}")]
  Dependency(String),

  #[error("{0}")]
  Schema(#[from] SchemaError),

  #[error("network error: {0}")]
  Network(#[from] reqwest::Error),

  #[error("GitHub API error {status}: {body}")]
  Api { status: u16, body: String },

  #[error("config error: {0}")]
  Config(String),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}

/// A record that decoded fine but does not describe a valid issue.
///
/// Indexes are 1-based positions in the input list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
  #[error("issues file must be a list of issue objects")]
  NotAList,

  #[error("issue #{index} is not an object")]
  NotAnObject { index: usize },

  #[error("issue #{index} is missing a valid title")]
  MissingTitle { index: usize },

  #[error("issue #{index} description must be a string")]
  InvalidDescription { index: usize },

  #[error("issue #{index} labels must be a list of strings")]
  InvalidLabels { index: usize },
}

impl LoaderError {
  /// This error followed by each underlying cause that adds something new,
  /// e.g. the OS error behind a failed connection.
  pub fn chain(&self) -> String {
    let mut message = self.to_string();
    let mut source = std::error::Error::source(self);
    while let Some(cause) = source {
      let text = cause.to_string();
      if !message.contains(&text) {
        message.push_str(": ");
        message.push_str(&text);
      }
      source = cause.source();
    }
    message
  }
}

pub type Result<T> = std::result::Result<T, LoaderError>;
