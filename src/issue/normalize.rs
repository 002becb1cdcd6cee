use serde_json::{Map, Value};
use tracing::debug;

use crate::error::SchemaError;
use crate::issue::Issue;

/// Validates decoded records and reshapes them into issues, in input order.
/// Stops at the first invalid record.
pub fn normalize(value: &Value) -> Result<Vec<Issue>, SchemaError> {
  let records = value.as_array().ok_or(SchemaError::NotAList)?;

  let mut issues = Vec::with_capacity(records.len());
  for (i, record) in records.iter().enumerate() {
    let index = i + 1;
    let fields = record
      .as_object()
      .ok_or(SchemaError::NotAnObject { index })?;
    let issue = normalize_record(index, fields)?;
    debug!("issue #{index}: {}", issue.title);
    issues.push(issue);
  }

  Ok(issues)
}

fn normalize_record(index: usize, fields: &Map<String, Value>) -> Result<Issue, SchemaError> {
  let title = match fields.get("title") {
    Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
    _ => return Err(SchemaError::MissingTitle { index }),
  };

  let body = match fields.get("description") {
    None | Some(Value::Null) => None,
    Some(Value::String(s)) => Some(s.trim())
      .filter(|s| !s.is_empty())
      .map(str::to_string),
    Some(_) => return Err(SchemaError::InvalidDescription { index }),
  };

  let labels = match fields.get("labels") {
    None | Some(Value::Null) => None,
    Some(Value::Array(items)) => Some(
      items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or(SchemaError::InvalidLabels { index })?,
    ),
    Some(_) => return Err(SchemaError::InvalidLabels { index }),
  };

  Ok(Issue {
    title,
    body,
    labels,
  })
}
