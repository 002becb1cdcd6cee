pub mod registry;

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::{LoaderError, Result};
use crate::format::registry::DecoderRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
  Json,
  Yaml,
}

impl Format {
  /// Format implied by the file extension, if it is one we recognise.
  pub fn from_path(path: &Path) -> Option<Format> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
      "json" => Some(Format::Json),
      "yaml" | "yml" => Some(Format::Yaml),
      _ => None,
    }
  }
}

impl std::fmt::Display for Format {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Format::Json => write!(f, "JSON"),
      Format::Yaml => write!(f, "YAML"),
    }
  }
}

/// Untyped tree read from an issues file, plus the parser that produced it.
#[derive(Debug)]
pub struct Decoded {
  pub format: Format,
  pub value: Value,
}

pub fn decode(path: &Path) -> Result<Decoded> {
  decode_with(&DecoderRegistry::with_defaults(), path)
}

/// Recognised extensions pick exactly one parser. Anything else is tried as
/// JSON first and falls back to YAML only on a JSON parse error.
pub fn decode_with(registry: &DecoderRegistry, path: &Path) -> Result<Decoded> {
  let content = std::fs::read_to_string(path)?;
  debug!("read {} bytes from {}", content.len(), path.display());

  let decoded = match Format::from_path(path) {
    Some(format) => parse(registry, format, path, &content)?,
    None => match parse(registry, Format::Json, path, &content) {
      Ok(decoded) => decoded,
      Err(LoaderError::Format { message, .. }) => {
        debug!("{} is not JSON ({message}), trying YAML", path.display());
        parse(registry, Format::Yaml, path, &content)?
      }
      Err(e) => return Err(e),
    },
  };

  info!("decoded {} as {}", path.display(), decoded.format);
  Ok(decoded)
}

fn parse(registry: &DecoderRegistry, format: Format, path: &Path, content: &str) -> Result<Decoded> {
  let decoder = registry.get(format)?;
  let value = decoder
    .decode(content)
    .map_err(|message| LoaderError::Format {
      path: path.to_path_buf(),
      format,
      message,
    })?;
  Ok(Decoded { format, value })
}

#[cfg(test)]
mod tests {
  use std::cell::Cell;
  use std::io::Write;
  use std::rc::Rc;

  use serde_json::json;
  use tempfile::{Builder, NamedTempFile};

  use super::*;
  use crate::format::registry::{Decoder, JsonDecoder};

  fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
    let mut tmp = Builder::new().suffix(suffix).tempfile().unwrap();
    tmp.write_all(content.as_bytes()).unwrap();
    tmp
  }

  /// Stands in for the YAML parser and counts how often it is asked.
  struct CountingYaml {
    calls: Rc<Cell<usize>>,
  }

  impl Decoder for CountingYaml {
    fn format(&self) -> Format {
      Format::Yaml
    }

    fn decode(&self, _content: &str) -> std::result::Result<Value, String> {
      self.calls.set(self.calls.get() + 1);
      Ok(json!([{ "title": "from yaml" }]))
    }
  }

  fn counting_registry() -> (DecoderRegistry, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let mut registry = DecoderRegistry::empty();
    registry.register(Box::new(JsonDecoder));
    registry.register(Box::new(CountingYaml {
      calls: calls.clone(),
    }));
    (registry, calls)
  }

  #[test]
  fn test_format_from_path() {
    assert_eq!(Format::from_path(Path::new("a.json")), Some(Format::Json));
    assert_eq!(Format::from_path(Path::new("a.YML")), Some(Format::Yaml));
    assert_eq!(Format::from_path(Path::new("a.Yaml")), Some(Format::Yaml));
    assert_eq!(Format::from_path(Path::new("a.txt")), None);
    assert_eq!(Format::from_path(Path::new("issues")), None);
  }

  #[test]
  fn test_decode_json_extension() {
    let tmp = write_temp(".json", r#"[{"title": "Bug"}]"#);
    let decoded = decode(tmp.path()).unwrap();
    assert_eq!(decoded.format, Format::Json);
    assert_eq!(decoded.value, json!([{ "title": "Bug" }]));
  }

  #[test]
  fn test_yml_extension_uses_yaml_even_for_json_content() {
    let (registry, calls) = counting_registry();
    let tmp = write_temp(".yml", r#"[{"title": "Bug"}]"#);

    let decoded = decode_with(&registry, tmp.path()).unwrap();
    assert_eq!(decoded.format, Format::Yaml);
    assert_eq!(calls.get(), 1);
  }

  #[test]
  fn test_unknown_extension_valid_json_skips_yaml() {
    let (registry, calls) = counting_registry();
    let tmp = write_temp(".txt", r#"[{"title": "Bug"}]"#);

    let decoded = decode_with(&registry, tmp.path()).unwrap();
    assert_eq!(decoded.format, Format::Json);
    assert_eq!(decoded.value, json!([{ "title": "Bug" }]));
    assert_eq!(calls.get(), 0);
  }

  #[test]
  fn test_unknown_extension_falls_back_to_yaml() {
    let (registry, calls) = counting_registry();
    let tmp = write_temp(".txt", "- title: Bug\n");

    let decoded = decode_with(&registry, tmp.path()).unwrap();
    assert_eq!(decoded.format, Format::Yaml);
    assert_eq!(calls.get(), 1);
  }

  #[test]
  fn test_invalid_json_reports_path_and_format() {
    let tmp = write_temp(".json", "[{\"title\": ");
    let err = decode(tmp.path()).unwrap_err();
    match err {
      LoaderError::Format { path, format, .. } => {
        assert_eq!(path, tmp.path());
        assert_eq!(format, Format::Json);
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn test_missing_yaml_decoder_is_dependency_error() {
    let mut registry = DecoderRegistry::empty();
    registry.register(Box::new(JsonDecoder));

    let tmp = write_temp(".yaml", "- title: Bug\n");
    let err = decode_with(&registry, tmp.path()).unwrap_err();
    assert!(matches!(err, LoaderError::Dependency(_)));

    let tmp = write_temp(".txt", "- title: Bug\n");
    let err = decode_with(&registry, tmp.path()).unwrap_err();
    assert!(matches!(err, LoaderError::Dependency(_)));
  }

  #[test]
  fn test_missing_file_is_io_error() {
    let err = decode(Path::new("/nonexistent/issues.json")).unwrap_err();
    assert!(matches!(err, LoaderError::Io(_)));
  }

  #[cfg(feature = "yaml")]
  #[test]
  fn test_decode_yaml_file() {
    let tmp = write_temp(
      ".yaml",
      "- title: Bug\n  description: fix it\n  labels: [bug, p1]\n",
    );
    let decoded = decode(tmp.path()).unwrap();
    assert_eq!(decoded.format, Format::Yaml);
    assert_eq!(
      decoded.value,
      json!([{ "title": "Bug", "description": "fix it", "labels": ["bug", "p1"] }])
    );
  }

  #[cfg(feature = "yaml")]
  #[test]
  fn test_unknown_extension_invalid_everywhere_reports_yaml() {
    let tmp = write_temp(".txt", "title: [unclosed\n");
    let err = decode(tmp.path()).unwrap_err();
    assert!(matches!(
      err,
      LoaderError::Format {
        format: Format::Yaml,
        ..
      }
    ));
  }
}
