use std::collections::HashMap;

use serde_json::Value;

use crate::error::{LoaderError, Result};
use crate::format::Format;

pub trait Decoder {
  fn format(&self) -> Format;

  /// Parses the whole document. The error is the parser's own message.
  fn decode(&self, content: &str) -> std::result::Result<Value, String>;
}

pub struct JsonDecoder;

impl Decoder for JsonDecoder {
  fn format(&self) -> Format {
    Format::Json
  }

  fn decode(&self, content: &str) -> std::result::Result<Value, String> {
    serde_json::from_str(content).map_err(|e| e.to_string())
  }
}

#[cfg(feature = "yaml")]
pub struct YamlDecoder;

#[cfg(feature = "yaml")]
impl Decoder for YamlDecoder {
  fn format(&self) -> Format {
    Format::Yaml
  }

  fn decode(&self, content: &str) -> std::result::Result<Value, String> {
    let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
    Ok(yaml_to_json(value))
  }
}

/// Folds a YAML tree into the JSON value model. Non-string keys are
/// stringified, tags are dropped, and floats JSON cannot hold become null.
#[cfg(feature = "yaml")]
fn yaml_to_json(value: serde_yaml::Value) -> Value {
  use serde_yaml::Value as Yaml;

  match value {
    Yaml::Null => Value::Null,
    Yaml::Bool(b) => Value::Bool(b),
    Yaml::Number(n) => {
      if let Some(i) = n.as_i64() {
        Value::from(i)
      } else if let Some(u) = n.as_u64() {
        Value::from(u)
      } else {
        n.as_f64()
          .and_then(serde_json::Number::from_f64)
          .map_or(Value::Null, Value::Number)
      }
    }
    Yaml::String(s) => Value::String(s),
    Yaml::Sequence(seq) => Value::Array(seq.into_iter().map(yaml_to_json).collect()),
    Yaml::Mapping(map) => Value::Object(
      map
        .into_iter()
        .map(|(k, v)| (yaml_key(k), yaml_to_json(v)))
        .collect(),
    ),
    Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
  }
}

#[cfg(feature = "yaml")]
fn yaml_key(key: serde_yaml::Value) -> String {
  use serde_yaml::Value as Yaml;

  match key {
    Yaml::String(s) => s,
    Yaml::Null => "null".to_string(),
    Yaml::Bool(b) => b.to_string(),
    Yaml::Number(n) => n.to_string(),
    other => serde_yaml::to_string(&other)
      .map(|s| s.trim_end().to_string())
      .unwrap_or_default(),
  }
}

/// Decoders keyed by format. A format with no decoder registered is a
/// missing dependency, reported when a file actually needs it.
pub struct DecoderRegistry {
  decoders: HashMap<Format, Box<dyn Decoder>>,
}

impl DecoderRegistry {
  pub fn empty() -> Self {
    Self {
      decoders: HashMap::new(),
    }
  }

  pub fn with_defaults() -> Self {
    let mut registry = Self::empty();
    registry.register(Box::new(JsonDecoder));
    #[cfg(feature = "yaml")]
    registry.register(Box::new(YamlDecoder));
    registry
  }

  /// Replaces any decoder already registered for the same format.
  pub fn register(&mut self, decoder: Box<dyn Decoder>) {
    self.decoders.insert(decoder.format(), decoder);
  }

  pub fn get(&self, format: Format) -> Result<&dyn Decoder> {
    self
      .decoders
      .get(&format)
      .map(|d| &**d)
      .ok_or_else(|| LoaderError::Dependency(missing_decoder_message(format)))
  }
}

fn missing_decoder_message(format: Format) -> String {
  match format {
    Format::Yaml => "YAML support is required to parse YAML files. \
       Reinstall with: cargo install gh-issue-loader --features yaml"
      .to_string(),
    Format::Json => "no JSON decoder is registered".to_string(),
  }
}
