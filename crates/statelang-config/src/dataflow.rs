use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use statelang_path::{PATH_KEY_SUFFIX, Pointer, ROOT};

use crate::error::ConfigError;

/// The data-flow fields of a single state.
///
/// A path field that is absent defaults to `"$"`. A path field set to `null`
/// becomes the empty string, which tells the processors to discard the
/// corresponding document (`{}` for input and output, the task result for
/// `ResultPath`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataFlowDef {
  #[serde(
    default = "root_path",
    deserialize_with = "nullable_path",
    serialize_with = "serialize_nullable_path"
  )]
  pub input_path: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub parameters: Option<Map<String, Value>>,
  #[serde(
    default = "root_path",
    deserialize_with = "nullable_path",
    serialize_with = "serialize_nullable_path"
  )]
  pub result_path: String,
  #[serde(
    default = "root_path",
    deserialize_with = "nullable_path",
    serialize_with = "serialize_nullable_path"
  )]
  pub output_path: String,
}

impl Default for DataFlowDef {
  fn default() -> Self {
    Self {
      input_path: root_path(),
      parameters: None,
      result_path: root_path(),
      output_path: root_path(),
    }
  }
}

impl DataFlowDef {
  /// Parse the data-flow fields out of a state definition.
  pub fn from_json(text: &str) -> Result<Self, ConfigError> {
    Ok(serde_json::from_str(text)?)
  }

  /// The parameter template as JSON text, or `""` when the state has none.
  pub fn parameters_text(&self) -> String {
    self
      .parameters
      .as_ref()
      .map(|template| Value::Object(template.clone()).to_string())
      .unwrap_or_default()
  }

  /// Check the syntax of every path the processors will consume.
  pub fn validate(&self) -> Result<(), ConfigError> {
    check_read_path("InputPath", &self.input_path)?;
    check_read_path("OutputPath", &self.output_path)?;

    if !self.result_path.is_empty() {
      Pointer::from_path(&self.result_path).map_err(|e| ConfigError::InvalidField {
        field: "ResultPath",
        message: e.to_string(),
      })?;
    }

    if let Some(template) = &self.parameters {
      check_template(template)?;
    }
    Ok(())
  }
}

fn root_path() -> String {
  ROOT.to_string()
}

fn nullable_path<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn serialize_nullable_path<S>(path: &str, serializer: S) -> Result<S::Ok, S::Error>
where
  S: Serializer,
{
  if path.is_empty() {
    serializer.serialize_none()
  } else {
    serializer.serialize_str(path)
  }
}

fn check_read_path(field: &'static str, path: &str) -> Result<(), ConfigError> {
  if path.is_empty() || path.starts_with(ROOT) {
    return Ok(());
  }
  Err(ConfigError::InvalidField {
    field,
    message: format!("'{}' must start with '{}'", path, ROOT),
  })
}

fn check_template(template: &Map<String, Value>) -> Result<(), ConfigError> {
  for (key, value) in template {
    match value {
      Value::Object(nested) => check_template(nested)?,
      Value::String(path) if key.ends_with(PATH_KEY_SUFFIX) => check_read_path("Parameters", path)?,
      _ if key.ends_with(PATH_KEY_SUFFIX) => {
        return Err(ConfigError::InvalidField {
          field: "Parameters",
          message: format!("'{}' must map to a path string", key),
        });
      }
      _ => {}
    }
  }
  Ok(())
}
