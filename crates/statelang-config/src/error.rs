use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to parse state definition: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("invalid {field}: {message}")]
  InvalidField {
    field: &'static str,
    message: String,
  },
}
