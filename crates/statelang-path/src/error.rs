use thiserror::Error;

/// Errors raised while parsing or evaluating a path expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
  /// The path is not well-formed.
  #[error("invalid path syntax '{path}': {message}")]
  Syntax { path: String, message: String },

  /// The path is well-formed but cannot be followed through the document.
  #[error("path '{path}' not found: {message}")]
  NotFound { path: String, message: String },
}

impl PathError {
  pub(crate) fn syntax(path: &str, message: impl Into<String>) -> Self {
    PathError::Syntax {
      path: path.to_string(),
      message: message.into(),
    }
  }

  pub(crate) fn not_found(path: &str, message: impl Into<String>) -> Self {
    PathError::NotFound {
      path: path.to_string(),
      message: message.into(),
    }
  }

  /// The path expression this error refers to.
  pub fn path(&self) -> &str {
    match self {
      PathError::Syntax { path, .. } | PathError::NotFound { path, .. } => path,
    }
  }
}
