//! Error types for data-flow processing.

use statelang_path::PathError;
use thiserror::Error;

/// Broad classification of a [`DataFlowError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// The state definition names a path that cannot be used.
  InvalidPath,
  /// The documents could not be processed.
  Generic,
}

/// Errors that can occur while computing effective input or output.
#[derive(Debug, Error)]
pub enum DataFlowError {
  /// A path is malformed or does not resolve to exactly one node.
  #[error("invalid path '{path}': {message}")]
  InvalidPath { path: String, message: String },

  /// A document failed to parse or could not be modified.
  #[error("{message}")]
  Generic { message: String },
}

impl DataFlowError {
  pub(crate) fn invalid_path(path: &str, message: impl Into<String>) -> Self {
    DataFlowError::InvalidPath {
      path: path.to_string(),
      message: message.into(),
    }
  }

  pub(crate) fn generic(message: impl Into<String>) -> Self {
    DataFlowError::Generic {
      message: message.into(),
    }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      DataFlowError::InvalidPath { .. } => ErrorKind::InvalidPath,
      DataFlowError::Generic { .. } => ErrorKind::Generic,
    }
  }
}

impl From<PathError> for DataFlowError {
  fn from(e: PathError) -> Self {
    match e {
      PathError::Syntax { path, message } | PathError::NotFound { path, message } => {
        DataFlowError::InvalidPath { path, message }
      }
    }
  }
}
