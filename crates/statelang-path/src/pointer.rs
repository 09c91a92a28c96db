//! Write-side addressing.
//!
//! A [`Pointer`] is built from the restricted dotted grammar only: `$` or
//! `$.seg(.seg)*`. Dots are always separators; there is no bracket syntax and no
//! escaping, so a field whose name contains a dot cannot be addressed.

use std::fmt;

use crate::ROOT;
use crate::error::PathError;

/// An ordered sequence of reference tokens identifying a write location.
///
/// Tokens are untyped: a digits-only token addresses an array element when the
/// container met at runtime is an array, and an object member otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pointer {
  tokens: Vec<String>,
}

impl Pointer {
  /// The empty pointer, referring to the whole document.
  pub fn root() -> Self {
    Self::default()
  }

  /// Build a pointer directly from tokens.
  pub fn from_tokens<I, S>(tokens: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      tokens: tokens.into_iter().map(Into::into).collect(),
    }
  }

  /// Convert a dotted path expression into a pointer.
  pub fn from_path(path: &str) -> Result<Self, PathError> {
    if path == ROOT {
      return Ok(Self::root());
    }

    let fields = path
      .strip_prefix("$.")
      .filter(|rest| !rest.is_empty())
      .ok_or_else(|| {
        PathError::syntax(path, "expected '$' or '$.' followed by a field name")
      })?;

    Ok(Self::from_tokens(fields.split('.')))
  }

  pub fn tokens(&self) -> &[String] {
    &self.tokens
  }

  /// Interpret a token as an array index.
  ///
  /// Only plain ASCII digit strings qualify; signs, whitespace and values that
  /// overflow `usize` do not.
  pub fn index(token: &str) -> Option<usize> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
      return None;
    }
    token.parse().ok()
  }
}

/// Formats as an RFC 6901 JSON pointer, e.g. `/root/array/0`.
impl fmt::Display for Pointer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for token in &self.tokens {
      write!(f, "/{}", token.replace('~', "~0").replace('/', "~1"))?;
    }
    Ok(())
  }
}
