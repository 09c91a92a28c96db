//! Read-side path evaluation.
//!
//! Queries are handed to `serde_json_path` (RFC 9535). Paths written in the
//! dotted form used by state definitions (`$.a.b.0`) are first rewritten into
//! bracket notation, which lets segment names carry characters the RFC
//! shorthand forbids and lets digit segments address both object members and
//! array elements.
//!
//! A singular path (one that names a single node, in any notation) whose last
//! segment is absent from an existing container reads as `null`.

use std::fmt;
use std::str::CharIndices;

use serde_json::Value;
use serde_json_path::JsonPath;
use tracing::trace;

use crate::error::PathError;
use crate::pointer::Pointer;
use crate::{ROOT, node_type};

/// Characters that mark a path as a full JSONPath query rather than the
/// dotted form.
const QUERY_SYNTAX: &[char] = &['[', ']', '*', '?', '@', '(', ')'];

/// Blank space allowed between query segments and inside brackets.
const BLANK: &[char] = &[' ', '\t', '\n', '\r'];

/// Largest index an RFC 9535 index selector may carry (I-JSON range).
const MAX_INDEX: u64 = (1 << 53) - 1;

/// Evaluates path expressions against JSON documents.
///
/// Implementations always return the matches as a list, even when exactly one
/// node matches, and never modify the document.
pub trait PathEvaluator: Send + Sync {
  fn evaluate(&self, document: &Value, path: &str) -> Result<Vec<Value>, PathError>;
}

/// Options for [`JsonPathEvaluator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorConfig {
  /// A singular path whose last segment is absent from an existing container
  /// reads as `[null]` instead of failing.
  pub leaf_to_null: bool,
}

impl Default for EvaluatorConfig {
  fn default() -> Self {
    Self { leaf_to_null: true }
  }
}

/// [`PathEvaluator`] backed by `serde_json_path`.
#[derive(Debug, Clone, Default)]
pub struct JsonPathEvaluator {
  config: EvaluatorConfig,
}

impl JsonPathEvaluator {
  pub fn new(config: EvaluatorConfig) -> Self {
    Self { config }
  }

  pub fn config(&self) -> &EvaluatorConfig {
    &self.config
  }

  fn query(&self, document: &Value, path: &str, query: &str) -> Result<Vec<Value>, PathError> {
    trace!(path, query, "evaluating path");
    let compiled = JsonPath::parse(query).map_err(|e| PathError::syntax(path, e.to_string()))?;
    Ok(compiled.query(document).all().into_iter().cloned().collect())
  }

  /// Decide what an unmatched singular path reads as.
  fn missing_leaf(
    &self,
    document: &Value,
    path: &str,
    segments: &[Segment],
  ) -> Result<Vec<Value>, PathError> {
    let Some((leaf, parents)) = segments.split_last() else {
      return Ok(Vec::new());
    };

    if !self.config.leaf_to_null {
      return Err(PathError::not_found(path, format!("no node matches '{}'", leaf)));
    }

    let parent = self.query(document, path, &render(parents))?;
    match (parent.as_slice(), leaf) {
      ([Value::Object(_)], Segment::Name(_) | Segment::Digits(..)) => Ok(vec![Value::Null]),
      ([Value::Array(_)], Segment::Index(_) | Segment::Digits(..)) => Ok(vec![Value::Null]),
      ([node], _) => Err(PathError::not_found(
        path,
        format!("'{}' can't be read from {}", leaf, node_type(node)),
      )),
      ([], _) => Err(PathError::not_found(
        path,
        format!("no node holds '{}'", leaf),
      )),
      _ => Err(PathError::not_found(
        path,
        format!("more than one node holds '{}'", leaf),
      )),
    }
  }
}

impl PathEvaluator for JsonPathEvaluator {
  fn evaluate(&self, document: &Value, path: &str) -> Result<Vec<Value>, PathError> {
    if let Some(segments) = dotted_segments(path) {
      let matches = self.query(document, path, &render(&segments))?;
      if !matches.is_empty() {
        return Ok(matches);
      }
      return self.missing_leaf(document, path, &segments);
    }

    let matches = self.query(document, path, path)?;
    if !matches.is_empty() {
      return Ok(matches);
    }
    match singular_segments(path) {
      Some(segments) => self.missing_leaf(document, path, &segments),
      None => Ok(matches),
    }
  }
}

/// One step of a singular path.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
  /// Object member only.
  Name(String),
  /// Array element only.
  Index(usize),
  /// Digit segment of a dotted path: an object member or an array element,
  /// whichever the container holds.
  Digits(String, usize),
}

impl Segment {
  fn dotted(segment: &str) -> Self {
    match Pointer::index(segment) {
      Some(index) if index as u64 <= MAX_INDEX => Segment::Digits(segment.to_string(), index),
      _ => Segment::Name(segment.to_string()),
    }
  }
}

impl fmt::Display for Segment {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Segment::Name(name) | Segment::Digits(name, _) => f.write_str(name),
      Segment::Index(index) => write!(f, "{}", index),
    }
  }
}

/// Split a path written in the dotted form into its segments.
///
/// Returns `None` for anything else, including paths with empty segments
/// (`$..name` is recursive descent, not an empty field).
fn dotted_segments(path: &str) -> Option<Vec<Segment>> {
  if path == ROOT {
    return Some(Vec::new());
  }
  let rest = path.strip_prefix("$.")?;
  let segments: Vec<&str> = rest.split('.').collect();
  segments
    .iter()
    .all(|segment| !segment.is_empty() && !segment.contains(QUERY_SYNTAX))
    .then(|| segments.into_iter().map(Segment::dotted).collect())
}

/// Split an already valid query into its segments when it is singular, i.e.
/// built only from `.name`, `['name']` and `[index]` steps.
///
/// Wildcards, unions, slices, filters, negative indices and recursive descent
/// give `None`.
fn singular_segments(path: &str) -> Option<Vec<Segment>> {
  let mut rest = path.strip_prefix(ROOT)?;
  let mut segments = Vec::new();

  loop {
    rest = rest.trim_start_matches(BLANK);
    if rest.is_empty() {
      return Some(segments);
    }

    if let Some(inner) = rest.strip_prefix('[') {
      let (segment, after) = bracket_segment(inner)?;
      segments.push(segment);
      rest = after;
    } else if let Some(after) = rest.strip_prefix('.') {
      let end = after
        .find(|c: char| c == '.' || c == '[' || BLANK.contains(&c))
        .unwrap_or(after.len());
      let name = &after[..end];
      if name.is_empty() || name.contains(QUERY_SYNTAX) {
        return None;
      }
      segments.push(Segment::Name(name.to_string()));
      rest = &after[end..];
    } else {
      return None;
    }
  }
}

/// Parse one bracketed selector, `input` starting just after `[`.
fn bracket_segment(input: &str) -> Option<(Segment, &str)> {
  let input = input.trim_start_matches(BLANK);
  let (segment, rest) = match input.chars().next()? {
    quote @ ('\'' | '"') => {
      let (name, rest) = quoted_name(&input[1..], quote)?;
      (Segment::Name(name), rest)
    }
    c if c.is_ascii_digit() => {
      let end = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
      (Segment::Index(input[..end].parse().ok()?), &input[end..])
    }
    _ => return None,
  };

  let rest = rest.trim_start_matches(BLANK).strip_prefix(']')?;
  Some((segment, rest))
}

/// Unescape a string literal up to its closing `quote`.
fn quoted_name(input: &str, quote: char) -> Option<(String, &str)> {
  let mut name = String::new();
  let mut chars = input.char_indices();

  while let Some((i, c)) = chars.next() {
    match c {
      c if c == quote => return Some((name, &input[i + 1..])),
      '\\' => match chars.next()?.1 {
        'b' => name.push('\u{8}'),
        'f' => name.push('\u{c}'),
        'n' => name.push('\n'),
        'r' => name.push('\r'),
        't' => name.push('\t'),
        'u' => name.push(unicode_escape(&mut chars)?),
        c @ ('/' | '\\' | '\'' | '"') => name.push(c),
        _ => return None,
      },
      c => name.push(c),
    }
  }
  None
}

fn unicode_escape(chars: &mut CharIndices<'_>) -> Option<char> {
  let high = hex4(chars)?;
  if !(0xD800..0xDC00).contains(&high) {
    return char::from_u32(high);
  }

  if chars.next()?.1 != '\\' || chars.next()?.1 != 'u' {
    return None;
  }
  let low = hex4(chars)?;
  if !(0xDC00..0xE000).contains(&low) {
    return None;
  }
  char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
}

fn hex4(chars: &mut CharIndices<'_>) -> Option<u32> {
  (0..4).try_fold(0, |acc, _| Some(acc * 16 + chars.next()?.1.to_digit(16)?))
}

/// Render segments as an RFC 9535 query.
///
/// A digit segment becomes the union `['n',n]`: on an object only the member
/// matches, on an array only the element does.
fn render(segments: &[Segment]) -> String {
  let mut query = String::from(ROOT);
  for segment in segments {
    match segment {
      Segment::Name(name) => query.push_str(&format!("[{}]", quote_name(name))),
      Segment::Index(index) => query.push_str(&format!("[{}]", index)),
      Segment::Digits(name, index) => {
        query.push_str(&format!("[{},{}]", quote_name(name), index))
      }
    }
  }
  query
}

fn quote_name(name: &str) -> String {
  let mut quoted = String::with_capacity(name.len() + 2);
  quoted.push('\'');
  for c in name.chars() {
    match c {
      '\'' => quoted.push_str("\\'"),
      '\\' => quoted.push_str("\\\\"),
      c if (c as u32) < 0x20 => quoted.push_str(&format!("\\u{:04x}", c as u32)),
      c => quoted.push(c),
    }
  }
  quoted.push('\'');
  quoted
}
