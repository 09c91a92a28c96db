//! Statelang Path
//!
//! Read and write addressing for state documents.
//!
//! - [`PathEvaluator`] reads: it resolves a path expression against a document
//!   and always hands back a list of matches, so callers can check cardinality
//!   uniformly. [`JsonPathEvaluator`] is the stock implementation.
//! - [`Pointer`] writes: it is derived from the restricted dotted form
//!   (`$.a.b.c`) and consumed by the document merger.

use serde_json::Value;

mod error;
mod evaluator;
mod pointer;

pub use error::PathError;
pub use evaluator::{EvaluatorConfig, JsonPathEvaluator, PathEvaluator};
pub use pointer::Pointer;

/// The root marker of every path expression.
pub const ROOT: &str = "$";

/// Suffix marking a parameter key whose value is a path expression.
pub const PATH_KEY_SUFFIX: &str = ".$";

/// Upper-case name of a node's JSON type, as used in diagnostics.
pub fn node_type(value: &Value) -> &'static str {
  match value {
    Value::Null => "NULL",
    Value::Bool(_) => "BOOLEAN",
    Value::Number(_) => "NUMBER",
    Value::String(_) => "STRING",
    Value::Array(_) => "ARRAY",
    Value::Object(_) => "OBJECT",
  }
}
