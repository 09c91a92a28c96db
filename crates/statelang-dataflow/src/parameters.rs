//! Parameter template resolution.
//!
//! A template is an object whose keys may end in `.$`. Such a key takes a path
//! string as its value; the resolved output carries the key without the suffix
//! and the node the path selects from the context document.
//!
//! ```json
//! {
//!   "comment": "static",
//!   "size.$": "$.product.details.size",
//!   "nested": { "price.$": "$.product.cost" }
//! }
//! ```
//! resolves against `{"product": {"details": {"size": "small"}, "cost": "$23"}}` to
//! ```json
//! { "comment": "static", "size": "small", "nested": { "price": "$23" } }
//! ```

use std::collections::HashSet;

use serde_json::{Map, Value};
use statelang_path::{PATH_KEY_SUFFIX, PathEvaluator};
use tracing::trace;

use crate::document::select_one;
use crate::error::DataFlowError;

/// Resolve every `.$` key in `template` against `context`.
///
/// Returns a new object; `template` is left untouched. Nested objects are
/// resolved at any depth. Arrays and other values are copied as they are.
/// A resolved key takes the position of its `.$` source and replaces any
/// literal key of the same name at that level.
pub fn resolve_parameters<E>(
  evaluator: &E,
  template: &Map<String, Value>,
  context: &Value,
) -> Result<Map<String, Value>, DataFlowError>
where
  E: PathEvaluator + ?Sized,
{
  let mut entries: Vec<(String, Value, bool)> = Vec::with_capacity(template.len());
  let mut resolved_keys = HashSet::new();

  for (key, value) in template {
    if let Value::Object(nested) = value {
      let nested = resolve_parameters(evaluator, nested, context)?;
      entries.push((key.clone(), Value::Object(nested), false));
      continue;
    }

    match key.strip_suffix(PATH_KEY_SUFFIX) {
      Some(field) => {
        let path = value
          .as_str()
          .ok_or_else(|| DataFlowError::invalid_path(key, "value must be a path string"))?;
        let resolved = select_one(evaluator, context, path)?;
        trace!(key = %key, path, "resolved parameter");
        resolved_keys.insert(field.to_string());
        entries.push((field.to_string(), resolved, true));
      }
      None => entries.push((key.clone(), value.clone(), false)),
    }
  }

  Ok(
    entries
      .into_iter()
      .filter(|(key, _, resolved)| *resolved || !resolved_keys.contains(key))
      .map(|(key, value, _)| (key, value))
      .collect(),
  )
}
