use serde_json::Value;
use statelang_path::PathEvaluator;

use crate::error::DataFlowError;

/// Parse JSON text, naming the document in the error.
pub(crate) fn parse_document(text: &str, name: &str) -> Result<Value, DataFlowError> {
  serde_json::from_str(text)
    .map_err(|e| DataFlowError::generic(format!("failed to parse {}: {}", name, e)))
}

pub(crate) fn to_pretty(document: &Value) -> Result<String, DataFlowError> {
  serde_json::to_string_pretty(document)
    .map_err(|e| DataFlowError::generic(format!("failed to serialize document: {}", e)))
}

/// Evaluate `path` and require exactly one match.
///
/// Several matches are rejected rather than narrowed to the first.
pub(crate) fn select_one<E>(
  evaluator: &E,
  document: &Value,
  path: &str,
) -> Result<Value, DataFlowError>
where
  E: PathEvaluator + ?Sized,
{
  let mut matches = evaluator.evaluate(document, path)?;
  match matches.len() {
    1 => Ok(matches.remove(0)),
    0 => Err(DataFlowError::invalid_path(path, "no node matches")),
    n => Err(DataFlowError::invalid_path(
      path,
      format!("matched {} nodes, exactly one is required", n),
    )),
  }
}
