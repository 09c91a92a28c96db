//! Effective output: `ResultPath`, then `OutputPath`.

use serde_json::Value;
use statelang_path::{PathEvaluator, Pointer, ROOT};
use tracing::{Level, debug, enabled, instrument};

use crate::EMPTY_DOCUMENT;
use crate::document::{parse_document, select_one, to_pretty};
use crate::error::DataFlowError;
use crate::merge::set_at_pointer;

/// Compute the output a state passes to the next one.
///
/// Rules, first match wins:
/// 1. empty `output_path`: `{}`
/// 2. `output_path` is `$`: `state_input`, byte for byte
/// 3. empty `result_path` or empty `state_result`: `output_path` read from `state_input`
/// 4. `result_path` is `$`: `output_path` read from `state_result`
/// 5. otherwise: `state_result` merged into `state_input` at `result_path`, then
///    `output_path` read from the merged document
#[instrument(
  name = "effective_output",
  skip_all,
  fields(result_path = %result_path, output_path = %output_path)
)]
pub fn effective_output<E>(
  evaluator: &E,
  state_input: &str,
  state_result: &str,
  result_path: &str,
  output_path: &str,
) -> Result<String, DataFlowError>
where
  E: PathEvaluator + ?Sized,
{
  if output_path.is_empty() {
    debug!("output path is empty, discarding output");
    return Ok(EMPTY_DOCUMENT.to_string());
  }

  if output_path == ROOT {
    return Ok(state_input.to_string());
  }

  if result_path.is_empty() || state_result.is_empty() {
    debug!("discarding state result");
    return extract(evaluator, state_input, "state input", output_path);
  }

  if result_path == ROOT {
    return extract(evaluator, state_result, "state result", output_path);
  }

  let merged = merge(state_input, state_result, result_path)?;
  if enabled!(Level::DEBUG) {
    let pretty = to_pretty(&merged)?;
    debug!(merged = %pretty, "merged state result into input");
  }

  let output = select_one(evaluator, &merged, output_path)?;
  Ok(output.to_string())
}

/// Apply `result_path` alone and return the merged document, pretty-printed.
///
/// `$` replaces the input with the result. An empty `result_path` or an empty
/// `state_result` keeps the input unchanged.
pub fn merge_result(
  state_input: &str,
  state_result: &str,
  result_path: &str,
) -> Result<String, DataFlowError> {
  if result_path.is_empty() || state_result.is_empty() {
    return to_pretty(&parse_document(state_input, "state input")?);
  }
  to_pretty(&merge(state_input, state_result, result_path)?)
}

fn merge(
  state_input: &str,
  state_result: &str,
  result_path: &str,
) -> Result<Value, DataFlowError> {
  let mut document = parse_document(state_input, "state input")?;
  let result = parse_document(state_result, "state result")?;
  let pointer = Pointer::from_path(result_path)?;

  set_at_pointer(&mut document, &pointer, result)?;
  Ok(document)
}

fn extract<E>(evaluator: &E, text: &str, name: &str, path: &str) -> Result<String, DataFlowError>
where
  E: PathEvaluator + ?Sized,
{
  let document = parse_document(text, name)?;
  Ok(select_one(evaluator, &document, path)?.to_string())
}
