//! Effective input: `InputPath`, then `Parameters`.

use serde_json::{Map, Value};
use statelang_path::PathEvaluator;
use tracing::{debug, instrument};

use crate::EMPTY_DOCUMENT;
use crate::document::{parse_document, select_one};
use crate::error::DataFlowError;
use crate::parameters::resolve_parameters;

/// Compute the input handed to a state's task.
///
/// - An empty `input_path` discards the input and yields `{}`.
/// - Otherwise `input_path` must select exactly one node of `raw_input`.
/// - An empty `parameters` yields that node; otherwise `parameters` is a
///   template resolved against it.
#[instrument(name = "effective_input", skip_all, fields(input_path = %input_path))]
pub fn effective_input<E>(
  evaluator: &E,
  raw_input: &str,
  input_path: &str,
  parameters: &str,
) -> Result<String, DataFlowError>
where
  E: PathEvaluator + ?Sized,
{
  apply(evaluator, raw_input, input_path, || {
    if parameters.is_empty() {
      return Ok(None);
    }
    match parse_document(parameters, "parameters")? {
      Value::Object(template) => Ok(Some(template)),
      _ => Err(DataFlowError::generic("parameters must be a JSON object")),
    }
  })
}

/// Shared by the text and definition entry points. The template is only
/// produced once the input path has been applied.
pub(crate) fn apply<E, F>(
  evaluator: &E,
  raw_input: &str,
  input_path: &str,
  template: F,
) -> Result<String, DataFlowError>
where
  E: PathEvaluator + ?Sized,
  F: FnOnce() -> Result<Option<Map<String, Value>>, DataFlowError>,
{
  if input_path.is_empty() {
    debug!("input path is empty, discarding input");
    return Ok(EMPTY_DOCUMENT.to_string());
  }

  let document = parse_document(raw_input, "state input")?;
  let filtered = select_one(evaluator, &document, input_path)?;

  let Some(template) = template()? else {
    return Ok(filtered.to_string());
  };

  let resolved = resolve_parameters(evaluator, &template, &filtered)?;
  debug!(parameters = template.len(), "resolved parameters");
  Ok(Value::Object(resolved).to_string())
}
