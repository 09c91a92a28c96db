use statelang_config::DataFlowDef;
use statelang_path::{JsonPathEvaluator, PathEvaluator};

use crate::error::DataFlowError;
use crate::{input, output};

/// Data-flow processing bound to a path evaluator.
///
/// This is the entry point for a workflow executor: call
/// [`process_input`](Self::process_input) before running a state's task and
/// [`process_output`](Self::process_output) after it. `DataFlow` holds no
/// mutable state and can be shared across threads.
#[derive(Debug, Clone)]
pub struct DataFlow<E = JsonPathEvaluator> {
  evaluator: E,
}

impl DataFlow {
  /// Processing with a [`JsonPathEvaluator`] in its default configuration.
  pub fn new() -> Self {
    Self::with_evaluator(JsonPathEvaluator::default())
  }
}

impl Default for DataFlow {
  fn default() -> Self {
    Self::new()
  }
}

impl<E: PathEvaluator> DataFlow<E> {
  pub fn with_evaluator(evaluator: E) -> Self {
    Self { evaluator }
  }

  pub fn evaluator(&self) -> &E {
    &self.evaluator
  }

  /// See [`effective_input`](crate::effective_input).
  pub fn effective_input(
    &self,
    raw_input: &str,
    input_path: &str,
    parameters: &str,
  ) -> Result<String, DataFlowError> {
    input::effective_input(&self.evaluator, raw_input, input_path, parameters)
  }

  /// See [`effective_output`](crate::effective_output).
  pub fn effective_output(
    &self,
    state_input: &str,
    state_result: &str,
    result_path: &str,
    output_path: &str,
  ) -> Result<String, DataFlowError> {
    output::effective_output(
      &self.evaluator,
      state_input,
      state_result,
      result_path,
      output_path,
    )
  }

  /// See [`merge_result`](crate::merge_result).
  pub fn merge_result(
    &self,
    state_input: &str,
    state_result: &str,
    result_path: &str,
  ) -> Result<String, DataFlowError> {
    output::merge_result(state_input, state_result, result_path)
  }

  /// Effective input for a state, taking `InputPath` and `Parameters` from its
  /// definition.
  pub fn process_input(&self, def: &DataFlowDef, raw_input: &str) -> Result<String, DataFlowError> {
    input::apply(&self.evaluator, raw_input, &def.input_path, || {
      Ok(def.parameters.clone())
    })
  }

  /// Effective output for a state, taking `ResultPath` and `OutputPath` from
  /// its definition.
  pub fn process_output(
    &self,
    def: &DataFlowDef,
    state_input: &str,
    state_result: &str,
  ) -> Result<String, DataFlowError> {
    self.effective_output(state_input, state_result, &def.result_path, &def.output_path)
  }
}
