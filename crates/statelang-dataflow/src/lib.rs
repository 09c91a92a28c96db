//! Statelang Dataflow
//!
//! Computes what a state sees and what it hands on.
//!
//! ```text
//! raw input ──InputPath──> filtered ──Parameters──> effective input ──> task
//!
//! task result ──ResultPath──> merged into state input ──OutputPath──> effective output
//! ```
//!
//! Every operation takes and returns JSON text, is synchronous, and touches
//! nothing outside the documents it is given. Errors come in two kinds, see
//! [`ErrorKind`]: definition problems (`InvalidPath`) and processing problems
//! (`Generic`). What to do with them is the caller's decision.
//!
//! # Usage
//!
//! ```ignore
//! use statelang_dataflow::DataFlow;
//!
//! let flow = DataFlow::new();
//! let input = flow.effective_input(raw, "$.order", r#"{"id.$": "$.orderId"}"#)?;
//! let output = flow.effective_output(raw, result, "$.taskresult", "$")?;
//! ```

mod dataflow;
mod document;
mod error;
mod input;
mod merge;
mod output;
mod parameters;

pub use dataflow::DataFlow;
pub use error::{DataFlowError, ErrorKind};
pub use input::effective_input;
pub use merge::set_at_pointer;
pub use output::{effective_output, merge_result};
pub use parameters::resolve_parameters;

/// Returned whenever a path field is empty and the document is discarded.
pub const EMPTY_DOCUMENT: &str = "{}";
